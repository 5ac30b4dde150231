// Copyright 2025 Infinity Stones
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Delegate filtering and ranking over an election snapshot.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};

use crate::chain::ElectionSnapshot;
use crate::units::rau;
use crate::DelegateKey;

/// Number of delegates elected per epoch.
pub const ELECTED_DELEGATE_COUNT: usize = 36;

/// What an election snapshot says about one delegate.
#[derive(Debug, Clone)]
pub struct DelegateStanding {
    /// Whether the delegate ranks among the elected after filtering.
    pub elected: bool,
    /// Total weighted votes cast for the delegate.
    pub delegate_votes: U256,
    /// Sum of weighted votes over all qualifying delegates.
    pub qualifying_total: U256,
    /// Per-voter weighted votes for the delegate, duplicate voters merged.
    pub distribution: BTreeMap<Address, U256>,
}

// Two bot accounts vote with these exact totals; they never qualify.
fn bot_vote_totals() -> [U256; 2] {
    [U256::from(10u64).pow(U256::from(26)), U256::from(10u64).pow(U256::from(20))]
}

fn min_delegate_votes() -> U256 {
    rau(2_000_000)
}

fn min_self_stake() -> U256 {
    rau(1_200_000)
}

/// Evaluates an election snapshot for one delegate.
///
/// A delegate qualifies when its weighted-vote total does not match a known
/// bot total, reaches 2,000,000 IOTX, and its self stake reaches 1,200,000
/// IOTX. The delegate is elected when it ranks in the top
/// [`ELECTED_DELEGATE_COUNT`] qualifying delegates by descending vote total;
/// the sort is stable, so ties keep snapshot order. The per-voter
/// distribution and the delegate's own total come from the unfiltered
/// snapshot.
pub fn evaluate_snapshot(snapshot: &ElectionSnapshot, delegate: &DelegateKey) -> DelegateStanding {
    let bots = bot_vote_totals();
    let vote_floor = min_delegate_votes();
    let stake_floor = min_self_stake();

    let mut ranked: Vec<(DelegateKey, U256)> = Vec::new();
    let mut qualifying_total = U256::ZERO;
    for record in &snapshot.delegates {
        let total: U256 = record.votes.iter().map(|v| v.weighted_amount).sum();
        if bots.contains(&total) || total < vote_floor || record.self_stake < stake_floor {
            continue;
        }
        qualifying_total += total;
        ranked.push((record.key, total));
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let elected = ranked.iter().take(ELECTED_DELEGATE_COUNT).any(|(key, _)| key == delegate);

    let mut distribution = BTreeMap::new();
    let mut delegate_votes = U256::ZERO;
    for record in snapshot.delegates.iter().filter(|r| r.key == *delegate) {
        for vote in &record.votes {
            *distribution.entry(vote.voter).or_insert(U256::ZERO) += vote.weighted_amount;
            delegate_votes += vote.weighted_amount;
        }
    }

    DelegateStanding { elected, delegate_votes, qualifying_total, distribution }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{DelegateRecord, VoteRecord};

    fn delegate(name: &str, self_stake_iotx: u64, votes_iotx: &[(u8, u64)]) -> DelegateRecord {
        DelegateRecord {
            key: DelegateKey::from_name(name),
            self_stake: rau(self_stake_iotx),
            votes: votes_iotx
                .iter()
                .map(|(voter, iotx)| VoteRecord {
                    voter: Address::repeat_byte(*voter),
                    weighted_amount: rau(*iotx),
                })
                .collect(),
        }
    }

    #[test]
    fn bot_vote_totals_never_qualify() {
        // 10^26 Rau is exactly 100,000,000 IOTX, well above the vote floor.
        let snapshot = ElectionSnapshot {
            delegates: vec![delegate("bigbot", 2_000_000, &[(1, 100_000_000)])],
        };
        let standing = evaluate_snapshot(&snapshot, &DelegateKey::from_name("bigbot"));
        assert!(!standing.elected);
        assert_eq!(standing.qualifying_total, U256::ZERO);
        // The distribution itself is still reported.
        assert_eq!(standing.delegate_votes, rau(100_000_000));
    }

    #[test]
    fn vote_floor_is_two_million() {
        let snapshot = ElectionSnapshot {
            delegates: vec![
                delegate("under", 2_000_000, &[(1, 1_999_999)]),
                delegate("at", 2_000_000, &[(2, 2_000_000)]),
            ],
        };
        let at = evaluate_snapshot(&snapshot, &DelegateKey::from_name("at"));
        assert!(at.elected);
        assert_eq!(at.qualifying_total, rau(2_000_000));

        let under = evaluate_snapshot(&snapshot, &DelegateKey::from_name("under"));
        assert!(!under.elected);
    }

    #[test]
    fn self_stake_floor_is_one_point_two_million() {
        let snapshot = ElectionSnapshot {
            delegates: vec![
                delegate("skin", 1_200_000, &[(1, 3_000_000)]),
                delegate("noskin", 1_199_999, &[(2, 3_000_000)]),
            ],
        };
        let skin = evaluate_snapshot(&snapshot, &DelegateKey::from_name("skin"));
        assert!(skin.elected);
        assert_eq!(skin.qualifying_total, rau(3_000_000));
        assert!(!evaluate_snapshot(&snapshot, &DelegateKey::from_name("noskin")).elected);
    }

    #[test]
    fn only_the_top_thirty_six_are_elected() {
        // The weakest qualifying delegate is listed first to show that rank
        // comes from sorted vote totals, not snapshot position.
        let mut delegates = vec![delegate("weakest", 2_000_000, &[(255, 2_000_000)])];
        for i in 0..36u64 {
            let name = format!("delegate{i:02}");
            delegates.push(delegate(&name, 2_000_000, &[(i as u8, 2_010_000 + i * 1_000)]));
        }
        let snapshot = ElectionSnapshot { delegates };

        assert!(!evaluate_snapshot(&snapshot, &DelegateKey::from_name("weakest")).elected);
        for i in 0..36u64 {
            let key = DelegateKey::from_name(&format!("delegate{i:02}"));
            assert!(evaluate_snapshot(&snapshot, &key).elected);
        }
    }

    #[test]
    fn ties_keep_snapshot_order() {
        // 35 strong delegates, then two tied for the final seat.
        let mut delegates = Vec::new();
        for i in 0..35u64 {
            let name = format!("strong{i:02}");
            delegates.push(delegate(&name, 2_000_000, &[(i as u8, 5_000_000)]));
        }
        delegates.push(delegate("earlier", 2_000_000, &[(40, 2_500_000)]));
        delegates.push(delegate("later", 2_000_000, &[(41, 2_500_000)]));
        let snapshot = ElectionSnapshot { delegates };

        assert!(evaluate_snapshot(&snapshot, &DelegateKey::from_name("earlier")).elected);
        assert!(!evaluate_snapshot(&snapshot, &DelegateKey::from_name("later")).elected);
    }

    #[test]
    fn qualifying_total_skips_filtered_delegates() {
        let snapshot = ElectionSnapshot {
            delegates: vec![
                delegate("good", 2_000_000, &[(1, 4_000_000)]),
                delegate("bigbot", 2_000_000, &[(2, 100_000_000)]),
                delegate("tiny", 2_000_000, &[(3, 500_000)]),
                delegate("also", 1_300_000, &[(4, 2_600_000)]),
            ],
        };
        let standing = evaluate_snapshot(&snapshot, &DelegateKey::from_name("good"));
        assert_eq!(standing.qualifying_total, rau(4_000_000 + 2_600_000));
    }

    #[test]
    fn duplicate_voters_are_merged() {
        let snapshot = ElectionSnapshot {
            delegates: vec![delegate("dup", 2_000_000, &[(1, 2_000_000), (1, 500_000), (2, 7)])],
        };
        let standing = evaluate_snapshot(&snapshot, &DelegateKey::from_name("dup"));
        assert_eq!(standing.delegate_votes, rau(2_500_007));
        assert_eq!(standing.distribution.len(), 2);
        assert_eq!(standing.distribution[&Address::repeat_byte(1)], rau(2_500_000));
        assert_eq!(standing.distribution[&Address::repeat_byte(2)], rau(7));
    }

    #[test]
    fn absent_delegate_has_empty_distribution() {
        let snapshot = ElectionSnapshot {
            delegates: vec![delegate("present", 2_000_000, &[(1, 4_000_000)])],
        };
        let standing = evaluate_snapshot(&snapshot, &DelegateKey::from_name("absent"));
        assert!(!standing.elected);
        assert!(standing.distribution.is_empty());
        assert_eq!(standing.delegate_votes, U256::ZERO);
        assert_eq!(standing.qualifying_total, rau(4_000_000));
    }
}
