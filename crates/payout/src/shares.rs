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

//! Per-voter share allocation and cross-epoch combination.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::address::io_address;
use crate::config::PayoutConfig;
use crate::reward::Reward;
use crate::PayoutError;

/// One voter's entitlement for an epoch or a combined span.
///
/// The three sequences are parallel: the i-th vote amount, share fraction,
/// and epoch number all describe the same epoch. In simple mode they stay
/// empty and are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    /// Voter address, io encoding.
    #[serde(rename = "ioaddr")]
    pub io_addr: String,
    /// Voter address, lowercase hex without prefix.
    #[serde(rename = "ethaddr")]
    pub eth_addr: String,
    /// Raw weighted votes per epoch, decimal Rau strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<String>,
    /// Share fractions per epoch, in units of the configured scale.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub share: Vec<u64>,
    /// Epoch numbers the two sequences above refer to.
    #[serde(rename = "voteperiod", default, skip_serializing_if = "Vec::is_empty")]
    pub vote_period: Vec<u64>,
    /// Cumulative discounted reward owed to the voter.
    pub reward: Reward,
}

/// Report for one epoch or a union of epochs.
///
/// Field names and nesting are a fixed external contract; consumers parse
/// this JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardShares {
    /// A single epoch number, or the range expression behind a union.
    #[serde(rename = "epochnum")]
    pub epoch_num: String,
    /// Cumulative number of blocks produced by the operator.
    pub productivity: u64,
    /// The delegate's weighted-vote total, one entry per contributing epoch.
    #[serde(rename = "votes")]
    pub total_votes: Vec<String>,
    /// Cumulative delegate reward before the commission split.
    pub reward: Reward,
    /// Per-voter entitlements, unique by voter address.
    pub shares: Vec<Share>,
}

/// Splits an epoch's reward among voters pro rata, after commission.
///
/// Each voter's fraction is `floor(votes * scale / total_votes)`, and each
/// discounted component is
/// `floor(fraction * component * (100 - commission) / (scale * 100))`.
/// Multiplication happens before division so intermediate precision is never
/// truncated away. Entries come out in voter-address order.
///
/// A zero `total_votes` with a non-empty distribution is an error; with an
/// empty distribution it yields an empty allocation.
pub fn allocate_shares(
    distribution: &BTreeMap<Address, U256>,
    total_votes: &U256,
    reward: &Reward,
    epoch: u64,
    config: &PayoutConfig,
) -> Result<Vec<Share>, PayoutError> {
    config.validate()?;
    if total_votes.is_zero() {
        if distribution.is_empty() {
            return Ok(Vec::new());
        }
        return Err(PayoutError::ZeroTotalVotes);
    }

    let scale = U256::from(config.scale);
    let mut shares = Vec::with_capacity(distribution.len());
    for (voter, votes) in distribution {
        let fraction = votes * scale / total_votes;
        let fraction_u64 =
            u64::try_from(fraction).map_err(|_| PayoutError::ShareOverflow(fraction))?;

        let discounted = |component: &U256, commission: u8| {
            fraction * component * U256::from(100 - commission) / (scale * U256::from(100))
        };
        let voter_reward = Reward {
            block: discounted(&reward.block, config.block_commission),
            foundation_bonus: discounted(&reward.foundation_bonus, config.foundation_commission),
            epoch_bonus: discounted(&reward.epoch_bonus, config.epoch_commission),
        };

        let mut share = Share {
            io_addr: io_address(voter)?,
            eth_addr: hex::encode(voter),
            votes: Vec::new(),
            share: Vec::new(),
            vote_period: Vec::new(),
            reward: voter_reward,
        };
        if !config.simple {
            share.votes.push(votes.to_string());
            share.share.push(fraction_u64);
            share.vote_period.push(epoch);
        }
        shares.push(share);
    }
    Ok(shares)
}

impl RewardShares {
    /// Assembles the validated report for a single epoch.
    ///
    /// Checks the allocation invariant: the per-component sums over the
    /// shares must not exceed the epoch reward. Floor truncation may leave
    /// them short, never over.
    pub fn for_epoch(
        epoch: u64,
        productivity: u64,
        total_votes: &U256,
        reward: Reward,
        shares: Vec<Share>,
    ) -> Result<Self, PayoutError> {
        let mut allocated = Reward::default();
        for share in &shares {
            allocated += share.reward;
        }
        if allocated.block > reward.block
            || allocated.foundation_bonus > reward.foundation_bonus
            || allocated.epoch_bonus > reward.epoch_bonus
        {
            return Err(PayoutError::ShareSumExceedsReward);
        }
        Ok(Self {
            epoch_num: epoch.to_string(),
            productivity,
            total_votes: vec![total_votes.to_string()],
            reward,
            shares,
        })
    }

    /// An empty accumulator labeled with the range expression it will cover.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            epoch_num: label.into(),
            productivity: 0,
            total_votes: Vec::new(),
            reward: Reward::default(),
            shares: Vec::new(),
        }
    }

    /// Folds another report into this one.
    ///
    /// Numeric totals add associatively and commutatively. The total-votes
    /// list and the per-voter sequences append in call order, so a caller
    /// wanting chronological history must combine in ascending epoch order.
    pub fn combine(&mut self, other: RewardShares, config: &PayoutConfig) {
        self.productivity += other.productivity;
        self.total_votes.extend(other.total_votes);
        self.reward += other.reward;
        for right in other.shares {
            match self.shares.iter().position(|left| left.eth_addr == right.eth_addr) {
                Some(i) => {
                    let left = &mut self.shares[i];
                    left.reward += right.reward;
                    if !config.simple {
                        left.votes.extend(right.votes);
                        left.share.extend(right.share);
                        left.vote_period.extend(right.vote_period);
                    }
                }
                None => self.shares.push(right),
            }
        }
    }

    /// Compact single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON for human consumption.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
