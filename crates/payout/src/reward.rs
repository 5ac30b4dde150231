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

//! The three-part delegate reward and its per-epoch computation.

use std::ops::{Add, AddAssign};

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::units::{rau, u256_dec};
use crate::PayoutError;

/// Mining reward per produced block, in IOTX.
pub const BLOCK_REWARD_IOTX: u64 = 16;

/// Foundation bonus per epoch for an elected delegate, in IOTX.
///
/// The foundation allocates 1920 IOTX per day over 24 hourly epochs.
pub const FOUNDATION_BONUS_IOTX: u64 = 80;

/// Epoch bonus pool split pro rata among qualifying delegates, in IOTX.
///
/// 300000 IOTX per day over 24 hourly epochs.
pub const EPOCH_BONUS_POOL_IOTX: u64 = 12_500;

/// A delegate's reward for one epoch or a span of epochs, in Rau.
///
/// Serialized with each component as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Mining reward for produced blocks.
    #[serde(with = "u256_dec")]
    pub block: U256,
    /// Foundation bonus, paid only while elected.
    #[serde(rename = "foundation", with = "u256_dec")]
    pub foundation_bonus: U256,
    /// Pro-rata slice of the epoch bonus pool.
    #[serde(rename = "epoch", with = "u256_dec")]
    pub epoch_bonus: U256,
}

impl Reward {
    /// Sum of the three components.
    pub fn total(&self) -> U256 {
        self.block + self.foundation_bonus + self.epoch_bonus
    }
}

impl Add for Reward {
    type Output = Reward;

    fn add(self, rhs: Reward) -> Reward {
        Reward {
            block: self.block + rhs.block,
            foundation_bonus: self.foundation_bonus + rhs.foundation_bonus,
            epoch_bonus: self.epoch_bonus + rhs.epoch_bonus,
        }
    }
}

impl AddAssign for Reward {
    fn add_assign(&mut self, rhs: Reward) {
        *self = *self + rhs;
    }
}

/// Computes a delegate's reward for one epoch.
///
/// The block reward is exact, the epoch bonus is floored integer division. A
/// zero `qualifying_total` is a data error rather than a zero bonus: it means
/// the election snapshot had no qualifying delegate at all.
pub fn compute_reward(
    blocks_produced: u64,
    elected: bool,
    delegate_votes: &U256,
    qualifying_total: &U256,
) -> Result<Reward, PayoutError> {
    if qualifying_total.is_zero() {
        return Err(PayoutError::ZeroQualifyingVotes);
    }
    let block = U256::from(blocks_produced) * rau(BLOCK_REWARD_IOTX);
    let foundation_bonus = if elected { rau(FOUNDATION_BONUS_IOTX) } else { U256::ZERO };
    let epoch_bonus = rau(EPOCH_BONUS_POOL_IOTX) * delegate_votes / qualifying_total;
    Ok(Reward { block, foundation_bonus, epoch_bonus })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_iotx_per_block() {
        let reward =
            compute_reward(8, true, &U256::from(500), &U256::from(1000)).unwrap();
        assert_eq!(reward.block, rau(8 * 16));
    }

    #[test]
    fn foundation_bonus_requires_election() {
        let elected =
            compute_reward(8, true, &U256::from(500), &U256::from(1000)).unwrap();
        assert_eq!(elected.foundation_bonus, rau(80));

        let not_elected =
            compute_reward(8, false, &U256::from(500), &U256::from(1000)).unwrap();
        assert_eq!(not_elected.foundation_bonus, U256::ZERO);
    }

    #[test]
    fn epoch_bonus_is_pro_rata() {
        let reward =
            compute_reward(8, true, &U256::from(500), &U256::from(1000)).unwrap();
        assert_eq!(reward.epoch_bonus, rau(6250));
    }

    #[test]
    fn epoch_bonus_floors_the_division() {
        let reward = compute_reward(0, false, &U256::from(1), &U256::from(3)).unwrap();
        assert_eq!(reward.epoch_bonus.to_string(), "4166666666666666666666");
    }

    #[test]
    fn epoch_bonus_never_exceeds_the_pool() {
        let full = compute_reward(0, false, &U256::from(77), &U256::from(77)).unwrap();
        assert_eq!(full.epoch_bonus, rau(EPOCH_BONUS_POOL_IOTX));
    }

    #[test]
    fn epoch_bonus_grows_with_votes() {
        let total = U256::from(10_000);
        let mut previous = U256::ZERO;
        for votes in [0u64, 1, 999, 5_000, 9_999, 10_000] {
            let reward = compute_reward(0, false, &U256::from(votes), &total).unwrap();
            assert!(reward.epoch_bonus >= previous);
            previous = reward.epoch_bonus;
        }
    }

    #[test]
    fn zero_qualifying_total_is_an_error() {
        let err = compute_reward(8, true, &U256::from(500), &U256::ZERO).unwrap_err();
        assert!(matches!(err, PayoutError::ZeroQualifyingVotes));
    }

    #[test]
    fn rewards_add_component_wise() {
        let mut left = Reward {
            block: U256::from(10),
            foundation_bonus: U256::from(20),
            epoch_bonus: U256::from(30),
        };
        let right = Reward {
            block: U256::from(1),
            foundation_bonus: U256::from(2),
            epoch_bonus: U256::from(3),
        };
        left += right;
        assert_eq!(left.block, U256::from(11));
        assert_eq!(left.foundation_bonus, U256::from(22));
        assert_eq!(left.epoch_bonus, U256::from(33));
        assert_eq!(left.total(), U256::from(66));
    }
}
