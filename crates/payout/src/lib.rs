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

//! Reward share calculation for IoTeX delegates: splits a delegate's block,
//! foundation, and epoch bonus rewards among its voters after commission.

pub mod address;
pub mod chain;
pub mod config;
pub mod election;
pub mod epochs;
pub mod payout;
pub mod reward;
pub mod shares;
pub mod units;

use alloy_primitives::U256;
use thiserror::Error;

pub use address::{io_address, parse_io_address, DelegateKey};
pub use chain::{
    BlockProducer, ChainClient, DelegateRecord, ElectionClient, ElectionSnapshot, EpochMeta,
    VoteRecord,
};
pub use config::{PayoutConfig, SHARE_SCALE};
pub use election::{evaluate_snapshot, DelegateStanding, ELECTED_DELEGATE_COUNT};
pub use epochs::parse_epoch_ranges;
pub use payout::{compute_epoch_reward_shares, compute_reward_shares};
pub use reward::{
    compute_reward, Reward, BLOCK_REWARD_IOTX, EPOCH_BONUS_POOL_IOTX, FOUNDATION_BONUS_IOTX,
};
pub use shares::{allocate_shares, RewardShares, Share};
pub use units::{format_rau, parse_rau, rau, IOTX_DECIMALS};

/// Errors raised for invalid configuration or input data.
///
/// Collaborator failures (RPC, decoding) are reported as `anyhow` errors by
/// the orchestrator instead; see [`payout`].
#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("invalid {0} commission rate {1}, valid range is 0 to 100")]
    InvalidCommission(&'static str, u8),

    #[error("share scale must be nonzero")]
    ZeroScale,

    #[error("invalid epoch range: {0}")]
    BadEpochRange(String),

    #[error("qualifying vote total is zero")]
    ZeroQualifyingVotes,

    #[error("vote total is zero but the vote distribution is not empty")]
    ZeroTotalVotes,

    #[error("share fraction {0} does not fit in 64 bits")]
    ShareOverflow(U256),

    #[error("allocated share rewards exceed the epoch reward")]
    ShareSumExceedsReward,

    #[error("invalid io address {0:?}: {1}")]
    BadAddress(String, String),

    #[error("invalid decimal amount {0:?}: {1}")]
    BadAmount(String, String),
}
