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

//! Collaborator interfaces for chain metadata and election snapshots.
//!
//! The calculation itself never talks to the network; it consumes these two
//! traits and fails fast on any collaborator error. Retry policy, if any,
//! belongs to the implementations.

use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;

use crate::DelegateKey;

/// One entry of an epoch's block-producer list.
#[derive(Debug, Clone)]
pub struct BlockProducer {
    /// Operator io address.
    pub address: String,
    /// Number of blocks produced in the epoch.
    pub production: u64,
}

/// Chain metadata for one epoch.
#[derive(Debug, Clone)]
pub struct EpochMeta {
    /// Epoch number.
    pub num: u64,
    /// Height on the gravity (companion) chain at which votes were taken.
    pub gravity_chain_height: u64,
    /// Producers active in the epoch with their block counts.
    pub block_producers: Vec<BlockProducer>,
}

/// A single weighted vote for a delegate.
#[derive(Debug, Clone)]
pub struct VoteRecord {
    /// Voter address (20 bytes, shared by the io and eth encodings).
    pub voter: Address,
    /// Weighted vote amount in Rau.
    pub weighted_amount: U256,
}

/// One delegate's entry in an election snapshot.
#[derive(Debug, Clone)]
pub struct DelegateRecord {
    /// Canonical delegate key.
    pub key: DelegateKey,
    /// The delegate's own stake in Rau.
    pub self_stake: U256,
    /// All weighted votes cast for the delegate.
    pub votes: Vec<VoteRecord>,
}

/// The election result at one gravity-chain height.
#[derive(Debug, Clone, Default)]
pub struct ElectionSnapshot {
    pub delegates: Vec<DelegateRecord>,
}

/// Read access to IoTeX chain metadata.
#[async_trait]
pub trait ChainClient {
    /// Number of the epoch the chain is currently in.
    async fn current_epoch(&self) -> Result<u64>;

    /// Metadata for the given epoch. A missing epoch is an error.
    async fn epoch_meta(&self, epoch: u64) -> Result<EpochMeta>;
}

/// Read access to election results on the gravity chain.
#[async_trait]
pub trait ElectionClient {
    /// The election snapshot taken at the given gravity-chain height.
    async fn snapshot_at(&self, gravity_height: u64) -> Result<ElectionSnapshot>;
}
