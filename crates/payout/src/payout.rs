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

//! Orchestration: turns chain and election data into reward share reports.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::address::DelegateKey;
use crate::chain::{ChainClient, ElectionClient, EpochMeta};
use crate::config::PayoutConfig;
use crate::election::evaluate_snapshot;
use crate::epochs::parse_epoch_ranges;
use crate::reward::compute_reward;
use crate::shares::{allocate_shares, RewardShares};

/// Blocks produced by the operator in the epoch, zero when it never made
/// the producer list.
fn productivity(meta: &EpochMeta, operator: &str) -> u64 {
    meta.block_producers
        .iter()
        .find(|bp| bp.address == operator)
        .map(|bp| bp.production)
        .unwrap_or(0)
}

/// Computes the full reward share report for a single epoch.
///
/// Fetches the epoch metadata, looks up the election snapshot at the
/// epoch's gravity chain height, and splits the delegate's reward among
/// its voters per the commission configuration.
pub async fn compute_epoch_reward_shares<C, E>(
    chain: &C,
    election: &E,
    operator: &str,
    delegate: &DelegateKey,
    epoch: u64,
    config: &PayoutConfig,
) -> Result<RewardShares>
where
    C: ChainClient + ?Sized,
    E: ElectionClient + ?Sized,
{
    config.validate()?;

    let meta = chain
        .epoch_meta(epoch)
        .await
        .with_context(|| format!("fetching metadata for epoch {epoch}"))?;
    let blocks = productivity(&meta, operator);

    let snapshot = election.snapshot_at(meta.gravity_chain_height).await.with_context(|| {
        format!("fetching election results at gravity height {}", meta.gravity_chain_height)
    })?;
    let standing = evaluate_snapshot(&snapshot, delegate);
    debug!(
        epoch,
        productivity = blocks,
        elected = standing.elected,
        votes = %standing.delegate_votes,
        "evaluated delegate standing"
    );

    let reward =
        compute_reward(blocks, standing.elected, &standing.delegate_votes, &standing.qualifying_total)?;
    let shares =
        allocate_shares(&standing.distribution, &standing.delegate_votes, &reward, epoch, config)?;
    Ok(RewardShares::for_epoch(epoch, blocks, &standing.delegate_votes, reward, shares)?)
}

/// Computes reward shares for an epoch range expression such as `1,3-5`.
///
/// An empty expression means the chain's current epoch. The expression is
/// validated in full before any network traffic, and the per-epoch reports
/// are folded together in written order under the expression as the label.
pub async fn compute_reward_shares<C, E>(
    chain: &C,
    election: &E,
    operator: &str,
    delegate: &DelegateKey,
    epochs: &str,
    config: &PayoutConfig,
) -> Result<RewardShares>
where
    C: ChainClient + ?Sized,
    E: ElectionClient + ?Sized,
{
    config.validate()?;

    if epochs.is_empty() {
        let current = chain.current_epoch().await.context("fetching current epoch")?;
        info!(epoch = current, "no epochs requested, paying out the current one");
        return compute_epoch_reward_shares(chain, election, operator, delegate, current, config)
            .await;
    }

    let expanded = parse_epoch_ranges(epochs)?;
    let mut result = RewardShares::labeled(epochs);
    for epoch in expanded {
        info!(epoch, "computing reward shares");
        let report =
            compute_epoch_reward_shares(chain, election, operator, delegate, epoch, config).await?;
        result.combine(report, config);
    }
    Ok(result)
}
