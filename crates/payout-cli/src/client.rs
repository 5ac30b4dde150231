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

//! HTTP clients for the chain API and the election result API.

use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use iotex_payout::{
    parse_rau, BlockProducer, ChainClient, DelegateKey, DelegateRecord, ElectionClient,
    ElectionSnapshot, EpochMeta, VoteRecord,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "iotex-payout/0.1";

fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("building HTTP client")
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    tracing::debug!(%url, "GET");
    let response =
        client.get(url.clone()).send().await.with_context(|| format!("requesting {url}"))?;
    if !response.status().is_success() {
        bail!("API error from {url}: {}", response.status());
    }
    response.json().await.with_context(|| format!("decoding response from {url}"))
}

/// Client for the chain API: current epoch and per-epoch metadata.
pub struct HttpChainClient {
    client: Client,
    base_url: Url,
}

impl HttpChainClient {
    pub fn new(base_url: Url) -> Result<Self> {
        Ok(Self { client: http_client()?, base_url })
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn current_epoch(&self) -> Result<u64> {
        let url = self.base_url.join("v1/chainmeta").context("building chainmeta URL")?;
        let meta: ChainMetaResponse = get_json(&self.client, url).await?;
        Ok(meta.epoch.num)
    }

    async fn epoch_meta(&self, epoch: u64) -> Result<EpochMeta> {
        let url =
            self.base_url.join(&format!("v1/epochs/{epoch}")).context("building epoch URL")?;
        let response: EpochResponse = get_json(&self.client, url).await?;
        Ok(response.into_meta())
    }
}

/// Client for the election API serving gravity-chain vote results.
pub struct HttpElectionClient {
    client: Client,
    base_url: Url,
}

impl HttpElectionClient {
    pub fn new(base_url: Url) -> Result<Self> {
        Ok(Self { client: http_client()?, base_url })
    }
}

#[async_trait]
impl ElectionClient for HttpElectionClient {
    async fn snapshot_at(&self, gravity_height: u64) -> Result<ElectionSnapshot> {
        let url = self
            .base_url
            .join(&format!("v1/results/{gravity_height}"))
            .context("building results URL")?;
        let response: ResultsResponse = get_json(&self.client, url).await?;
        response.into_snapshot()
    }
}

// Wire models.

#[derive(Debug, Deserialize)]
struct ChainMetaResponse {
    epoch: EpochPointer,
}

#[derive(Debug, Deserialize)]
struct EpochPointer {
    num: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpochResponse {
    epoch_data: EpochData,
    #[serde(default)]
    block_producers_info: Vec<BlockProducerInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpochData {
    num: u64,
    gravity_chain_start_height: u64,
}

#[derive(Debug, Deserialize)]
struct BlockProducerInfo {
    address: String,
    production: u64,
}

impl EpochResponse {
    fn into_meta(self) -> EpochMeta {
        EpochMeta {
            num: self.epoch_data.num,
            gravity_chain_height: self.epoch_data.gravity_chain_start_height,
            block_producers: self
                .block_producers_info
                .into_iter()
                .map(|bp| BlockProducer { address: bp.address, production: bp.production })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    delegates: Vec<DelegateInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DelegateInfo {
    name: String,
    self_staking_tokens: String,
    #[serde(default)]
    votes: Vec<VoteInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoteInfo {
    voter: String,
    weighted_amount: String,
}

fn parse_voter(hex_addr: &str) -> Result<Address> {
    let stripped = hex_addr.strip_prefix("0x").unwrap_or(hex_addr);
    let bytes =
        hex::decode(stripped).with_context(|| format!("voter address {hex_addr:?} is not hex"))?;
    if bytes.len() != Address::len_bytes() {
        bail!(
            "voter address {hex_addr:?} has {} bytes, expected {}",
            bytes.len(),
            Address::len_bytes()
        );
    }
    Ok(Address::from_slice(&bytes))
}

impl ResultsResponse {
    fn into_snapshot(self) -> Result<ElectionSnapshot> {
        let mut delegates = Vec::with_capacity(self.delegates.len());
        for delegate in self.delegates {
            let mut votes = Vec::with_capacity(delegate.votes.len());
            for vote in delegate.votes {
                votes.push(VoteRecord {
                    voter: parse_voter(&vote.voter)?,
                    weighted_amount: parse_rau(&vote.weighted_amount)?,
                });
            }
            delegates.push(DelegateRecord {
                key: DelegateKey::from_name(&delegate.name),
                self_stake: parse_rau(&delegate.self_staking_tokens)?,
                votes,
            });
        }
        Ok(ElectionSnapshot { delegates })
    }
}
