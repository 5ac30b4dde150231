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

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use iotex_payout::{compute_reward_shares, DelegateKey, PayoutConfig, SHARE_SCALE};
use url::Url;

use crate::client::{HttpChainClient, HttpElectionClient};

mod alias;
mod client;
mod output;

/// Arguments of the payout calculator.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Calculates voters' reward shares for an IoTeX delegate and prints the input \
             for multisend",
    long_about = None
)]
struct MainArgs {
    /// Registered name of the delegate whose rewards are being split.
    delegate: String,
    /// Operator account that produced the blocks, an io address or an alias.
    operator: String,
    /// Commission rate on the block reward, in percent.
    #[clap(short = 'b', long, value_parser = clap::value_parser!(u8).range(0..=100), default_value_t = 100)]
    block_commission: u8,
    /// Commission rate on the epoch bonus, in percent.
    #[clap(short = 'p', long, value_parser = clap::value_parser!(u8).range(0..=100), default_value_t = 100)]
    epoch_commission: u8,
    /// Commission rate on the foundation bonus, in percent.
    #[clap(short = 'f', long, value_parser = clap::value_parser!(u8).range(0..=100), default_value_t = 100)]
    foundation_commission: u8,
    /// Append the report to this file as one compact line instead of
    /// printing it.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Epoch(s) to calculate rewards for, in range format (e.g. 1-2,4,7-10).
    /// The current epoch when omitted.
    #[clap(short, long, default_value = "")]
    epoch: String,
    /// Leave the per-epoch vote history out of the report.
    #[clap(short, long)]
    simple: bool,
    /// Base URL of the chain API.
    #[clap(long, env = "IOTEX_CHAIN_ENDPOINT", default_value = "https://api.iotex.one/")]
    chain_endpoint: Url,
    /// Base URL of the election result API.
    #[clap(long, env = "IOTEX_ELECTION_ENDPOINT", default_value = "https://member.iotex.io/api/")]
    election_endpoint: Url,
    /// YAML file mapping account aliases to io addresses.
    #[clap(long, env = "IOTEX_ALIASES")]
    aliases: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = MainArgs::parse();
    run(&args).await
}

async fn run(args: &MainArgs) -> Result<()> {
    let operator = alias::resolve(&args.operator, args.aliases.as_deref())?;
    let delegate = DelegateKey::from_name(&args.delegate);
    let config = PayoutConfig {
        block_commission: args.block_commission,
        epoch_commission: args.epoch_commission,
        foundation_commission: args.foundation_commission,
        simple: args.simple,
        scale: SHARE_SCALE,
    };

    let chain = HttpChainClient::new(args.chain_endpoint.clone())?;
    let election = HttpElectionClient::new(args.election_endpoint.clone())?;
    let report =
        compute_reward_shares(&chain, &election, &operator, &delegate, &args.epoch, &config)
            .await?;

    println!("{}", output::multisend_json(&report)?);
    match &args.output {
        Some(path) => output::append_report(path, &report)
            .with_context(|| format!("appending report to {}", path.display()))?,
        None => println!("{}", report.to_json_pretty()?),
    }
    Ok(())
}
