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

//! Multisend input and report file output.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use iotex_payout::{format_rau, RewardShares};
use serde::Serialize;

/// One row of the multisend contract input.
#[derive(Debug, Serialize, PartialEq)]
pub struct MultisendEntry {
    pub recipient: String,
    pub amount: String,
}

/// Rows for the multisend contract: `0x`-prefixed recipient and the summed
/// reward in IOTX display units, one row per voter in report order.
pub fn multisend_entries(report: &RewardShares) -> Vec<MultisendEntry> {
    report
        .shares
        .iter()
        .map(|share| MultisendEntry {
            recipient: format!("0x{}", share.eth_addr),
            amount: format_rau(&share.reward.total()),
        })
        .collect()
}

/// The multisend rows as compact JSON.
pub fn multisend_json(report: &RewardShares) -> Result<String> {
    serde_json::to_string(&multisend_entries(report)).context("serializing multisend input")
}

/// Appends the report to `path` as a single compact JSON line, creating the
/// file when missing.
pub fn append_report(path: &Path, report: &RewardShares) -> Result<()> {
    let mut line = report.to_json().context("serializing report")?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(line.as_bytes()).with_context(|| format!("writing {}", path.display()))
}
