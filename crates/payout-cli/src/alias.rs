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

//! Operator alias resolution against an ioctl-style YAML store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use iotex_payout::parse_io_address;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Resolves an operator argument to a canonical io address.
///
/// A well-formed `io1...` address passes through untouched; anything else is
/// treated as an alias and looked up in the YAML store. Unknown aliases and
/// stores that map to malformed addresses are fatal.
pub fn resolve(operator: &str, aliases: Option<&Path>) -> Result<String> {
    if parse_io_address(operator).is_ok() {
        return Ok(operator.to_string());
    }

    let Some(path) = aliases else {
        bail!("{operator:?} is not an io address and no alias file was given");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading alias file {}", path.display()))?;
    let file: AliasFile = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing alias file {}", path.display()))?;

    let address = file
        .aliases
        .get(operator)
        .ok_or_else(|| anyhow!("alias {operator:?} is not defined in {}", path.display()))?;
    parse_io_address(address)
        .with_context(|| format!("alias {operator:?} maps to a malformed address"))?;
    Ok(address.clone())
}
