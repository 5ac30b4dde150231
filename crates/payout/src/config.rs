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

//! Payout configuration threaded explicitly through the calculation.

use crate::PayoutError;

/// Default share-fraction denominator: parts per billion.
pub const SHARE_SCALE: u64 = 1_000_000_000;

/// Commission rates and output options for one payout run.
///
/// Commission rates are integer percentages in `[0, 100]`, one per reward
/// component. The delegate keeps the commission; voters split the rest. The
/// default of 100 pays everything to the delegate until the operator lowers
/// the rates on the command line.
#[derive(Debug, Clone)]
pub struct PayoutConfig {
    /// Commission on the per-block mining reward, percent.
    pub block_commission: u8,
    /// Commission on the epoch bonus, percent.
    pub epoch_commission: u8,
    /// Commission on the foundation bonus, percent.
    pub foundation_commission: u8,
    /// Skip the per-epoch vote history in each share, keep rewards only.
    pub simple: bool,
    /// Share-fraction denominator, [`SHARE_SCALE`] unless overridden.
    pub scale: u64,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            block_commission: 100,
            epoch_commission: 100,
            foundation_commission: 100,
            simple: false,
            scale: SHARE_SCALE,
        }
    }
}

impl PayoutConfig {
    /// Checks all commission rates and the scale for validity.
    pub fn validate(&self) -> Result<(), PayoutError> {
        for (kind, rate) in [
            ("block", self.block_commission),
            ("epoch", self.epoch_commission),
            ("foundation", self.foundation_commission),
        ] {
            if rate > 100 {
                return Err(PayoutError::InvalidCommission(kind, rate));
            }
        }
        if self.scale == 0 {
            return Err(PayoutError::ZeroScale);
        }
        Ok(())
    }
}
