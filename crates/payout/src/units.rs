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

//! Conversions between Rau (the minor unit) and IOTX display units.

use alloy_primitives::U256;

use crate::PayoutError;

/// Number of decimals of the IOTX token: 1 IOTX = 10^18 Rau.
pub const IOTX_DECIMALS: u32 = 18;

/// Returns the Rau value of a whole number of IOTX.
pub fn rau(iotx: u64) -> U256 {
    U256::from(iotx) * U256::from(10u64).pow(U256::from(IOTX_DECIMALS))
}

/// Parses a decimal string of Rau into a [`U256`].
pub fn parse_rau(s: &str) -> Result<U256, PayoutError> {
    U256::from_str_radix(s, 10).map_err(|e| PayoutError::BadAmount(s.into(), e.to_string()))
}

/// Formats a Rau amount in IOTX display units.
///
/// The fractional part is trimmed of trailing zeros and omitted entirely when
/// zero, so `1500000000000000000` renders as `1.5` and `10^18` as `1`.
pub fn format_rau(amount: &U256) -> String {
    let base = U256::from(10u64).pow(U256::from(IOTX_DECIMALS));
    let (whole, frac) = amount.div_rem(base);
    if frac.is_zero() {
        return whole.to_string();
    }
    let mut digits = format!("{:0>width$}", frac.to_string(), width = IOTX_DECIMALS as usize);
    while digits.ends_with('0') {
        digits.pop();
    }
    format!("{whole}.{digits}")
}

/// Serde adapter rendering a [`U256`] as a decimal string.
pub(crate) mod u256_dec {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        value.to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_str_radix(&s, 10).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_whole_amounts() {
        assert_eq!(format_rau(&U256::ZERO), "0");
        assert_eq!(format_rau(&rau(1)), "1");
        assert_eq!(format_rau(&rau(12500)), "12500");
    }

    #[test]
    fn format_fractional_amounts() {
        let one_and_a_half = rau(3) / U256::from(2);
        assert_eq!(format_rau(&one_and_a_half), "1.5");
        assert_eq!(format_rau(&U256::from(1230000000000000000u64)), "1.23");
        assert_eq!(format_rau(&U256::from(123u64)), "0.000000000000000123");
    }

    #[test]
    fn parse_decimal_strings() {
        assert_eq!(parse_rau("4001").unwrap(), U256::from(4001));
        assert_eq!(parse_rau("0").unwrap(), U256::ZERO);
        assert!(parse_rau("12a5").is_err());
        assert!(parse_rau("-1").is_err());
    }

    #[test]
    fn rau_scales_by_token_decimals() {
        assert_eq!(rau(16).to_string(), "16000000000000000000");
    }
}
