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

//! Epoch range expressions of the form `1,3-5,8`.

use crate::PayoutError;

/// Expands a comma-separated list of epoch numbers and inclusive spans.
///
/// The whole expression is validated before anything is returned, so a
/// malformed tail never produces a partial result. Epochs are kept in
/// written order and duplicates are not collapsed.
pub fn parse_epoch_ranges(expr: &str) -> Result<Vec<u64>, PayoutError> {
    let mut epochs = Vec::new();
    for term in expr.split(',') {
        match term.split_once('-') {
            Some((start, end)) => {
                let start = parse_epoch(start, term)?;
                let end = parse_epoch(end, term)?;
                if start > end {
                    return Err(PayoutError::BadEpochRange(format!(
                        "span {term:?} runs backwards"
                    )));
                }
                epochs.extend(start..=end);
            }
            None => epochs.push(parse_epoch(term, term)?),
        }
    }
    Ok(epochs)
}

fn parse_epoch(text: &str, term: &str) -> Result<u64, PayoutError> {
    text.parse().map_err(|_| {
        PayoutError::BadEpochRange(format!("{term:?} is not an epoch number or span"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_numbers_and_spans() {
        assert_eq!(parse_epoch_ranges("7").unwrap(), vec![7]);
        assert_eq!(parse_epoch_ranges("1-2,4").unwrap(), vec![1, 2, 4]);
        assert_eq!(parse_epoch_ranges("4,1-2").unwrap(), vec![4, 1, 2]);
        assert_eq!(parse_epoch_ranges("3-3").unwrap(), vec![3]);
    }

    #[test]
    fn keeps_duplicates() {
        assert_eq!(parse_epoch_ranges("4,4").unwrap(), vec![4, 4]);
        assert_eq!(parse_epoch_ranges("2-4,3").unwrap(), vec![2, 3, 4, 3]);
    }

    #[test]
    fn rejects_backwards_spans() {
        let err = parse_epoch_ranges("5-2").unwrap_err();
        assert!(err.to_string().contains("runs backwards"), "{err}");
    }

    #[test]
    fn rejects_non_numeric_terms() {
        assert!(parse_epoch_ranges("x").is_err());
        assert!(parse_epoch_ranges("1,x,3").is_err());
        assert!(parse_epoch_ranges("1- 2").is_err());
        assert!(parse_epoch_ranges("").is_err());
        assert!(parse_epoch_ranges("1,,3").is_err());
        assert!(parse_epoch_ranges("-3").is_err());
    }

    #[test]
    fn whole_expression_is_validated_up_front() {
        // The valid prefix must not leak out when the tail is malformed.
        assert!(parse_epoch_ranges("1-3,oops").is_err());
    }
}
