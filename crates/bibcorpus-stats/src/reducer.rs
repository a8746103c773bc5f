//! Mean/median/mode reducers and their dispatch enum.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("cannot reduce an empty measurement sequence")]
    EmptyInput,
}

/// The fixed three-member reducer family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reducer {
    Mean,
    Median,
    Mode,
}

impl Reducer {
    pub const ALL: [Reducer; 3] = [Reducer::Mean, Reducer::Median, Reducer::Mode];

    /// Label used in averaged-report row headings ("Mean authors per publication").
    pub fn label(self) -> &'static str {
        match self {
            Reducer::Mean => "Mean",
            Reducer::Median => "Median",
            Reducer::Mode => "Mode",
        }
    }

    /// Reduce a non-empty measurement sequence.
    pub fn apply(self, values: &[u32]) -> Result<StatValue, StatsError> {
        match self {
            Reducer::Mean => mean(values).map(StatValue::Scalar),
            Reducer::Median => median(values).map(StatValue::Scalar),
            Reducer::Mode => mode(values).map(StatValue::Values),
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reducer result: a scalar for mean/median, the tied value set for mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    Scalar(f64),
    Values(Vec<u32>),
}

impl fmt::Display for StatValue {
    /// Renders with two decimals, trailing zeros trimmed ("2.50" -> "2.5",
    /// "3.00" -> "3"); mode value lists are comma-joined.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Scalar(v) => {
                let s = format!("{:.2}", v);
                f.write_str(s.trim_end_matches('0').trim_end_matches('.'))
            }
            StatValue::Values(vs) => {
                let joined: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                f.write_str(&joined.join(", "))
            }
        }
    }
}

/// Arithmetic mean.
pub fn mean(values: &[u32]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Ok(sum as f64 / values.len() as f64)
}

/// Middle-value median; the two central values are averaged for
/// even-length input.
pub fn median(values: &[u32]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0)
    } else {
        Ok(f64::from(sorted[n / 2]))
    }
}

/// All values achieving the maximum frequency, ascending.
///
/// When every distinct value occurs equally often the whole distinct
/// value set comes back — mode is a set, never a single forced pick.
pub fn mode(values: &[u32]) -> Result<Vec<u32>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut freq: BTreeMap<u32, usize> = BTreeMap::new();
    for &v in values {
        *freq.entry(v).or_insert(0) += 1;
    }
    let max = freq.values().copied().max().unwrap_or(0);
    Ok(freq
        .into_iter()
        .filter(|&(_, n)| n == max)
        .map(|(v, _)| v)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[2, 2, 3], 7.0 / 3.0; "simple mean")]
    #[test_case(&[1, 2], 1.5; "two values")]
    #[test_case(&[4], 4.0; "single value")]
    fn test_mean(values: &[u32], expected: f64) {
        assert!((mean(values).unwrap() - expected).abs() < 1e-10);
    }

    #[test_case(&[1, 3, 2], 2.0; "odd length")]
    #[test_case(&[1, 2, 3, 4], 2.5; "even length averages center pair")]
    #[test_case(&[5], 5.0; "single value")]
    fn test_median(values: &[u32], expected: f64) {
        assert!((median(values).unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_mode_single_winner() {
        assert_eq!(mode(&[2, 2, 3]).unwrap(), vec![2]);
    }

    #[test]
    fn test_mode_all_tied_returns_every_value_ascending() {
        assert_eq!(mode(&[4, 1, 3, 2]).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mode_partial_tie() {
        assert_eq!(mode(&[1, 1, 5, 5, 2]).unwrap(), vec![1, 5]);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
        assert_eq!(median(&[]), Err(StatsError::EmptyInput));
        assert_eq!(mode(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_reducer_dispatch() {
        let values = [2, 2, 3];
        assert_eq!(
            Reducer::Mean.apply(&values).unwrap(),
            StatValue::Scalar(7.0 / 3.0)
        );
        assert_eq!(
            Reducer::Mode.apply(&values).unwrap(),
            StatValue::Values(vec![2])
        );
    }

    #[test]
    fn test_stat_value_display_trims_trailing_zeros() {
        assert_eq!(StatValue::Scalar(2.5).to_string(), "2.5");
        assert_eq!(StatValue::Scalar(3.0).to_string(), "3");
        assert_eq!(StatValue::Scalar(2.333333).to_string(), "2.33");
        assert_eq!(StatValue::Values(vec![1, 2, 3]).to_string(), "1, 2, 3");
    }
}
