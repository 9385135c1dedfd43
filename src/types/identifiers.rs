use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical enumeration position of an interval, 0-indexed.
///
/// Ids are assigned by start index first, then by end index, so for a
/// resolution `R` id `0` is `[0, 1/R]` and id `R - 1` is `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalId(usize);

impl IntervalId {
    pub fn new(id: usize) -> Self {
        IntervalId(id)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for IntervalId {
    fn from(id: usize) -> Self {
        IntervalId(id)
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup key fragment derived from the two fractional endpoints,
/// e.g. `"10_15"` for `[0.10, 0.15]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalLabel(String);

impl IntervalLabel {
    /// Endpoints are rounded half-up to hundredths and only the two
    /// fractional digits are kept, so `1.0` renders as `"00"`.
    pub fn from_fractions(start_fraction: f64, end_fraction: f64) -> Self {
        IntervalLabel(format!(
            "{}_{}",
            hundredths_digits(start_fraction),
            hundredths_digits(end_fraction)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

fn hundredths_digits(fraction: f64) -> String {
    // Round the shortest decimal form, not the scaled float: 0.575 * 100.0
    // is 57.49999999999999 but the label is "58".
    let decimal = format!("{}", fraction);
    let (whole, digits) = decimal.split_once('.').unwrap_or((decimal.as_str(), ""));

    let mut digits = digits.bytes().map(|b| u64::from(b.saturating_sub(b'0')));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().map_or(false, |d| d >= 5);

    let whole: u64 = whole.parse().unwrap_or(0);
    let value = whole * 100 + tenths * 10 + hundredths + u64::from(round_up);
    format!("{:02}", value % 100)
}
