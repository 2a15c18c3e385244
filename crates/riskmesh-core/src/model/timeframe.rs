//! Timeframe tags and the yearly-rate normalizer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;

/// Cadence an input value is expressed in. Serialized as its numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Timeframe {
    Day,
    Week,
    Month,
    Quarter,
    #[default]
    Year,
    TwoYears,
    FiveYears,
    TenYears,
}

impl Timeframe {
    /// All timeframes in tag order.
    pub const ALL: [Timeframe; 8] = [
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
        Self::TwoYears,
        Self::FiveYears,
        Self::TenYears,
    ];

    /// Numeric wire tag.
    pub fn tag(self) -> u64 {
        match self {
            Self::Day => 0,
            Self::Week => 1,
            Self::Month => 2,
            Self::Quarter => 3,
            Self::Year => 4,
            Self::TwoYears => 5,
            Self::FiveYears => 6,
            Self::TenYears => 7,
        }
    }

    /// Decode a wire tag.
    pub fn from_tag(tag: u64) -> Result<Self, EstimateError> {
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.tag() == tag)
            .ok_or(EstimateError::InvalidTimeframe { tag })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::TwoYears => "two_years",
            Self::FiveYears => "five_years",
            Self::TenYears => "ten_years",
        }
    }

    /// Rescale `value` from this cadence to a yearly rate.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::Day => value * 365.0,
            Self::Week => value * 52.0,
            Self::Month => value * 12.0,
            Self::Quarter => value * 4.0,
            Self::Year => value,
            Self::TwoYears => value / 2.0,
            Self::FiveYears => value / 5.0,
            Self::TenYears => value / 10.0,
        }
    }
}

/// Rescale `value` expressed at `timeframe` to the engine's yearly rate.
pub fn normalize(value: f64, timeframe: Timeframe) -> f64 {
    timeframe.normalize(value)
}

impl TryFrom<u64> for Timeframe {
    type Error = EstimateError;

    fn try_from(tag: u64) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl From<Timeframe> for u64 {
    fn from(tf: Timeframe) -> Self {
        tf.tag()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_table_is_exhaustive() {
        let expected = [365.0, 52.0, 12.0, 4.0, 1.0, 0.5, 0.2, 0.1];
        for (tf, factor) in Timeframe::ALL.iter().zip(expected) {
            assert!((tf.normalize(1.0) - factor).abs() < 1e-12, "{tf}");
        }
    }

    #[test]
    fn monthly_rate_becomes_yearly() {
        assert!((normalize(0.3, Timeframe::Month) - 3.6).abs() < 1e-12);
    }

    #[test]
    fn tags_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(Timeframe::from_tag(tf.tag()).unwrap(), tf);
        }
    }

    #[test]
    fn unknown_tag_is_invalid_timeframe() {
        assert_eq!(
            Timeframe::from_tag(8),
            Err(EstimateError::InvalidTimeframe { tag: 8 })
        );
        let parsed: Result<Timeframe, _> = serde_json::from_str("42");
        let message = parsed.unwrap_err().to_string();
        assert!(message.contains("InvalidTimeframe"), "{message}");
    }

    #[test]
    fn default_is_year() {
        assert_eq!(Timeframe::default(), Timeframe::Year);
    }
}
