use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortage at or above this percentage is `High`.
pub const HIGH_SHORTAGE_PERCENT: f64 = 60.0;
/// Shortage at or above this percentage is `Medium`.
pub const MEDIUM_SHORTAGE_PERCENT: f64 = 30.0;

/// Three-level classification of a shortage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Entities without a shortage value classify as `Low`.
    pub fn classify(shortage_percent: Option<f64>) -> Self {
        match shortage_percent {
            Some(p) if p >= HIGH_SHORTAGE_PERCENT => Severity::High,
            Some(p) if p >= MEDIUM_SHORTAGE_PERCENT => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(ParseError::InvalidSeverity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Severity::classify(Some(65.0)), Severity::High);
        assert_eq!(Severity::classify(Some(35.0)), Severity::Medium);
        assert_eq!(Severity::classify(Some(10.0)), Severity::Low);
        assert_eq!(Severity::classify(None), Severity::Low);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Severity::classify(Some(60.0)), Severity::High);
        assert_eq!(Severity::classify(Some(59.9)), Severity::Medium);
        assert_eq!(Severity::classify(Some(30.0)), Severity::Medium);
        assert_eq!(Severity::classify(Some(0.0)), Severity::Low);
    }

    #[test]
    fn test_parse() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("critical".parse::<Severity>().is_err());
    }
}
