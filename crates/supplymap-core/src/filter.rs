use crate::{CategoryId, ParseError, Severity};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category predicate for the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, category_id: CategoryId) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => *id == category_id,
        }
    }
}

impl From<Option<CategoryId>> for CategoryFilter {
    fn from(value: Option<CategoryId>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// Severity predicate, only meaningful on the products map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn matches(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(wanted) => *wanted == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SeverityFilter::All);
        }
        s.parse::<Severity>().map(SeverityFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        assert!(CategoryFilter::All.matches(CategoryId(3)));
        assert!(CategoryFilter::Only(CategoryId(3)).matches(CategoryId(3)));
        assert!(!CategoryFilter::Only(CategoryId(3)).matches(CategoryId(1)));
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
    }

    #[test]
    fn test_severity_filter_parse() {
        assert_eq!("all".parse::<SeverityFilter>().unwrap(), SeverityFilter::All);
        assert_eq!(
            "medium".parse::<SeverityFilter>().unwrap(),
            SeverityFilter::Only(Severity::Medium)
        );
        assert!("none".parse::<SeverityFilter>().is_err());
    }
}
