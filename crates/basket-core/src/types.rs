//! Identifiers for basket variants and pipeline stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which item set a basket computation runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasketVariant {
    /// Every observed item
    Raw,
    /// Observed items minus the exclusion set
    Refined,
}

impl BasketVariant {
    /// Both variants, in reporting order
    pub const ALL: [BasketVariant; 2] = [BasketVariant::Raw, BasketVariant::Refined];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Refined => "refined",
        }
    }
}

impl fmt::Display for BasketVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pipeline stage, used to locate failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Configuration,
    RegionFilter,
    Exclusion,
    Aggregation,
    Deflation,
    OutlierFilter,
    Quantile,
    Sensitivity,
    Composition,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::RegionFilter => "region filter",
            Self::Exclusion => "exclusion",
            Self::Aggregation => "aggregation",
            Self::Deflation => "deflation",
            Self::OutlierFilter => "outlier filter",
            Self::Quantile => "quantile",
            Self::Sensitivity => "sensitivity",
            Self::Composition => "composition",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
