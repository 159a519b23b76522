//! Error types for consumption-basket analysis
//!
//! Provides a unified error type for all basket crates. Fatal conditions are
//! bad configuration and empty input; both carry enough context (stage,
//! counts, variant) to diagnose a data-quality problem.

use crate::types::{BasketVariant, Stage};
use thiserror::Error;

/// Core error type for basket computations
#[derive(Error, Debug)]
pub enum Error {
    /// Non-positive deflation factor, quantile outside [0, 1], and similar
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Nothing left to compute on
    #[error("Empty input at {stage} stage: {records} records, {households} households")]
    EmptyInput {
        stage: Stage,
        records: usize,
        households: usize,
    },

    /// A record that cannot take part in aggregation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Failure attributed to one basket variant
    #[error("{variant} basket failed: {source}")]
    Variant {
        variant: BasketVariant,
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a non-positive or non-finite deflation factor
    pub fn invalid_deflation(factor: f64) -> Self {
        Self::InvalidConfiguration(format!(
            "Deflation factor {factor} must be finite and positive"
        ))
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidConfiguration(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for an empty stage
    pub fn empty(stage: Stage, records: usize, households: usize) -> Self {
        Self::EmptyInput {
            stage,
            records,
            households,
        }
    }

    /// Attribute this error to a basket variant
    ///
    /// Already attributed errors are returned unchanged.
    pub fn within(self, variant: BasketVariant) -> Self {
        match self {
            Self::Variant { .. } => self,
            other => Self::Variant {
                variant,
                source: Box::new(other),
            },
        }
    }

    /// Fill in the record count of an empty-input error raised below the
    /// level where records are known
    pub fn with_record_count(self, count: usize) -> Self {
        match self {
            Self::EmptyInput {
                stage, households, ..
            } => Self::EmptyInput {
                stage,
                records: count,
                households,
            },
            Self::Variant { variant, source } => Self::Variant {
                variant,
                source: Box::new(source.with_record_count(count)),
            },
            other => other,
        }
    }

    /// The variant this error is attributed to, if any
    pub fn variant(&self) -> Option<BasketVariant> {
        match self {
            Self::Variant { variant, .. } => Some(*variant),
            _ => None,
        }
    }

    /// The stage that raised an empty-input error, looking through variant wrapping
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::EmptyInput { stage, .. } => Some(*stage),
            Self::InvalidConfiguration(_) => Some(Stage::Configuration),
            Self::Variant { source, .. } => source.stage(),
            Self::InvalidRecord(_) => None,
        }
    }
}
