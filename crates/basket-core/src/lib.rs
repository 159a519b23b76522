//! Core types for household consumption-basket analysis
//!
//! This crate holds the data model shared by the rest of the workspace:
//!
//! - [`ExpenseRecord`]: one observed expense line
//! - [`Category`]: the closed set of consumption categories, and the
//!   [`classify`] function mapping item codes onto it
//! - [`aggregate`]: long-to-wide aggregation into one [`HouseholdAggregate`]
//!   per household
//! - [`ExclusionSet`]: item codes removed to build the refined basket
//! - [`Error`]: the error taxonomy used across every stage
//!
//! # Example
//!
//! ```rust
//! use basket_core::{aggregate, Category, ExpenseRecord};
//!
//! let records = vec![
//!     ExpenseRecord::new("h1", 26, 1_100_101, "Rice", 12.0),
//!     ExpenseRecord::new("h1", 26, 5_101_001, "Bus fare", 4.0),
//!     ExpenseRecord::new("h2", 26, 1_100_101, "Rice", 9.0),
//! ];
//!
//! let table = aggregate(&records).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.households()[0].amounts.get(Category::Transport), 4.0);
//! ```

pub mod aggregate;
pub mod category;
pub mod classifier;
pub mod error;
pub mod exclusion;
pub mod record;
pub mod types;
pub mod utils;

pub use aggregate::{aggregate, CategoryAmounts, HouseholdAggregate, HouseholdTable};
pub use category::Category;
pub use classifier::{classify, ClassificationRule, CLASSIFICATION_RULES};
pub use error::{Error, Result};
pub use exclusion::ExclusionSet;
pub use record::{filter_region, ExpenseRecord};
pub use types::{BasketVariant, Stage};
