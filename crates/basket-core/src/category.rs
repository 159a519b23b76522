//! Consumption categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of consumption categories
///
/// The declaration order is the canonical column order of every per-household
/// table and is used wherever a deterministic iteration order is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Housing,
    Clothing,
    Transport,
    HealthPersonalCare,
    PersonalExpenses,
    EducationLeisureCulture,
    OtherExpenses,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 8;

    /// Every category in declaration order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Food,
        Category::Housing,
        Category::Clothing,
        Category::Transport,
        Category::HealthPersonalCare,
        Category::PersonalExpenses,
        Category::EducationLeisureCulture,
        Category::OtherExpenses,
    ];

    /// Position in [`Category::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label used in output tables
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Clothing => "Clothing",
            Self::Transport => "Transport",
            Self::HealthPersonalCare => "Health & Personal Care",
            Self::PersonalExpenses => "Personal Expenses",
            Self::EducationLeisureCulture => "Education/Leisure/Culture",
            Self::OtherExpenses => "Other Expenses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
