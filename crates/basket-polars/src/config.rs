//! Dataset column mapping

/// Names of the dataset columns holding each expense-record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub household: String,
    pub region: String,
    pub item_code: String,
    pub item_name: String,
    pub amount: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            household: "domicilio".to_string(),
            region: "uf".to_string(),
            item_code: "cod_subitem".to_string(),
            item_name: "subitem".to_string(),
            amount: "gasto".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn with_household(mut self, name: impl Into<String>) -> Self {
        self.household = name.into();
        self
    }

    pub fn with_region(mut self, name: impl Into<String>) -> Self {
        self.region = name.into();
        self
    }

    pub fn with_item_code(mut self, name: impl Into<String>) -> Self {
        self.item_code = name.into();
        self
    }

    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = name.into();
        self
    }

    pub fn with_amount(mut self, name: impl Into<String>) -> Self {
        self.amount = name.into();
        self
    }

    /// All mapped names, in record-field order
    pub fn all(&self) -> [&str; 5] {
        [
            self.household.as_str(),
            self.region.as_str(),
            self.item_code.as_str(),
            self.item_name.as_str(),
            self.amount.as_str(),
        ]
    }
}
