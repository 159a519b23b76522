//! Item-code classification
//!
//! An item code's category is decided by its leading two digits
//! (`code div 100000`), matched against an ordered table of inclusive
//! ranges. The first matching rule wins and anything unmatched falls back to
//! [`Category::OtherExpenses`], so classification is total.

use crate::category::Category;

/// Divisor isolating the two-digit group prefix of a seven-digit item code
pub const PREFIX_DIVISOR: i64 = 100_000;

/// Inclusive prefix range mapped to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub first: i64,
    pub last: i64,
    pub category: Category,
}

impl ClassificationRule {
    const fn new(first: i64, last: i64, category: Category) -> Self {
        Self {
            first,
            last,
            category,
        }
    }

    /// Whether `prefix` falls inside this rule's range
    pub fn matches(&self, prefix: i64) -> bool {
        (self.first..=self.last).contains(&prefix)
    }
}

/// Ordered classification table
pub const CLASSIFICATION_RULES: [ClassificationRule; 10] = [
    ClassificationRule::new(11, 12, Category::Food),
    ClassificationRule::new(21, 23, Category::Housing),
    ClassificationRule::new(31, 33, Category::Housing),
    ClassificationRule::new(41, 44, Category::Clothing),
    ClassificationRule::new(51, 51, Category::Transport),
    ClassificationRule::new(61, 63, Category::HealthPersonalCare),
    ClassificationRule::new(71, 71, Category::PersonalExpenses),
    ClassificationRule::new(72, 72, Category::EducationLeisureCulture),
    ClassificationRule::new(81, 81, Category::EducationLeisureCulture),
    ClassificationRule::new(91, 91, Category::OtherExpenses),
];

/// Two-digit group prefix of an item code (floor division)
pub fn prefix(item_code: i64) -> i64 {
    item_code.div_euclid(PREFIX_DIVISOR)
}

/// Map an item code to its consumption category
pub fn classify(item_code: i64) -> Category {
    let prefix = prefix(item_code);
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(prefix))
        .map(|rule| rule.category)
        .unwrap_or(Category::OtherExpenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_range_table() {
        assert_eq!(classify(1_100_101), Category::Food);
        assert_eq!(classify(1_201_009), Category::Food);
        assert_eq!(classify(2_103_039), Category::Housing);
        assert_eq!(classify(3_101_002), Category::Housing);
        assert_eq!(classify(3_301_022), Category::Housing);
        assert_eq!(classify(4_301_002), Category::Clothing);
        assert_eq!(classify(5_102_053), Category::Transport);
        assert_eq!(classify(6_202_004), Category::HealthPersonalCare);
        assert_eq!(classify(7_101_034), Category::PersonalExpenses);
        assert_eq!(classify(7_201_010), Category::EducationLeisureCulture);
        assert_eq!(classify(8_101_001), Category::EducationLeisureCulture);
        assert_eq!(classify(9_101_001), Category::OtherExpenses);
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(classify(1_099_999), Category::OtherExpenses); // prefix 10
        assert_eq!(classify(1_100_000), Category::Food);
        assert_eq!(classify(1_299_999), Category::Food);
        assert_eq!(classify(1_300_000), Category::OtherExpenses);
        assert_eq!(classify(2_400_000), Category::OtherExpenses);
        assert_eq!(classify(4_499_999), Category::Clothing);
        assert_eq!(classify(5_200_000), Category::OtherExpenses);
    }

    #[test]
    fn test_unknown_codes_default_to_other() {
        assert_eq!(classify(0), Category::OtherExpenses);
        assert_eq!(classify(-1), Category::OtherExpenses);
        assert_eq!(classify(99_999_999), Category::OtherExpenses);
        assert_eq!(classify(i64::MIN), Category::OtherExpenses);
        assert_eq!(classify(i64::MAX), Category::OtherExpenses);
    }

    #[test]
    fn test_prefix_uses_floor_division() {
        assert_eq!(prefix(1_234_567), 12);
        assert_eq!(prefix(-1), -1);
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(code in any::<i64>()) {
            prop_assert_eq!(classify(code), classify(code));
        }

        #[test]
        fn prop_first_rule_wins(code in 0i64..10_000_000) {
            let expected = CLASSIFICATION_RULES
                .iter()
                .find(|rule| rule.matches(code / PREFIX_DIVISOR))
                .map(|rule| rule.category)
                .unwrap_or(Category::OtherExpenses);
            prop_assert_eq!(classify(code), expected);
        }
    }
}
