//! Utility functions for working with data slices

/// Sort data and return a new vector
///
/// Uses IEEE total ordering, so NaN values sort after every number.
///
/// # Examples
///
/// ```rust
/// use basket_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Sum that does not depend on the order of `data`
///
/// Values are summed in ascending order, so any permutation of the same
/// values produces a bit-identical result.
///
/// # Examples
///
/// ```rust
/// use basket_core::utils::ordered_sum;
///
/// assert_eq!(ordered_sum(&[0.1, 0.2, 0.3]), ordered_sum(&[0.3, 0.1, 0.2]));
/// ```
pub fn ordered_sum(data: &[f64]) -> f64 {
    sorted(data).iter().sum()
}

/// Calculate the mean of a slice, independent of element order
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use basket_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    ordered_sum(data) / data.len() as f64
}

/// `numerator / denominator`, or 0.0 when the denominator is zero
pub fn share(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
