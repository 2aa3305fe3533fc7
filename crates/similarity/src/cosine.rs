//! Cosine similarity over dense vectors.

/// Tolerance for values that drift just past ±1.0 through rounding
pub const UNIT_RANGE_EPSILON: f64 = 1e-9;

/// Cosine similarity of two equal-length vectors.
///
/// Dot product divided by the product of the Euclidean magnitudes. Returns
/// `0.0` when either vector has zero magnitude. The result is not clamped.
pub fn cosine_similarity(v1: &[f64], v2: &[f64]) -> f64 {
    debug_assert_eq!(v1.len(), v2.len(), "cosine inputs must be paired");

    let dot_product: f64 = v1.iter().zip(v2).map(|(a, b)| a * b).sum();
    let magnitude_v1 = v1.iter().map(|a| a * a).sum::<f64>().sqrt();
    let magnitude_v2 = v2.iter().map(|b| b * b).sum::<f64>().sqrt();

    if magnitude_v1 == 0.0 || magnitude_v2 == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_v1 * magnitude_v2)
}

/// Whether a similarity lies in [-1, 1], allowing rounding overshoot
pub fn within_unit_range(value: f64) -> bool {
    (-1.0 - UNIT_RANGE_EPSILON..=1.0 + UNIT_RANGE_EPSILON).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_vector() {
        let v = [1.0, 2.0, 3.0];
        let scaled = [2.5, 5.0, 7.5];
        assert!((cosine_similarity(&v, &scaled) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn test_opposite_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector() {
        let v = [1.0, 2.0, 3.0];
        let zero = [0.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_ranking_example() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 4.0, 5.0];
        let c = [1.0, 1.0, 1.0, 1.0];

        let sim_ab = cosine_similarity(&a, &b);
        let sim_ac = cosine_similarity(&a, &c);

        assert!(0.98 < sim_ab && sim_ab < 1.0, "sim_ab = {sim_ab}");
        assert!(0.85 < sim_ac && sim_ac < 0.95, "sim_ac = {sim_ac}");
        assert!(sim_ab > sim_ac);
    }

    #[test]
    fn test_within_unit_range() {
        assert!(within_unit_range(1.0));
        assert!(within_unit_range(1.0 + 1e-12));
        assert!(within_unit_range(-1.0));
        assert!(!within_unit_range(1.01));
        assert!(!within_unit_range(f64::NAN));
    }
}
