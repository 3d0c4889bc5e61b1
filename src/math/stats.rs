//! Scalar and per-axis summary statistics used by the outlier filters.
//!
//! All reductions are explicit loops over slices; `std` is the population
//! standard deviation (divide by N, not N-1).

use super::Vec3;

/// Arithmetic mean of a slice. Returns 0.0 for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population standard deviation of a slice. Returns 0.0 for an empty slice.
pub fn std(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32;
    var.sqrt()
}

/// Mean and population standard deviation in one pass over the slice.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    (mean(values), std(values))
}

/// Per-axis mean and standard deviation over a point set.
///
/// Equivalent to reducing an N×3 matrix along its first dimension: the
/// returned vectors hold one mean and one std per coordinate axis.
pub fn axis_mean_std(points: &[Vec3]) -> (Vec3, Vec3) {
    let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
    let zs: Vec<f32> = points.iter().map(|p| p.z).collect();

    let mean = Vec3::new(mean(&xs), mean(&ys), mean(&zs));
    let std = Vec3::new(std(&xs), std(&ys), std(&zs));
    (mean, std)
}

/// The z-score threshold test: `|value - mean| < k * std`.
pub fn within(value: f32, mean: f32, std: f32, k: f32) -> bool {
    (value - mean).abs() < k * std
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 0.0001);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_std_population() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std(&values) - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_std_constant_values() {
        assert_eq!(std(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_axis_mean_std() {
        let points = [
            Vec3::new(0.0, 10.0, -1.0),
            Vec3::new(2.0, 10.0, 1.0),
            Vec3::new(4.0, 10.0, 0.0),
        ];
        let (m, s) = axis_mean_std(&points);
        assert!((m.x - 2.0).abs() < 0.0001);
        assert!((m.y - 10.0).abs() < 0.0001);
        assert!(m.z.abs() < 0.0001);
        // x values are a uniform grid {0, 2, 4}: std = sqrt(8/3)
        assert!((s.x - (8.0f32 / 3.0).sqrt()).abs() < 0.0001);
        assert_eq!(s.y, 0.0);
    }

    #[test]
    fn test_within_threshold() {
        assert!(within(5.0, 4.0, 1.0, 2.0));
        assert!(!within(7.0, 4.0, 1.0, 2.0));
        // Strict comparison: a value exactly at k*std is rejected
        assert!(!within(6.0, 4.0, 1.0, 2.0));
    }
}
