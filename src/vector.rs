//! Element-wise arithmetic over fixed-dimension f32 vectors.
//!
//! All binary operations assume equal-length inputs; the caller guarantees
//! this since every vector originates from one embedding table.

pub fn add(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn subtract(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn magnitude(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Scales `v` to unit length. A zero vector divides through to NaN
/// components; embedding files are assumed never to contain an all-zero row.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let mag = magnitude(v);
    v.iter().map(|x| x / mag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    fn approx_eq(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < TOL)
    }

    #[test]
    fn add_then_subtract_round_trips() {
        let a = [0.5, -1.5, 2.0];
        let b = [1.0, 0.25, -3.0];
        let sum = add(&a, &b);
        assert!(approx_eq(&subtract(&sum, &b), &a));
    }

    #[test]
    fn dot_is_symmetric() {
        let a = [0.3, 0.7, -0.2];
        let b = [1.1, -0.4, 0.9];
        assert!((dot(&a, &b) - dot(&b, &a)).abs() < TOL);
    }

    #[test]
    fn magnitude_of_unit_axis_is_one() {
        assert!((magnitude(&[0.0, 1.0, 0.0]) - 1.0).abs() < TOL);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let v = [3.0, 4.0, 0.0];
        let n = normalize(&v);
        assert!((magnitude(&n) - 1.0).abs() < TOL);
    }

    #[test]
    fn normalize_is_idempotent() {
        let v = [2.0, -5.0, 1.0];
        let once = normalize(&v);
        let twice = normalize(&once);
        assert!(approx_eq(&once, &twice));
    }
}
