use super::error::*;

// Small fixed-length vector helpers used by feature extraction and scoring.

pub fn sum<const N: usize>(v: &[f64; N]) -> f64 {
    v.iter().sum()
}

// Euclidean norm
pub fn norm<const N: usize>(v: &[f64; N]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

// Divides each component by the sum of components.
pub fn normalized<const N: usize>(v: &[f64; N]) -> Result<[f64; N]> {
    let s = sum(v);
    if s == 0.0 || !s.is_finite() {
        return Err(SearchError::DegenerateVector);
    }
    Ok(v.map(|x| x / s))
}

// Divides each component by the Euclidean norm, yielding a unit vector.
pub fn unified<const N: usize>(v: &[f64; N]) -> Result<[f64; N]> {
    let n = norm(v);
    if n == 0.0 || !n.is_finite() {
        return Err(SearchError::DegenerateVector);
    }
    Ok(v.map(|x| x / n))
}

pub fn add<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    let mut res = *a;
    for i in 0..N {
        res[i] += b[i];
    }
    res
}

pub fn sub<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    let mut res = *a;
    for i in 0..N {
        res[i] -= b[i];
    }
    res
}

pub fn scale<const N: usize>(v: &[f64; N], factor: f64) -> [f64; N] {
    v.map(|x| x * factor)
}
