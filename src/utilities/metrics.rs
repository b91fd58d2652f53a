// NaN when empty
pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

pub fn gap_percent(length: f64, reference: f64) -> f64 {
    (length - reference) * 100.0 / reference
}
