pub fn round_to(num: f64, num_dp: usize) -> f64 {
    let mult = 10_f64.powi(num_dp as i32);
    (num * mult).round() / mult
}
