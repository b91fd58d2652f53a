use rand::prelude::*;

/**
 * Draws one candidate from an ordered list of (candidate, weight) pairs with probability
 * proportional to its weight.
 *
 * A single uniform draw in [0, total) is walked along the cumulative weights, so the
 * same random stream always produces the same choice for the same list. Weights are
 * divided by the largest one first, so very large weights cannot overflow the total.
 * When no weight carries any mass (all zero) every candidate is treated as equally likely.
 */
pub fn sample_weighted<T: Copy, R: Rng + ?Sized>(candidates: &[(T, f64)], rng: &mut R) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }

    let max_weight = candidates
        .iter()
        .map(|&(_, weight)| weight)
        .fold(0.0, f64::max);

    if !(max_weight > 0.0) || !max_weight.is_finite() {
        return sample_uniform(candidates, rng);
    }

    // Every scaled weight is at most 1, so the total is bounded by the candidate count
    let total: f64 = candidates
        .iter()
        .map(|&(_, weight)| weight / max_weight)
        .sum();

    let target = rng.gen::<f64>() * total;

    let mut cumulative = 0.0;
    for &(candidate, weight) in candidates {
        cumulative += weight / max_weight;

        if target < cumulative {
            return Some(candidate);
        }
    }

    // Rounding can leave the target at the very top of the range
    candidates
        .iter()
        .rev()
        .find(|&&(_, weight)| weight > 0.0)
        .map(|&(candidate, _)| candidate)
}

pub fn sample_uniform<T: Copy, R: Rng + ?Sized>(candidates: &[(T, f64)], rng: &mut R) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }

    let idx = rng.gen_range(0, candidates.len());
    Some(candidates[idx].0)
}
