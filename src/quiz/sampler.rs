use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("not enough candidates: requested {requested}, eligible {eligible}")]
    NotEnoughCandidates { requested: usize, eligible: usize },
}

/// Pick `count` distinct indices in `0..max_exclusive`, uniformly, skipping
/// anything in `exclude`.
pub fn pick_unique_indices<R: Rng + ?Sized>(
    max_exclusive: usize,
    count: usize,
    exclude: &HashSet<usize>,
    rng: &mut R,
) -> Result<Vec<usize>, SampleError> {
    let excluded_in_range = exclude.iter().filter(|&&i| i < max_exclusive).count();
    let eligible = max_exclusive - excluded_in_range;
    if count > eligible {
        return Err(SampleError::NotEnoughCandidates {
            requested: count,
            eligible,
        });
    }

    let mut picked = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    while picked.len() < count {
        let idx = rng.random_range(0..max_exclusive);
        if exclude.contains(&idx) || !seen.insert(idx) {
            continue;
        }
        picked.push(idx);
    }
    Ok(picked)
}

/// Roulette-wheel selection of `count` distinct indices without replacement.
/// Indices with non-positive weight are never eligible. Each draw removes the
/// winner from the wheel, so the remaining weights renormalize implicitly.
pub fn weighted_pick_unique_indices<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, SampleError> {
    let mut wheel: Vec<(usize, f64)> = weights
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w > 0.0 && w.is_finite())
        .map(|(i, &w)| (i, w))
        .collect();

    if count > wheel.len() {
        return Err(SampleError::NotEnoughCandidates {
            requested: count,
            eligible: wheel.len(),
        });
    }

    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let total: f64 = wheel.iter().map(|(_, w)| w).sum();
        let mut target = rng.random::<f64>() * total;
        let mut winner = wheel.len() - 1;
        for (pos, (_, w)) in wheel.iter().enumerate() {
            target -= w;
            if target < 0.0 {
                winner = pos;
                break;
            }
        }
        let (idx, _) = wheel.swap_remove(winner);
        picked.push(idx);
    }
    Ok(picked)
}
