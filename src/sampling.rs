//! Weighted sampling without replacement over integer weights.

use super::*;
use itertools::Itertools;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draws `k` distinct indices of `weights` into `out` (cleared first).
///
/// Each pick comes from the weights left after removing earlier picks. Once
/// no positive weight is left, the remaining picks are uniform.
///
/// # Example
/// ```
/// use pcg_rand::Pcg64;
/// use rand::SeedableRng;
/// use rust_compstat::sampling::sample_without_replacement;
///
/// let mut rng = Pcg64::seed_from_u64(1);
/// let mut picked = Vec::new();
/// sample_without_replacement(&mut rng, &[0, 4, 0, 1], 2, &mut picked).unwrap();
///
/// picked.sort_unstable();
/// assert_eq!(picked, vec![1, 3]);
/// ```
pub fn sample_without_replacement(
    rng: &mut impl Rng,
    weights: &[u64],
    k: usize,
    out: &mut Vec<Node>,
) -> Result<()> {
    if k > weights.len() {
        return Err(Error::invalid(
            "k",
            format!(
                "cannot draw {} distinct items out of {}",
                k,
                weights.len()
            ),
        ));
    }

    out.clear();
    if k == 0 {
        return Ok(());
    }

    match WeightedIndex::new(weights) {
        Ok(mut index) => {
            while out.len() < k {
                let pick = index.sample(rng);
                out.push(pick);

                if out.len() == k {
                    break;
                }
                match index.update_weights(&[(pick, &0)]) {
                    Ok(()) => {}
                    Err(WeightedError::AllWeightsZero) => break,
                    Err(e) => return Err(Error::invalid("weights", e.to_string())),
                }
            }
        }
        Err(WeightedError::AllWeightsZero) => {}
        Err(e) => return Err(Error::invalid("weights", e.to_string())),
    }

    if out.len() < k {
        let free = (0..weights.len()).filter(|i| !out.contains(i)).collect_vec();
        let missing = k - out.len();
        out.extend(free.choose_multiple(rng, missing).copied());
    }

    Ok(())
}
