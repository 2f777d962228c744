//! Local random sequence generator.
//!
//! Needs no external API. Each shot after the first is drawn from the
//! positions of its space that lie within the distance bounds of the
//! previous shot. A dead end restarts the whole sequence.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{DepthPosition, HorizontalPosition, Shot, Space};

/// Whole-sequence attempts before giving up.
pub const MAX_ATTEMPTS: usize = 10;

/// Builds a random alternating sequence of `num_shots` shots whose
/// consecutive distances lie within `[min_distance, max_distance]`.
///
/// A missing bound is unconstrained. Returns `None` when every attempt hit a
/// shot with no reachable position, which is the case for bounds no grid
/// pair can satisfy.
pub fn random_sequence<R: Rng + ?Sized>(
    num_shots: usize,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    rng: &mut R,
) -> Option<Vec<Shot>> {
    let min = min_distance.unwrap_or(0.0);
    let max = max_distance.unwrap_or(f64::INFINITY);

    (0..MAX_ATTEMPTS).find_map(|attempt| {
        let shots = attempt_sequence(num_shots, min, max, rng);
        if shots.is_none() {
            tracing::debug!(attempt, num_shots, "random sequence hit a dead end");
        }
        shots
    })
}

fn attempt_sequence<R: Rng + ?Sized>(
    num_shots: usize,
    min: f64,
    max: f64,
    rng: &mut R,
) -> Option<Vec<Shot>> {
    let mut shots: Vec<Shot> = Vec::with_capacity(num_shots);
    for index in 0..num_shots {
        let candidates = positions_in(Space::for_position(index));
        let next = match shots.last() {
            None => candidates.choose(rng).copied()?,
            Some(previous) => {
                let reachable: Vec<Shot> = candidates
                    .into_iter()
                    .filter(|c| {
                        let d = previous.distance_to(c);
                        d >= min && d <= max
                    })
                    .collect();
                reachable.choose(rng).copied()?
            }
        };
        shots.push(next);
    }
    Some(shots)
}

/// The 25 positions of one space.
fn positions_in(space: Space) -> Vec<Shot> {
    HorizontalPosition::ALL
        .into_iter()
        .flat_map(|h| {
            DepthPosition::ALL
                .into_iter()
                .map(move |d| Shot::new(h, d, space))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::domain::consecutive_distances;

    #[test]
    fn each_space_has_twenty_five_positions() {
        assert_eq!(positions_in(Space::One).len(), 25);
        assert!(positions_in(Space::Two).iter().all(|s| s.space == Space::Two));
    }

    #[test]
    fn unconstrained_sequence_alternates() {
        let mut rng = StdRng::seed_from_u64(7);
        let Some(shots) = random_sequence(9, None, None, &mut rng) else {
            panic!("unconstrained generation cannot fail");
        };
        assert_eq!(shots.len(), 9);
        for (i, shot) in shots.iter().enumerate() {
            assert_eq!(shot.space, Space::for_position(i));
        }
    }

    #[test]
    fn bounds_hold_for_every_pair() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Some(shots) = random_sequence(12, Some(5.0), Some(7.0), &mut rng) else {
                panic!("bounds 5..=7 are satisfiable");
            };
            for d in consecutive_distances(&shots) {
                assert!((5.0..=7.0).contains(&d), "distance {d} out of bounds");
            }
        }
    }

    #[test]
    fn unsatisfiable_bounds_yield_none() {
        let mut rng = StdRng::seed_from_u64(1);
        // Opposite spaces are never closer than 1 unit apart.
        assert!(random_sequence(3, None, Some(0.5), &mut rng).is_none());
        // No pair of grid points is more than about 9.9 units apart.
        assert!(random_sequence(3, Some(20.0), None, &mut rng).is_none());
    }

    #[test]
    fn single_shot_ignores_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let Some(shots) = random_sequence(1, Some(20.0), Some(0.5), &mut rng) else {
            panic!("a single shot has no pairs to check");
        };
        assert_eq!(shots.len(), 1);
        assert_eq!(shots.first().map(|s| s.space), Some(Space::One));
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = random_sequence(6, Some(1.0), Some(4.0), &mut StdRng::seed_from_u64(42));
        let b = random_sequence(6, Some(1.0), Some(4.0), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
