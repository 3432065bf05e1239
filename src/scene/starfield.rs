//! Procedural star field: a fixed-size cloud of random points surrounding the
//! scene, generated once at startup and immutable thereafter.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::scene::mesh::PositionVertex;

/// Generate `count` star positions, each component independently uniform in
/// `[-spread/2, spread/2)`. Deterministic for a given seed.
pub fn star_positions(seed: u64, count: usize, spread: f32) -> Vec<PositionVertex> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| PositionVertex {
            position: [
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn generates_exactly_the_configured_count() {
        let stars = star_positions(config::STAR_SEED, config::STAR_COUNT, config::STAR_SPREAD);
        assert_eq!(stars.len(), config::STAR_COUNT);
    }

    #[test]
    fn components_stay_within_half_spread() {
        let stars = star_positions(config::STAR_SEED, config::STAR_COUNT, config::STAR_SPREAD);
        let half = config::STAR_SPREAD / 2.0;
        for (i, star) in stars.iter().enumerate() {
            for (axis, &value) in star.position.iter().enumerate() {
                assert!(
                    (-half..half).contains(&value),
                    "star {i} axis {axis} = {value} escapes [{}, {})",
                    -half,
                    half
                );
            }
        }
    }

    #[test]
    fn same_seed_produces_same_field() {
        let a = star_positions(123, 1000, config::STAR_SPREAD);
        let b = star_positions(123, 1000, config::STAR_SPREAD);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_produce_different_fields() {
        let a = star_positions(1, 1000, config::STAR_SPREAD);
        let b = star_positions(9999, 1000, config::STAR_SPREAD);
        let differing = a
            .iter()
            .zip(b.iter())
            .filter(|(x, y)| x.position != y.position)
            .count();
        assert!(
            differing > 500,
            "expected most stars to differ between seeds, only {differing}/1000 did"
        );
    }

    #[test]
    fn distribution_covers_all_octants() {
        let stars = star_positions(config::STAR_SEED, config::STAR_COUNT, config::STAR_SPREAD);
        let mut octant_counts = [0u32; 8];
        for star in &stars {
            let [x, y, z] = star.position;
            let octant = ((x >= 0.0) as usize)
                | (((y >= 0.0) as usize) << 1)
                | (((z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (300..=900).contains(&count),
                "octant {i} has {count} stars, expected roughly 625"
            );
        }
    }
}
