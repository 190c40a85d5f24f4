//! Deterministic random rolls for chance-based effect conditions.
//!
//! Every roll is a pure function of a seed. The world derives the seed from
//! its configured base seed, a roll counter and the entities involved, so a
//! replay of the same calls yields the same outcomes.

/// Source of deterministic random numbers.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        // 24 bits fit the f32 mantissa exactly.
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns true with the given probability. Values outside `[0, 1]` clamp.
    fn chance(&self, seed: u64, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.unit(seed) < probability
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the base seed, roll counter and the two entities of an application.
pub fn compute_seed(base_seed: u64, nonce: u64, source: u32, target: u32) -> u64 {
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (source as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (target as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_roll() {
        let rng = PcgRng;
        let seed = compute_seed(42, 3, 1, 2);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
        assert_ne!(compute_seed(42, 3, 1, 2), compute_seed(42, 4, 1, 2));
    }

    #[test]
    fn chance_bounds_are_certain() {
        let rng = PcgRng;
        for nonce in 0..64 {
            let seed = compute_seed(0, nonce, 0, 0);
            assert!(rng.chance(seed, 1.0));
            assert!(!rng.chance(seed, 0.0));
            let unit = rng.unit(seed);
            assert!((0.0..1.0).contains(&unit));
        }
    }
}
