use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::options::{LevelPolicy, Options};

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Level Generator
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high levels with a
/// certain probability as determined by a `LevelGenerator`.
///
/// The `total()` reflects the total number of levels, and `random()` should produce the number of
/// levels a new node occupies, in the range `[1, total]`.
///
/// The most commonly used probability distribution is a geometrical distribution, whereby the
/// chance that a node occupies level `n` is `p` times as likely as occupying level `n-1`.
/// Typically, `p` is equal to 1/2, though other values can be used which will trade speed against
/// memory.
pub trait LevelGenerator {
    fn random(&mut self) -> usize;
    fn total(&self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: StdRng,
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels, and `p` as the
    /// probability that a given node is present in the next level.
    ///
    /// A `seed` makes the sequence of levels reproducible; without one the generator is seeded
    /// from the operating system.
    pub fn new(total: usize, p: f64, seed: Option<u64>) -> Result<Self> {
        if total == 0 {
            return Err(Error::InvalidArgument("total must be non-zero".to_owned()));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidArgument(format!("p must be in (0, 1), got {}", p)));
        }
        Ok(GeometricalLevelGenerator {
            total,
            p,
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        })
    }
}

impl Default for GeometricalLevelGenerator {
    /// 32 levels with a promotion chance of 1/2, seeded from the operating system.
    fn default() -> Self {
        GeometricalLevelGenerator {
            total: 32,
            p: 0.5,
            rng: StdRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 1;
        while h < self.total && self.rng.gen::<f64>() < self.p {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}

/// Delegates every draw to a user supplied policy, clamping its answer to `[1, total]`.
pub struct PolicyLevelGenerator {
    total: usize,
    policy: LevelPolicy,
    options: Options,
}

impl PolicyLevelGenerator {
    pub fn new(options: Options, policy: LevelPolicy) -> Self {
        PolicyLevelGenerator {
            total: options.max_level,
            policy,
            options,
        }
    }
}

impl LevelGenerator for PolicyLevelGenerator {
    fn random(&mut self) -> usize {
        (self.policy)(&self.options).max(1).min(self.total)
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{GeometricalLevelGenerator, LevelGenerator, PolicyLevelGenerator};
    use crate::options::Options;

    #[test]
    fn geometric_bounds() {
        let mut lg = GeometricalLevelGenerator::new(8, 0.5, Some(1)).unwrap();
        for _ in 0..10_000 {
            let level = lg.random();
            assert!(level >= 1 && level <= 8);
        }
        assert_eq!(lg.total(), 8);
    }

    #[test]
    fn geometric_distribution() {
        let mut lg = GeometricalLevelGenerator::new(32, 0.5, Some(7)).unwrap();
        let n = 100_000;
        let mut counts = vec![0usize; 33];
        for _ in 0..n {
            counts[lg.random()] += 1;
        }
        // roughly half of the nodes stay at a single level, a quarter reach two
        assert!(counts[1] > n * 45 / 100 && counts[1] < n * 55 / 100);
        assert!(counts[2] > n * 20 / 100 && counts[2] < n * 30 / 100);
    }

    #[test]
    fn geometric_seeded_is_reproducible() {
        let mut a = GeometricalLevelGenerator::new(16, 0.5, Some(42)).unwrap();
        let mut b = GeometricalLevelGenerator::new(16, 0.5, Some(42)).unwrap();
        let la = (0..100).map(|_| a.random()).collect::<Vec<_>>();
        let lb = (0..100).map(|_| b.random()).collect::<Vec<_>>();
        assert_eq!(la, lb);
    }

    #[test]
    fn geometric_single_level() {
        let mut lg = GeometricalLevelGenerator::new(1, 0.9, None).unwrap();
        assert!((0..100).all(|_| lg.random() == 1));
    }

    #[test]
    fn geometric_rejects_bad_arguments() {
        assert!(GeometricalLevelGenerator::new(0, 0.5, None).is_err());
        assert!(GeometricalLevelGenerator::new(4, 0.0, None).is_err());
        assert!(GeometricalLevelGenerator::new(4, 1.0, None).is_err());
        assert!(GeometricalLevelGenerator::new(4, std::f64::NAN, None).is_err());
    }

    #[test]
    fn policy_is_clamped() {
        let mut options = Options::default();
        options.max_level = 4;
        let mut high = PolicyLevelGenerator::new(options.clone(), Arc::new(|_: &Options| 100));
        assert_eq!(high.random(), 4);
        let mut low = PolicyLevelGenerator::new(options.clone(), Arc::new(|_: &Options| 0));
        assert_eq!(low.random(), 1);
        let mut seen = PolicyLevelGenerator::new(options, Arc::new(|o: &Options| o.max_level - 1));
        assert_eq!(seen.random(), 3);
    }
}
