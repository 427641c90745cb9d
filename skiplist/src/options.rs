use std::fmt;
use std::sync::Arc;

use config::Config;
use logger::Logger;

use crate::error::{Error, Result};
use crate::level_generator::{GeometricalLevelGenerator, LevelGenerator, PolicyLevelGenerator};

/// Replaces the geometric level draw. The answer is clamped to `[1, max_level]`.
pub type LevelPolicy = Arc<dyn Fn(&Options) -> usize + Send + Sync>;

/// Construction time settings of a `RankedSkipList`.
#[derive(Clone)]
pub struct Options {
    /// Upper bound on the level of any node. The sentinels always hold this many levels.
    pub max_level: usize,
    /// Chance that a node reaching level `n` also reaches level `n + 1`.
    pub probability: f64,
    /// Seeds the level generator. `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub level_policy: Option<LevelPolicy>,
    pub logger: Option<Logger>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: 32,
            probability: 0.5,
            seed: None,
            level_policy: None,
            logger: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds engine options out of a parsed configuration file. The list logs through the
    /// configuration's logger.
    pub fn from_config(config: &Config) -> Self {
        Options {
            max_level: config.max_level,
            probability: config.level_probability,
            seed: config.seed,
            level_policy: None,
            logger: Some(config.logger.clone()),
        }
    }

    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn level_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&Options) -> usize + Send + Sync + 'static,
    {
        self.level_policy = Some(Arc::new(policy));
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 {
            return Err(Error::InvalidArgument("max_level must be positive".to_owned()));
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidArgument(format!(
                "probability must be in (0, 1), got {}",
                self.probability
            )));
        }
        Ok(())
    }

    pub(crate) fn level_generator(&self) -> Result<Box<dyn LevelGenerator + Send + Sync>> {
        self.validate()?;
        Ok(match self.level_policy {
            Some(ref policy) => Box::new(PolicyLevelGenerator::new(self.clone(), policy.clone())),
            None => Box::new(GeometricalLevelGenerator::new(
                self.max_level,
                self.probability,
                self.seed,
            )?),
        })
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Options")
            .field("max_level", &self.max_level)
            .field("probability", &self.probability)
            .field("seed", &self.seed)
            .field("level_policy", &self.level_policy.is_some())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use config::Config;
    use logger::{Level, Logger};

    use super::Options;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.max_level, 32);
        assert_eq!(options.probability, 0.5);
        assert!(options.seed.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn invalid() {
        assert!(Options::new().max_level(0).validate().is_err());
        assert!(Options::new().probability(1.0).validate().is_err());
        assert!(Options::new().probability(-0.5).validate().is_err());
        assert!(Options::new().max_level(0).level_generator().is_err());
    }

    #[test]
    fn builder() {
        let options = Options::new().max_level(4).probability(0.25).seed(9).level_policy(|_| 2);
        assert_eq!(options.max_level, 4);
        assert_eq!(options.probability, 0.25);
        assert_eq!(options.seed, Some(9));
        let mut generator = options.level_generator().unwrap();
        assert_eq!(generator.random(), 2);
        assert_eq!(generator.total(), 4);
    }

    #[test]
    fn from_config() {
        let mut config = Config::new(Logger::new(Level::Warning));
        config.max_level = 12;
        config.level_probability = 0.25;
        config.seed = Some(3);
        let options = Options::from_config(&config);
        assert_eq!(options.max_level, 12);
        assert_eq!(options.probability, 0.25);
        assert_eq!(options.seed, Some(3));
        assert!(options.logger.is_some());
    }
}
