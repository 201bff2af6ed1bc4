//! Configuration for a game session.

/// Configuration for a [`crate::GameSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Minimum similarity (0.0-1.0) for fuzzy name matches to resolve
    /// without asking.
    pub fuzzy_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fuzzy_threshold: 0.8,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the fuzzy-match threshold (clamped to 0.0-1.0).
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.fuzzy_threshold, 0.8);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default().with_seed(7).with_fuzzy_threshold(0.5);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.fuzzy_threshold, 0.5);
    }

    #[test]
    fn threshold_clamped() {
        let cfg = SessionConfig::default().with_fuzzy_threshold(7.0);
        assert_eq!(cfg.fuzzy_threshold, 1.0);
        let cfg = SessionConfig::default().with_fuzzy_threshold(-1.0);
        assert_eq!(cfg.fuzzy_threshold, 0.0);
    }
}
