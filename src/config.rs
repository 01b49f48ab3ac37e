use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{ClassifierError, Result};

/// How the per-example gradient step is applied to the weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateRule {
    /// Add the scaled feature vector once per example.
    #[default]
    Once,
    /// Add the scaled feature vector once per feature dimension, i.e. a step
    /// D times larger. Reproduces the historical reference outputs.
    PerDimension,
}

/// Initial weight draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WeightInit {
    /// Uniform on `[-D/4, D/4]` for D trained weights.
    #[default]
    HalfDimension,
    /// Uniform on `[-h, h]`.
    Symmetric(f64),
    Zeros,
}

/// Post-training permutation of the evaluation set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShuffleStrategy {
    /// Swap each index `i` with any index in `[0, N)`. Not uniform over
    /// permutations, kept for parity with reference runs.
    #[default]
    SwapAny,
    /// Swap each index `i` with an index in `[i, N)`.
    FisherYates,
}

#[derive(Clone, Debug)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub fit_intercept: bool,
    pub update_rule: UpdateRule,
    pub weight_init: WeightInit,
    pub shuffle: ShuffleStrategy,
    pub seed: Option<u64>,
    /// Epoch interval for debug-level progress logs; 0 disables them.
    pub log_every: usize,
}

impl TrainConfig {
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn update_rule(mut self, update_rule: UpdateRule) -> Self {
        self.update_rule = update_rule;
        self
    }

    pub fn weight_init(mut self, weight_init: WeightInit) -> Self {
        self.weight_init = weight_init;
        self
    }

    pub fn shuffle(mut self, shuffle: ShuffleStrategy) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::InvalidInput(format!(
                "learning rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if let WeightInit::Symmetric(h) = self.weight_init {
            if !h.is_finite() || h < 0.0 {
                return Err(ClassifierError::InvalidInput(format!(
                    "symmetric init bound must be finite and non-negative, got {}",
                    h
                )));
            }
        }
        Ok(())
    }

    /// Random source for initialisation and shuffling. Seeded runs are
    /// reproducible; unseeded runs draw from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 5000,
            fit_intercept: false,
            update_rule: UpdateRule::default(),
            weight_init: WeightInit::default(),
            shuffle: ShuffleStrategy::default(),
            seed: None,
            log_every: 500,
        }
    }
}

impl FromStr for UpdateRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "once" => Ok(UpdateRule::Once),
            "per-dimension" | "per_dimension" => Ok(UpdateRule::PerDimension),
            _ => Err(format!(
                "Unknown update rule: {}. Must be 'once' or 'per-dimension'",
                s
            )),
        }
    }
}

impl FromStr for WeightInit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half-dimension" | "half_dimension" => Ok(WeightInit::HalfDimension),
            "zeros" => Ok(WeightInit::Zeros),
            other => other
                .parse::<f64>()
                .map(WeightInit::Symmetric)
                .map_err(|_| {
                    format!(
                        "Unknown weight init: {}. Must be 'half-dimension', 'zeros' or a bound",
                        s
                    )
                }),
        }
    }
}

impl FromStr for ShuffleStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "swap-any" | "swap_any" => Ok(ShuffleStrategy::SwapAny),
            "fisher-yates" | "fisher_yates" => Ok(ShuffleStrategy::FisherYates),
            _ => Err(format!(
                "Unknown shuffle strategy: {}. Must be 'swap-any' or 'fisher-yates'",
                s
            )),
        }
    }
}
