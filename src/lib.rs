//! Scalar-target logistic classification.
//!
//! Classes are encoded as evenly spaced scalars in `[0, 1)`, a single sigmoid
//! output is fitted to them by per-example gradient steps, and predicted
//! scores are bucketed back into class indices for evaluation.
//!
//! ```rust
//! use scalar_logit::{evaluate, TrainConfig};
//! use ndarray::array;
//!
//! let features = array![[1.0, 1.0], [1.0, 2.0], [5.0, 5.0], [5.0, 6.0]];
//! let labels = ["x", "x", "y", "y"];
//!
//! let config = TrainConfig::default().epochs(100).seed(7);
//! let mut rng = config.rng();
//! let evaluation = evaluate(&features, &labels, &config, &mut rng).unwrap();
//! assert_eq!(evaluation.scores.len(), 4);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod linear_model;
pub mod metrics;
pub mod pipeline;
pub mod preprocessing;
pub mod report;

pub use config::{ShuffleStrategy, TrainConfig, UpdateRule, WeightInit};
pub use dataset::Dataset;
pub use error::{ClassifierError, Result};
pub use linear_model::{LogisticRegression, bucketize, sigmoid};
pub use pipeline::{evaluate, Evaluation};
pub use preprocessing::{LabelEncoder, LabelVocabulary};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
