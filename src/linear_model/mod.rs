//! Linear models over scalar class targets.
//!
//! - `LogisticRegression`: a single sigmoid output fitted by per-example
//!   gradient steps to targets in `[0, 1]`
//! - `bucketize`: maps a score (or a normalized target) back to a class index
//!
//! # Examples
//!
//! ```rust
//! use scalar_logit::{bucketize, Dataset, LogisticRegression, WeightInit};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![0.0, 0.0, 0.5, 0.5];
//! let dataset = Dataset::new(x.clone(), y).unwrap();
//!
//! let mut model = LogisticRegression::with_params(0.5, 2000, true)
//!     .weight_init(WeightInit::Zeros);
//! model.fit(&dataset, &mut StdRng::seed_from_u64(0)).unwrap();
//!
//! let scores = model.predict_proba(&x).unwrap();
//! let classes: Vec<i64> = scores.iter().map(|&s| bucketize(s, 2)).collect();
//! assert_eq!(classes[0], 0);
//! ```

mod decision;
mod logistic_regression;

pub use decision::{bucketize, class_index};
pub use logistic_regression::{LogisticRegression, initialize_weights, sigmoid};
