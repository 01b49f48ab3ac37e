use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("{context}: expected length {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("label {0:?} is not in the vocabulary")]
    Lookup(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("model not fitted. Call fit() first.")]
    NotFitted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub(crate) fn mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        ClassifierError::DimensionMismatch {
            context,
            expected,
            found,
        }
    }
}
