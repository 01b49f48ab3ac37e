use std::collections::HashMap;

use crate::Vector;
use crate::error::{ClassifierError, Result};

/// Dense integer codes for label strings, numbered in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelVocabulary {
    codes: HashMap<String, usize>,
    labels: Vec<String>,
}

impl LabelVocabulary {
    pub fn build<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut vocabulary = Self::default();
        for label in labels {
            let label = label.as_ref();
            if !vocabulary.codes.contains_key(label) {
                vocabulary.codes.insert(label.to_string(), vocabulary.labels.len());
                vocabulary.labels.push(label.to_string());
            }
        }
        vocabulary
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn code(&self, label: &str) -> Result<usize> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| ClassifierError::Lookup(label.to_string()))
    }

    pub fn label(&self, code: usize) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// Labels in code order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `code / K` for a known label. Never assigns new codes.
    pub fn encode(&self, label: &str) -> Result<f64> {
        if self.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "cannot encode against an empty vocabulary".to_string(),
            ));
        }
        let code = self.code(label)?;
        Ok(code as f64 / self.len() as f64)
    }
}

/// Fits a [`LabelVocabulary`] and maps labels to normalized scalar targets.
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder {
    vocabulary: Option<LabelVocabulary>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self { vocabulary: None }
    }

    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        let vocabulary = LabelVocabulary::build(labels);
        if vocabulary.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "no labels to build a vocabulary from".to_string(),
            ));
        }
        log::debug!(
            "Built vocabulary of {} classes from {} labels",
            vocabulary.len(),
            labels.len()
        );
        self.vocabulary = Some(vocabulary);
        Ok(())
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vector> {
        let vocabulary = self.vocabulary.as_ref().ok_or(ClassifierError::NotFitted)?;
        labels
            .iter()
            .map(|label| vocabulary.encode(label.as_ref()))
            .collect::<Result<Vec<f64>>>()
            .map(Vector::from)
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<Vector> {
        self.fit(labels)?;
        self.transform(labels)
    }

    pub fn vocabulary(&self) -> Option<&LabelVocabulary> {
        self.vocabulary.as_ref()
    }

    pub fn into_vocabulary(self) -> Option<LabelVocabulary> {
        self.vocabulary
    }
}
