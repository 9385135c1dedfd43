use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::Interval;
use crate::types::evaluation::IntervalResult;
use crate::types::identifiers::IntervalLabel;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No result stored for {0}")]
    Missing(String),
    #[error("Results backend error: {0}")]
    Backend(String),
}

/// Identifies the evaluation run a hierarchy is populated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultScope {
    pub dataset: String,
    pub base_classifier: String,
    pub fold: usize,
    pub split: String,
}

impl ResultScope {
    pub fn new(
        dataset: impl Into<String>,
        base_classifier: impl Into<String>,
        fold: usize,
        split: impl Into<String>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            base_classifier: base_classifier.into(),
            fold,
            split: split.into(),
        }
    }

    pub fn key_for(&self, interval: &Interval) -> ResultKey {
        ResultKey {
            dataset: self.dataset.clone(),
            base_classifier: self.base_classifier.clone(),
            fold: self.fold,
            split: self.split.clone(),
            label: interval.label().clone(),
        }
    }
}

/// Fully qualified lookup key for one interval's result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultKey {
    pub dataset: String,
    pub base_classifier: String,
    pub fold: usize,
    pub split: String,
    pub label: IntervalLabel,
}

impl ResultKey {
    /// Name of the interval-restricted classifier, `<base>_<label>`.
    pub fn classifier_name(&self) -> String {
        format!("{}_{}", self.base_classifier, self.label)
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}Fold{}",
            self.classifier_name(),
            self.dataset,
            self.split,
            self.fold
        )
    }
}

/// Narrow read interface onto wherever interval results are persisted.
pub trait ResultsProvider {
    fn fetch(&self, key: &ResultKey) -> Result<IntervalResult, ProviderError>;
}

impl<P: ResultsProvider + ?Sized> ResultsProvider for &P {
    fn fetch(&self, key: &ResultKey) -> Result<IntervalResult, ProviderError> {
        (**self).fetch(key)
    }
}

/// Map-backed provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResults {
    entries: BTreeMap<ResultKey, IntervalResult>,
}

impl InMemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResultKey, result: IntervalResult) -> Option<IntervalResult> {
        self.entries.insert(key, result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ResultKey, IntervalResult)> for InMemoryResults {
    fn from_iter<I: IntoIterator<Item = (ResultKey, IntervalResult)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ResultsProvider for InMemoryResults {
    fn fetch(&self, key: &ResultKey) -> Result<IntervalResult, ProviderError> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| ProviderError::Missing(key.to_string()))
    }
}
