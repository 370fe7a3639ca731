use crate::PruneError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
    pub species: String,
    pub always_keep: Option<bool>,
    /// Record-level key species flag, independent of any caller-supplied set
    pub key_species: Option<bool>,
    pub keep: bool,
    pub metrics: IndexMap<String, f64>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            species: String::new(),
            always_keep: None,
            key_species: None,
            keep: true,
            metrics: IndexMap::new(),
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_always_keep(mut self, always_keep: bool) -> Self {
        self.always_keep = Some(always_keep);
        self
    }

    pub fn with_key_species(mut self, key_species: bool) -> Self {
        self.key_species = Some(key_species);
        self
    }

    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_always_keep(&self) -> bool {
        self.always_keep.unwrap_or(false)
    }
}

/// An ordered collection of records plus the metric names used to rank them.
///
/// Metric order is significant: the first metric is the most important
/// tie-breaker between redundant records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<SequenceRecord>,
    pub metric_names: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<SequenceRecord>) -> Self {
        Self {
            records,
            metric_names: Vec::new(),
        }
    }

    pub fn with_metric_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metric_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn kept_count(&self) -> usize {
        self.records.iter().filter(|r| r.keep).count()
    }

    pub fn keep_flags(&self) -> Vec<bool> {
        self.records.iter().map(|r| r.keep).collect()
    }

    /// Check every record has a sequence and every declared metric as a
    /// finite number.
    pub fn validate(&self) -> Result<(), PruneError> {
        for (idx, name) in self.metric_names.iter().enumerate() {
            if self.metric_names[..idx].contains(name) {
                return Err(PruneError::InputValidation(format!(
                    "metric '{}' declared more than once",
                    name
                )));
            }
        }

        for (row, record) in self.records.iter().enumerate() {
            if record.is_empty() {
                return Err(PruneError::InputValidation(format!(
                    "record {} ('{}') has an empty sequence",
                    row, record.id
                )));
            }

            for name in &self.metric_names {
                match record.metrics.get(name) {
                    None => {
                        return Err(PruneError::InputValidation(format!(
                            "record {} ('{}') is missing quality metric '{}'",
                            row, record.id, name
                        )))
                    }
                    Some(value) if !value.is_finite() => {
                        return Err(PruneError::InputValidation(format!(
                            "record {} ('{}') has non-finite value {} for metric '{}'",
                            row, record.id, value, name
                        )))
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    /// Copy of this dataset with the keep column replaced.
    pub fn with_keep_flags(&self, flags: &[bool]) -> Result<Dataset, PruneError> {
        if flags.len() != self.records.len() {
            return Err(PruneError::InputValidation(format!(
                "expected {} keep flags, got {}",
                self.records.len(),
                flags.len()
            )));
        }

        let mut out = self.clone();
        for (record, &keep) in out.records.iter_mut().zip(flags) {
            record.keep = keep;
        }
        Ok(out)
    }
}
