/// Quality vectors used to rank redundant records
///
/// Every element follows the lower-is-better convention. The two protection
/// ranks are kept apart from the ranking tail because the comparator treats
/// them as policy rather than as tie-breakers.
use crate::bio::sequence::{Dataset, SequenceRecord};
use crate::PruneError;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct QualityVector {
    /// 0 when the record must always be kept, otherwise 1
    pub always_keep_rank: u8,
    /// 0 when the record belongs to a key species, otherwise 1
    pub key_species_rank: u8,
    /// Caller metrics in declared order followed by `1 / length`
    pub ranking: SmallVec<[f64; 8]>,
}

impl QualityVector {
    pub fn is_always_keep(&self) -> bool {
        self.always_keep_rank == 0
    }

    pub fn is_key_species(&self) -> bool {
        self.key_species_rank == 0
    }

    pub fn inverse_length(&self) -> f64 {
        self.ranking.last().copied().unwrap_or(f64::INFINITY)
    }

    /// Full tuple `(always_keep, key_species, metrics..., inverse_length)`.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.ranking.len() + 2);
        out.push(self.always_keep_rank as f64);
        out.push(self.key_species_rank as f64);
        out.extend_from_slice(&self.ranking);
        out
    }
}

pub fn score_record(
    record: &SequenceRecord,
    metric_names: &[String],
    key_species: &HashSet<String>,
) -> Result<QualityVector, PruneError> {
    if record.is_empty() {
        return Err(PruneError::InputValidation(format!(
            "record '{}' has an empty sequence",
            record.id
        )));
    }

    let always_keep_rank = if record.is_always_keep() { 0 } else { 1 };

    let is_key = record.key_species.unwrap_or(false) || key_species.contains(&record.species);
    let key_species_rank = if is_key { 0 } else { 1 };

    let mut ranking = SmallVec::with_capacity(metric_names.len() + 1);
    for name in metric_names {
        let value = record.metrics.get(name).ok_or_else(|| {
            PruneError::InputValidation(format!(
                "record '{}' is missing quality metric '{}'",
                record.id, name
            ))
        })?;
        ranking.push(*value);
    }
    ranking.push(1.0 / record.len() as f64);

    Ok(QualityVector {
        always_keep_rank,
        key_species_rank,
        ranking,
    })
}

/// Score every record of a dataset, preserving record order.
pub fn score_dataset(
    dataset: &Dataset,
    key_species: &HashSet<String>,
) -> Result<Vec<QualityVector>, PruneError> {
    dataset
        .records
        .par_iter()
        .map(|record| score_record(record, &dataset.metric_names, key_species))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics() -> Vec<String> {
        vec!["structure".to_string(), "partial".to_string()]
    }

    fn record() -> SequenceRecord {
        SequenceRecord::new("r0", "MKLVAGHT")
            .with_species("Homo sapiens")
            .with_metric("structure", 0.0)
            .with_metric("partial", 1.0)
    }

    #[test]
    fn test_metrics_and_inverse_length() {
        let q = score_record(&record(), &metrics(), &HashSet::new()).unwrap();
        assert_eq!(q.to_vec(), vec![1.0, 1.0, 0.0, 1.0, 0.125]);
        assert_eq!(q.inverse_length(), 0.125);
    }

    #[test]
    fn test_metric_order_follows_declaration() {
        let names = vec!["partial".to_string(), "structure".to_string()];
        let q = score_record(&record(), &names, &HashSet::new()).unwrap();
        assert_eq!(q.ranking.to_vec(), vec![1.0, 0.0, 0.125]);
    }

    #[test]
    fn test_key_species_from_set() {
        let none = HashSet::new();
        assert_eq!(score_record(&record(), &metrics(), &none).unwrap().key_species_rank, 1);

        let other: HashSet<String> = ["Not a species".to_string()].into_iter().collect();
        assert_eq!(score_record(&record(), &metrics(), &other).unwrap().key_species_rank, 1);

        let human: HashSet<String> = ["Homo sapiens".to_string()].into_iter().collect();
        assert_eq!(score_record(&record(), &metrics(), &human).unwrap().key_species_rank, 0);
    }

    #[test]
    fn test_key_species_from_record_flag() {
        let q = score_record(&record().with_key_species(true), &metrics(), &HashSet::new())
            .unwrap();
        assert!(q.is_key_species());

        let q = score_record(&record().with_key_species(false), &metrics(), &HashSet::new())
            .unwrap();
        assert!(!q.is_key_species());
    }

    #[test]
    fn test_always_keep_rank() {
        let none = HashSet::new();
        assert_eq!(score_record(&record(), &metrics(), &none).unwrap().always_keep_rank, 1);
        assert_eq!(
            score_record(&record().with_always_keep(false), &metrics(), &none)
                .unwrap()
                .always_keep_rank,
            1
        );
        assert_eq!(
            score_record(&record().with_always_keep(true), &metrics(), &none)
                .unwrap()
                .always_keep_rank,
            0
        );
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = score_record(&SequenceRecord::new("e", ""), &[], &HashSet::new()).unwrap_err();
        assert!(matches!(err, PruneError::InputValidation(_)));
    }

    #[test]
    fn test_missing_metric_rejected() {
        let rec = SequenceRecord::new("r", "MKLV").with_metric("structure", 0.0);
        assert!(score_record(&rec, &metrics(), &HashSet::new()).is_err());
    }

    #[test]
    fn test_score_dataset_preserves_order() {
        let dataset = Dataset::new(vec![
            SequenceRecord::new("a", "MK"),
            SequenceRecord::new("b", "MKLV"),
        ]);
        let scores = score_dataset(&dataset, &HashSet::new()).unwrap();
        assert_eq!(scores[0].inverse_length(), 0.5);
        assert_eq!(scores[1].inverse_length(), 0.25);
    }
}
