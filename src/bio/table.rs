/// CSV ingestion and emission of annotated sequence tables
///
/// The table keeps every column it was read with so that the written output
/// is the input with only the `keep` column changed.
use crate::bio::sequence::{Dataset, SequenceRecord};
use crate::PruneError;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const SEQUENCE_COLUMN: &str = "sequence";
pub const SPECIES_COLUMN: &str = "species";
pub const KEEP_COLUMN: &str = "keep";
pub const ALWAYS_KEEP_COLUMN: &str = "always_keep";
pub const KEY_SPECIES_COLUMN: &str = "key_species";

/// Columns searched, in order, for a record identifier.
pub const ID_COLUMNS: &[&str] = &["uid", "name", "id"];

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SequenceTable {
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, PruneError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PruneError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.is_empty() {
            return Err(PruneError::InputValidation("table has no columns".to_string()));
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "read sequence table");
        Ok(Self { headers, rows })
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), PruneError> {
        let file = File::create(path.as_ref())?;
        self.to_writer(file)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), PruneError> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a validated dataset, reading `metric_columns` as numeric
    /// quality metrics in the given order.
    pub fn to_dataset(&self, metric_columns: &[String]) -> Result<Dataset, PruneError> {
        let sequence_col = self.column_index(SEQUENCE_COLUMN).ok_or_else(|| {
            PruneError::InputValidation(format!(
                "table is missing required column '{}'",
                SEQUENCE_COLUMN
            ))
        })?;
        let species_col = self.column_index(SPECIES_COLUMN);
        let keep_col = self.column_index(KEEP_COLUMN);
        let always_keep_col = self.column_index(ALWAYS_KEEP_COLUMN);
        let key_species_col = self.column_index(KEY_SPECIES_COLUMN);
        let id_col = ID_COLUMNS.iter().find_map(|name| self.column_index(name));

        let metric_cols = metric_columns
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| {
                    PruneError::InputValidation(format!(
                        "table is missing quality metric column '{}'",
                        name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(self.rows.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            let field = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or("");

            let id = id_col
                .map(|c| field(c).to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| row_idx.to_string());

            let mut record = SequenceRecord::new(id, field(sequence_col));
            if let Some(c) = species_col {
                record.species = field(c).to_string();
            }
            if let Some(c) = keep_col {
                record.keep = parse_bool(field(c), KEEP_COLUMN, row_idx)?.unwrap_or(true);
            }
            if let Some(c) = always_keep_col {
                record.always_keep = parse_bool(field(c), ALWAYS_KEEP_COLUMN, row_idx)?;
            }
            if let Some(c) = key_species_col {
                record.key_species = parse_bool(field(c), KEY_SPECIES_COLUMN, row_idx)?;
            }

            for (name, &c) in metric_columns.iter().zip(&metric_cols) {
                let raw = field(c);
                let value: f64 = raw.parse().map_err(|_| {
                    PruneError::InputValidation(format!(
                        "row {}: column '{}' has non-numeric value '{}'",
                        row_idx, name, raw
                    ))
                })?;
                record.metrics.insert(name.clone(), value);
            }

            records.push(record);
        }

        let dataset = Dataset::new(records).with_metric_names(metric_columns.iter().cloned());
        dataset.validate()?;
        Ok(dataset)
    }

    /// Copy of this table whose `keep` column reflects `dataset`, appending
    /// the column when the input had none.
    pub fn with_keep(&self, dataset: &Dataset) -> Result<SequenceTable, PruneError> {
        if dataset.len() != self.rows.len() {
            return Err(PruneError::InputValidation(format!(
                "dataset has {} records but table has {} rows",
                dataset.len(),
                self.rows.len()
            )));
        }

        let mut out = self.clone();
        let keep_col = match out.column_index(KEEP_COLUMN) {
            Some(c) => c,
            None => {
                out.headers.push(KEEP_COLUMN.to_string());
                out.headers.len() - 1
            }
        };

        for (row, record) in out.rows.iter_mut().zip(&dataset.records) {
            if row.len() <= keep_col {
                row.resize(keep_col + 1, String::new());
            }
            row[keep_col] = if record.keep { "True" } else { "False" }.to_string();
        }

        Ok(out)
    }
}

/// Parse a boolean cell. Empty cells yield `None` so callers can apply the
/// column default.
pub fn parse_bool(raw: &str, column: &str, row: usize) -> Result<Option<bool>, PruneError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "t" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "f" | "0" | "no" | "n" => Ok(Some(false)),
        other => Err(PruneError::InputValidation(format!(
            "row {}: column '{}' has non-boolean value '{}'",
            row, column, other
        ))),
    }
}
