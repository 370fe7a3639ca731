pub mod sequence;
pub mod table;

pub use sequence::{Dataset, SequenceRecord};
pub use table::SequenceTable;
