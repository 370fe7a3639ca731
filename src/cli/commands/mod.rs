pub mod config;
pub mod prune;
pub mod stats;
