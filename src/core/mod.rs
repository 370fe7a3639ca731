pub mod compare;
pub mod config;
pub mod keep_state;
pub mod partition;
pub mod quality;
pub mod redundancy;
pub mod worker;

pub use config::Config;
pub use redundancy::RedundancyRemover;
