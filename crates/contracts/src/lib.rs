pub mod aggregation;
pub mod domain;
pub mod scoring;
