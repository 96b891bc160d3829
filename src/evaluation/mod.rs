pub mod combiner;
pub mod report;
