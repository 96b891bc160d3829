pub mod annotation;
pub mod scorer;
pub mod smith_waterman;
pub mod vocabulary;
