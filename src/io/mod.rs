//! Table input and dispatch record export.

pub mod export;
pub mod tables;
