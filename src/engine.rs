//! File discovery and parallel analysis

pub mod executor;
pub mod file_walker;

pub use executor::{ExecutionEngine, ExecutionResult, FileDiagnostic};
pub use file_walker::{FileWalker, FileWalkerError};
