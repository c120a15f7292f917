// Filtering over a file's definition catalog

pub mod filter;

pub use filter::{DefinitionFilter, FilterOptions};
