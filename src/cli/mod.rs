// CLI command implementations

pub mod languages;
pub mod scan;
