//! Configuration loading, validation, and the fixed heuristic tables

mod heuristics;
mod parser;
mod types;
mod validation;

pub use heuristics::Heuristics;
pub use parser::load_config;
pub use types::{Config, CrawlerConfig, TrustEntry, UserAgentConfig};
