//! Configuration loading and validation for Sitecomb

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, UserAgentConfig};
pub use validation::validate;
