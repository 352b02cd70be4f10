//! Configuration loading, types, and validation

pub mod parser;
pub mod types;
pub mod validation;

pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_or_default, DEFAULT_CONFIG_PATH,
};
pub use types::{
    Config, FetchConfig, HeaderConfig, OutputConfig, SelfcheckConfig, TransportConfig,
};
pub use validation::validate;
