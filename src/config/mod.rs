pub mod toml_config;

pub use toml_config::{
    AgeDifferenceQuery, AppConfig, LogFormat, LoggingConfig, QueriesConfig, ReaderConfig,
    SourceConfig,
};
