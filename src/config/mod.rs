mod app_config;

pub use app_config::{
    AppConfig, DataConfig, GenerationConfig, LogFormat, LoggingConfig, RetrievalConfig,
    ServerConfig,
};
