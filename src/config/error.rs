use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid layout: {0}")]
    Invalid(String),

    #[error("layout I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("layout YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("layout does not describe a valid image: {0}")]
    Core(#[from] CoreError),
}
