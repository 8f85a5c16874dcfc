//! pet-config: configuration bundle schema, loading, and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_bundle};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<ConfigBundle> {
    let content = std::fs::read_to_string(path)?;
    let bundle: ConfigBundle = serde_yaml::from_str(&content)?;
    validate_bundle(&bundle)?;
    Ok(bundle)
}

pub fn save_yaml(path: &std::path::Path, bundle: &ConfigBundle) -> ConfigResult<()> {
    validate_bundle(bundle)?;
    let content = serde_yaml::to_string(bundle)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<ConfigBundle> {
    let content = std::fs::read_to_string(path)?;
    let bundle: ConfigBundle = serde_json::from_str(&content)?;
    validate_bundle(&bundle)?;
    Ok(bundle)
}

pub fn save_json(path: &std::path::Path, bundle: &ConfigBundle) -> ConfigResult<()> {
    validate_bundle(bundle)?;
    let content = serde_json::to_string_pretty(bundle)?;
    std::fs::write(path, content)?;
    Ok(())
}
