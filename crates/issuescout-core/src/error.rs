use thiserror::Error;

/// All the ways the preference engine can go wrong
///
/// Most of these never reach a caller: the resolvers and the store turn them
/// into defaults and a log line. They exist so the seams can use `?`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Geolocation failed: {0}")]
    GeolocationError(#[from] issuescout_api::GeoError),

    #[error("Storage operation failed: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
