use thiserror::Error;

pub type DestinationResult<T> = Result<T, DestinationError>;

/// Everything that can go wrong inside the destination adapter. All
/// variants are non-fatal: each one is logged and the offending operation
/// is dropped, nothing propagates to the host's event-processing path.
#[derive(Error, Debug)]
pub enum DestinationError {
    #[error("Invalid configuration: destination settings are missing or not an object")]
    MissingConfiguration,

    #[error("Host application is unavailable")]
    MissingHostApplication,

    #[error("Invalid environment id: value is missing or empty")]
    InvalidEnvironmentId,

    #[error("Engagement client is not initialized")]
    UninitializedClient,

    #[error("Message kind '{0}' is not valid for this destination")]
    InvalidMessageKind(String),

    #[error("{value} is not a valid attribute value. Only string, bool, and numeric values are accepted. Ignoring attribute.")]
    InvalidPropertyValue { value: String },

    #[error("'{name}' is not a valid attribute name. Names must be less than 256 characters and cannot start with a '!'. Ignoring attribute.")]
    InvalidPropertyName { name: String },
}
