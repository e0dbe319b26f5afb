use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Any failure reported by the external assistant API (network, HTTP status, decoding).
    #[error("Assistant API error: {0}")]
    Api(String),

    #[error("Assistant not available: {0}")]
    MissingAssistant(String),

    #[error("Thread creation failed")]
    ThreadCreation,
}

pub type Result<T> = std::result::Result<T, GatewayError>;
