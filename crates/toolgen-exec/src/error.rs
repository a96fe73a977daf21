use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url '{0}'")]
    InvalidEndpoint(String),
    /// The HTTP client could not be constructed (TLS backend, proxy config).
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
