use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Exchange API error: {0}")]
    Exchange(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Malformed market data: {0}")]
    Market(String),

    #[error("Notifier error: {0}")]
    Notify(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
