use thiserror::Error;

/// Errors from the geometry core. Degenerate geometry (zero-length vectors
/// and segments, parallel lines) is never an error; each such case has a
/// defined result. Scalar division by exact zero is the one exception.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("division by zero scalar")]
    DivisionByZero,
}

/// Errors raised while decoding a server frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] json::Error),

    #[error("missing or mistyped field {0}")]
    MissingField(String),

    #[error("unknown lander status {0:?}")]
    UnknownStatus(String),
}

/// Errors surfaced by the message pump.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("state snapshot arrived before any environment")]
    EnvironmentMissing,

    #[error("server reported an error: {0}")]
    Server(String),
}
