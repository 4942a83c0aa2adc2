use thiserror::Error;

/// the four failure classes of the engine.
///
/// InvalidObservation is recoverable: the session rejects the input and
/// stays exactly where it was. Inconsistent kills the session: the feasible
/// configuration space is empty, which a well-formed observation stream
/// cannot produce. Timeout and Internal poison only the query that raised
/// them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("inconsistent constraints: {0}")]
    Inconsistent(String),

    #[error("deadline expired")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}
