use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Everything that can go wrong here is a misconfigured construction: once a
/// `Simulation` exists, every phase of `step()` is a total function over its
/// state, so no runtime variants are needed.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
