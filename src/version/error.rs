use thiserror::Error;

/// A version constraint that is not a valid npm range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid version range: {0:?}")]
pub struct InvalidRange(pub String);
