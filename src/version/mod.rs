//! Version layer for checking installed versions against declared ranges
//!
//! # Modules
//!
//! - [`error`]: Error type for range parsing
//! - [`matcher`]: `VersionMatcher` trait and the npm implementation
//! - [`range`]: npm range grammar and satisfaction rule
//! - [`semver`]: Version and partial version parsing

pub mod error;
pub mod matcher;
pub mod range;
pub mod semver;

pub use error::InvalidRange;
pub use matcher::{NpmVersionMatcher, VersionMatcher};
pub use range::VersionRange;
