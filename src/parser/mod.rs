//! Parser layer
//! - types.rs: Manifest and declared dependency types
//! - package_json.rs: package.json parser

pub mod package_json;
pub mod types;

pub use package_json::{PackageJsonParser, read_manifest};
pub use types::{DeclaredDependencies, Manifest};
