//! Path layer
//! - naming.rs: stem/extension decomposition and simple renames
//! - versioning.rs: next and latest versioned names for a path

pub mod naming;
pub mod versioning;

pub use naming::{Position, change_extension, change_file_name, split_file_name};
pub use versioning::{
    DirectoryLister, FsLister, VersionedPathResolver, resolve_latest_existing,
    resolve_next_version,
};
