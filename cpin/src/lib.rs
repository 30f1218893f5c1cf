pub mod cli;
pub mod error;
pub mod lister;
pub mod manifest;
pub mod output;
pub mod sync;

// Re-export core types for convenience
pub use conda_pin_core::{InstalledPackages, PackageManager, package_name, pin_specifier};
pub use error::SyncError;
