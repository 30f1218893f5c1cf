pub mod installed;
pub mod specifier;

// Re-export commonly used types at crate root
pub use installed::{InstalledPackages, Listing, SkippedLine, parse_listing};
pub use specifier::{PackageManager, package_name, pin_specifier};
