use crate::installed::InstalledPackages;
use std::fmt;

/// Package manager a dependency entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// Direct entries of the `dependencies` list
    Conda,
    /// Entries nested under the `pip:` marker
    Pip,
}

impl PackageManager {
    /// Operator written between name and version when pinning
    pub fn pin_operator(self) -> &'static str {
        match self {
            PackageManager::Conda => "=",
            PackageManager::Pip => "==",
        }
    }

    /// Format an exact pin for this manager
    pub fn pin(self, name: &str, version: &str) -> String {
        format!("{name}{}{version}", self.pin_operator())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageManager::Conda => write!(f, "conda"),
            PackageManager::Pip => write!(f, "pip"),
        }
    }
}

/// Extract the package name from a dependency specifier
///
/// Examples:
/// - "numpy" -> "numpy"
/// - "pandas=2.0.0" -> "pandas"
/// - "scipy>=1.10" -> "scipy"
/// - "requests==2.31.0" -> "requests"
///
/// The name ends at the first `=`, `>=` or `<=`. Anything after it is not
/// validated, so pathological input is split best-effort.
pub fn package_name(spec: &str) -> &str {
    let Some(eq) = spec.find('=') else {
        return spec.trim();
    };

    // `>=` and `<=` start one byte before their `=`
    let end = match spec[..eq].chars().next_back() {
        Some('>' | '<') => eq - 1,
        _ => eq,
    };

    spec[..end].trim()
}

/// Pin a specifier to the installed version, if the package is installed
///
/// Any constraint already present is replaced. Specifiers for packages missing
/// from `installed` are returned verbatim.
pub fn pin_specifier(spec: &str, installed: &InstalledPackages, manager: PackageManager) -> String {
    let name = package_name(spec);

    match installed.get(name) {
        Some(version) => manager.pin(name, version),
        None => spec.to_string(),
    }
}
