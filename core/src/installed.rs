use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Installed package name -> version table for one environment
///
/// Names match exactly (case-sensitive). When a name is seen twice the
/// first version is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
    versions: HashMap<String, String>,
}

impl InstalledPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package, returning false if the name was already present
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) -> bool {
        match self.versions.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(version.into());
                true
            }
        }
    }

    /// Installed version of `name`, if any
    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for InstalledPackages
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut packages = Self::new();
        for (name, version) in iter {
            packages.insert(name, version);
        }
        packages
    }
}

/// A listing line that could not be read as `<name> <version> ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-indexed line number in the listing output
    pub line_number: usize,
    pub content: String,
}

/// Result of parsing an environment listing
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub packages: InstalledPackages,
    /// Non-blank, non-comment lines with fewer than two tokens
    pub skipped: Vec<SkippedLine>,
    /// Names that appeared more than once (later versions were ignored)
    pub duplicates: Vec<String>,
}

/// Parse the output of `conda list`
///
/// Format:
/// ```text
/// # packages in environment at /opt/conda/envs/ai_env:
/// #
/// # Name                    Version                   Build  Channel
/// numpy                     1.26.0          py311h64a7726_0    conda-forge
/// requests                  2.31.0                   pypi_0    pypi
/// ```
///
/// Blank lines and lines starting with `#` are ignored. Only the first two
/// whitespace-separated tokens are used.
pub fn parse_listing(output: &str) -> Listing {
    let mut listing = Listing::default();

    for (idx, line) in output.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(name), Some(version)) => {
                if !listing.packages.insert(name, version) {
                    listing.duplicates.push(name.to_string());
                }
            }
            _ => listing.skipped.push(SkippedLine {
                line_number: idx + 1,
                content: line.to_string(),
            }),
        }
    }

    listing
}
