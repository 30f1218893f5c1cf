use crate::error::{Result, SyncError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const DEPENDENCIES_KEY: &str = "dependencies";
const PIP_KEY: &str = "pip";

/// One item of the `dependencies` list
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyEntry {
    /// A conda specifier such as `numpy` or `pandas=2.0.0`
    Specifier(String),
    /// A `pip:` marker mapping and its nested specifiers
    ///
    /// `marker` is the whole mapping, so keys beside `pip` are kept in place.
    Nested {
        marker: Mapping,
        specifiers: Vec<String>,
    },
    /// Anything else, written back untouched
    Other(Value),
}

impl From<Value> for DependencyEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(spec) => DependencyEntry::Specifier(spec),
            Value::Mapping(marker) => match nested_specifiers(&marker) {
                Some(specifiers) => DependencyEntry::Nested { marker, specifiers },
                None => DependencyEntry::Other(Value::Mapping(marker)),
            },
            other => DependencyEntry::Other(other),
        }
    }
}

impl From<DependencyEntry> for Value {
    fn from(entry: DependencyEntry) -> Self {
        match entry {
            DependencyEntry::Specifier(spec) => Value::String(spec),
            DependencyEntry::Nested {
                mut marker,
                specifiers,
            } => {
                let nested = specifiers.into_iter().map(Value::String).collect();
                // Replacing an existing key keeps its position
                marker.insert(Value::from(PIP_KEY), Value::Sequence(nested));
                Value::Mapping(marker)
            }
            DependencyEntry::Other(value) => value,
        }
    }
}

/// The `pip` list of a marker mapping, if it holds only strings
fn nested_specifiers(marker: &Mapping) -> Option<Vec<String>> {
    let nested = marker.get(PIP_KEY)?.as_sequence()?;

    let specifiers: Option<Vec<String>> = nested
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();

    if specifiers.is_none() {
        tracing::debug!("pip list contains non-string items, leaving it unchanged");
    }

    specifiers
}

/// A parsed environment.yml
///
/// Only the `dependencies` field is ever modified. Other top-level keys keep
/// their values and order.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Mapping,
}

impl Manifest {
    /// Read and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SyncError::ManifestNotFound(path.to_path_buf())
            } else {
                SyncError::ManifestRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used for messages and saving
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|source| SyncError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let Value::Mapping(document) = value else {
            return Err(SyncError::ManifestShape {
                path: path.to_path_buf(),
                reason: "the top level must be a mapping".to_string(),
            });
        };

        let manifest = Self {
            path: path.to_path_buf(),
            document,
        };
        // Reject a malformed dependency list before anything else runs
        manifest.dependency_values()?;

        Ok(manifest)
    }

    /// The `name:` field, if present
    pub fn env_name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    fn dependency_values(&self) -> Result<&[Value]> {
        match self.document.get(DEPENDENCIES_KEY) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Sequence(items)) => Ok(items),
            Some(_) => Err(SyncError::ManifestShape {
                path: self.path.clone(),
                reason: format!("`{DEPENDENCIES_KEY}` must be a list"),
            }),
        }
    }

    /// The dependency list; a missing field is an empty list
    pub fn dependencies(&self) -> Result<Vec<DependencyEntry>> {
        Ok(self
            .dependency_values()?
            .iter()
            .cloned()
            .map(DependencyEntry::from)
            .collect())
    }

    /// Replace the dependency list, keeping the field's position
    pub fn set_dependencies(&mut self, entries: Vec<DependencyEntry>) {
        let items = entries.into_iter().map(Value::from).collect();
        self.document
            .insert(Value::from(DEPENDENCIES_KEY), Value::Sequence(items));
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.document).map_err(|source| SyncError::Serialize {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the manifest back to its path
    ///
    /// The YAML goes to a temporary file next to the real file (the symlink
    /// target, if the path is a link) which is then renamed over it, so a
    /// failed write leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let yaml = self.to_yaml()?;
        let write_error = |source: std::io::Error| SyncError::Write {
            path: self.path.clone(),
            source,
        };

        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(err) if err.kind() == ErrorKind::NotFound => self.path.clone(),
            Err(err) => return Err(write_error(err)),
        };

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(yaml.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;

        if let Ok(metadata) = fs::metadata(&target) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_error)?;
        }

        temp.persist(&target)
            .map_err(|err| write_error(err.error))?;

        Ok(())
    }
}
