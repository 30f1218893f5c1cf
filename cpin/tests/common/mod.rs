#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a temporary project directory
pub struct TempProject {
    pub dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Get the path to the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file in the project with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) {
        fs::write(self.file_path(relative_path), content).expect("Failed to write file");
    }

    /// Get the absolute path to a file in the project
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.file_path(relative_path)).expect("Failed to read file")
    }

    /// Install an executable fake `conda` that prints `listing` for
    /// `list --name <expected_env>` and fails for any other environment
    #[cfg(unix)]
    pub fn fake_conda(&self, expected_env: &str, listing: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let listing_path = self.file_path("conda-list.txt");
        fs::write(&listing_path, listing).expect("Failed to write listing");

        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = list ] && [ \"$2\" = --name ] && [ \"$3\" = {expected_env} ]; then\n\
             \tcat '{}'\n\
             \texit 0\n\
             fi\n\
             echo \"EnvironmentLocationNotFound: Not a conda environment: $3\" >&2\n\
             exit 1\n",
            listing_path.display()
        );

        let conda = self.file_path("conda");
        fs::write(&conda, script).expect("Failed to write fake conda");
        fs::set_permissions(&conda, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake conda executable");
        conda
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A conda environment file with conda and pip dependencies
pub fn sample_environment_yml() -> &'static str {
    r#"name: ai_env
channels:
  - conda-forge
  - defaults
dependencies:
  - python=3.11
  - numpy
  - pandas>=2.0
  - scipy
  - pip:
    - requests
    - rich<=13.0
"#
}

/// `conda list --name ai_env` output matching the sample file
pub fn sample_conda_list() -> &'static str {
    r#"# packages in environment at /opt/conda/envs/ai_env:
#
# Name                    Version                   Build  Channel
numpy                     1.26.0          py311h64a7726_0    conda-forge
pandas                    2.2.3           py311h7db5c69_1    conda-forge
python                    3.11.9          hb806964_0_cpython    conda-forge
requests                  2.31.0                   pypi_0    pypi
"#
}
