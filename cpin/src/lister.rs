use crate::error::{Result, SyncError};
use conda_pin_core::{InstalledPackages, parse_listing};
use std::path::PathBuf;
use std::process::Command;

/// Source of installed package versions for a named environment
pub trait PackageLister {
    /// List the packages installed in `env_name`
    fn list_installed(&self, env_name: &str) -> Result<InstalledPackages>;
}

impl<T: PackageLister + ?Sized> PackageLister for &T {
    fn list_installed(&self, env_name: &str) -> Result<InstalledPackages> {
        (**self).list_installed(env_name)
    }
}

/// Lists packages by running `conda list --name <env>`
pub struct CondaLister {
    program: PathBuf,
}

impl CondaLister {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, env_name: &str) -> String {
        format!("{} list --name {env_name}", self.program.display())
    }
}

impl Default for CondaLister {
    fn default() -> Self {
        Self::new("conda")
    }
}

impl PackageLister for CondaLister {
    fn list_installed(&self, env_name: &str) -> Result<InstalledPackages> {
        tracing::debug!("running `{}`", self.command_line(env_name));

        let output = Command::new(&self.program)
            .args(["list", "--name", env_name])
            .output()
            .map_err(|source| SyncError::ListerUnavailable {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(SyncError::EnvironmentQuery {
                command: self.command_line(env_name),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let listing = parse_listing(&String::from_utf8_lossy(&output.stdout));

        for skipped in &listing.skipped {
            tracing::warn!(
                "skipping malformed line {} of `conda list` output: {:?}",
                skipped.line_number,
                skipped.content
            );
        }
        for name in &listing.duplicates {
            tracing::warn!("{name} listed more than once, keeping the first version");
        }

        tracing::debug!(
            "{} packages installed in {env_name}",
            listing.packages.len()
        );

        Ok(listing.packages)
    }
}
