use crate::cli::SyncConfig;
use crate::error::Result;
use crate::lister::PackageLister;
use crate::manifest::{DependencyEntry, Manifest};
use conda_pin_core::{InstalledPackages, PackageManager, package_name, pin_specifier};
use std::path::PathBuf;

/// A specifier that was rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinChange {
    pub manager: PackageManager,
    pub before: String,
    pub after: String,
}

/// Outcome of pinning one manifest
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub manifest_path: PathBuf,
    pub env_name: String,
    /// Entries whose text changed, in manifest order
    pub changes: Vec<PinChange>,
    /// Entries already pinned to the installed version
    pub unchanged: usize,
    /// Package names not installed in the environment
    pub not_installed: Vec<String>,
    /// Whether the manifest was written
    pub written: bool,
}

/// Pins every dependency of a manifest to the versions installed in an environment
pub struct Synchronizer<L> {
    lister: L,
    dry_run: bool,
}

impl<L: PackageLister> Synchronizer<L> {
    pub fn new(lister: L) -> Self {
        Self {
            lister,
            dry_run: false,
        }
    }

    /// Compute the pins without writing the manifest
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Load, pin and write back the manifest named by `config`
    ///
    /// The manifest is read before the environment is queried and written
    /// last, so any earlier failure leaves the file untouched.
    pub fn run(&self, config: &SyncConfig) -> Result<SyncReport> {
        let path = config.manifest_path();
        let mut manifest = Manifest::load(&path)?;
        tracing::debug!(
            "loaded {} (environment {})",
            path.display(),
            manifest.env_name().unwrap_or("unnamed")
        );

        let installed = self.lister.list_installed(&config.env_name)?;

        let mut report = SyncReport {
            manifest_path: path,
            env_name: config.env_name.clone(),
            ..SyncReport::default()
        };

        let entries = manifest
            .dependencies()?
            .into_iter()
            .map(|entry| pin_entry(entry, &installed, &mut report))
            .collect();
        manifest.set_dependencies(entries);

        if !self.dry_run {
            manifest.save()?;
            report.written = true;
        }

        Ok(report)
    }
}

/// Pin one dependency entry
pub fn pin_entry(
    entry: DependencyEntry,
    installed: &InstalledPackages,
    report: &mut SyncReport,
) -> DependencyEntry {
    match entry {
        DependencyEntry::Specifier(spec) => {
            DependencyEntry::Specifier(pin_one(&spec, installed, PackageManager::Conda, report))
        }
        DependencyEntry::Nested { marker, specifiers } => DependencyEntry::Nested {
            marker,
            specifiers: specifiers
                .iter()
                .map(|spec| pin_one(spec, installed, PackageManager::Pip, report))
                .collect(),
        },
        DependencyEntry::Other(value) => DependencyEntry::Other(value),
    }
}

fn pin_one(
    spec: &str,
    installed: &InstalledPackages,
    manager: PackageManager,
    report: &mut SyncReport,
) -> String {
    let name = package_name(spec);
    let pinned = pin_specifier(spec, installed, manager);

    if !installed.contains(name) {
        tracing::debug!("{name} is not installed, leaving {spec:?} unchanged");
        report.not_installed.push(name.to_string());
    } else if pinned == spec {
        report.unchanged += 1;
    } else {
        report.changes.push(PinChange {
            manager,
            before: spec.to_string(),
            after: pinned.clone(),
        });
    }

    pinned
}
