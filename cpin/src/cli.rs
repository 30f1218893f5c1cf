use clap::Parser;
use std::path::PathBuf;

/// Pin environment.yml dependencies to the versions installed in a conda environment
#[derive(Parser, Debug, Clone)]
#[command(name = "cpin")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the environment file (defaults to current directory)
    #[arg(long = "root_dir", visible_alias = "root-dir", default_value = ".")]
    pub root_dir: String,

    /// Name of the conda environment to read installed versions from
    #[arg(long = "env_name", visible_alias = "env-name", default_value = "ai_env")]
    pub env_name: String,

    /// Name of the environment file inside the root directory
    #[arg(long = "yml_name", visible_alias = "yml-name", default_value = "environment.yml")]
    pub yml_name: String,

    /// conda executable used to list installed packages
    #[arg(long, env = "CONDA_EXE", default_value = "conda")]
    pub conda: PathBuf,

    /// Show the pinned versions without writing the file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Build the run configuration from the parsed flags
    pub fn config(&self) -> SyncConfig {
        SyncConfig::new(&self.root_dir, &self.env_name, &self.yml_name)
    }
}

/// Where the manifest lives and which environment to pin it against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub root_dir: PathBuf,
    pub env_name: String,
    pub manifest_name: String,
}

impl SyncConfig {
    /// A blank `root_dir` means the current directory
    pub fn new(root_dir: &str, env_name: &str, manifest_name: &str) -> Self {
        let root_dir = if root_dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(root_dir)
        };

        Self {
            root_dir,
            env_name: env_name.to_string(),
            manifest_name: manifest_name.to_string(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(&self.manifest_name)
    }
}
