use crate::sync::{PinChange, SyncReport};
use colored::Colorize;

/// Renders the result of a pinning run
pub struct ReportRenderer {
    show_colors: bool,
}

impl ReportRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Print pinned entries, packages left alone and the confirmation line
    pub fn render(&self, report: &SyncReport) {
        println!("{}", self.headline(report));
        if !report.changes.is_empty() {
            println!();
            for row in self.rows(&report.changes) {
                println!("{row}");
            }
        }

        if !report.not_installed.is_empty() {
            let names = report.not_installed.join(", ");
            let line = format!("\nNot installed in {}: {names}", report.env_name);
            if self.show_colors {
                println!("{}", line.dimmed());
            } else {
                println!("{line}");
            }
        }

        println!();
        println!("{}", self.confirmation(report));
    }

    /// Summary line shown above the pinned rows
    pub fn headline(&self, report: &SyncReport) -> String {
        let env_name = &report.env_name;

        if !report.changes.is_empty() {
            "Pinned dependencies:".to_string()
        } else if report.unchanged == 0 {
            format!("No dependencies matched packages installed in the {env_name} environment.")
        } else if report.not_installed.is_empty() {
            format!("All dependencies already match the {env_name} environment.")
        } else {
            format!("Installed dependencies already match the {env_name} environment.")
        }
    }

    /// One aligned `before → after` line per change
    pub fn rows(&self, changes: &[PinChange]) -> Vec<String> {
        let before_width = changes.iter().map(|c| c.before.len()).max().unwrap_or(0);

        changes
            .iter()
            .map(|change| {
                let after = if self.show_colors {
                    change.after.green().to_string()
                } else {
                    change.after.clone()
                };
                format!(
                    "  {:<5} {:<before_width$} → {after}",
                    change.manager.to_string(),
                    change.before,
                )
            })
            .collect()
    }

    pub fn confirmation(&self, report: &SyncReport) -> String {
        let path = report.manifest_path.display();
        let env_name = &report.env_name;

        if report.written {
            format!("Updated {path} with versions from the {env_name} environment.")
        } else {
            format!("Dry run: {path} would be updated with versions from the {env_name} environment.")
        }
    }
}
