//! Command help.

use crate::app::LabelerApp;
use crate::ui::APP_VERSION;

const COMMANDS: &[(&str, &str)] = &[
    ("file <path>", "Set the file path field"),
    ("browse", "Choose the file with a dialog"),
    ("label <text>", "Set the label field"),
    ("submit", "Store the form as an annotation and clear it"),
    ("add <path> <label>", "Store an annotation directly"),
    ("view", "Show all annotations as a table"),
    ("export <format> [path]", "Write annotations to a file"),
    ("import <path>", "Append annotations from an exported file"),
    ("upload", "Insert all annotations into the database"),
    ("db", "Show the rows stored in the database"),
    ("status", "Show the form, store size and upload target"),
    ("help", "Show this help"),
    ("quit", "End the session"),
];

impl LabelerApp {
    /// Command reference, including the formats known to the registry.
    pub fn help_text(&self) -> String {
        let width = COMMANDS.iter().map(|(c, _)| c.len()).max().unwrap_or(0);

        let mut out = format!("{} v{}\n\nCommands:\n", crate::constants::APP_TITLE, APP_VERSION);
        for (command, description) in COMMANDS {
            out.push_str(&format!("  {:<width$}  {}\n", command, description, width = width));
        }

        out.push_str("\nExport formats:\n");
        for format in self.format_registry.all() {
            out.push_str(&format!(
                "  {:<6}{} (default file {})\n",
                format.id(),
                format.display_name(),
                format.default_filename()
            ));
        }

        let importable: Vec<_> = self
            .format_registry
            .import_formats()
            .iter()
            .map(|f| f.id())
            .collect();
        out.push_str(&format!("\nImportable: {}\n", importable.join(", ")));
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::app::LabelerApp;

    #[test]
    fn test_help_lists_commands_and_formats() {
        let app = LabelerApp::with_defaults();
        let help = app.help_text();

        for command in ["submit", "view", "export", "upload", "quit"] {
            assert!(help.contains(command), "missing {}", command);
        }
        assert!(help.contains("annotations.csv"));
        assert!(help.contains("annotations.pdf"));
        assert!(help.contains("Importable: csv, json"));
    }
}
