//! # Console Output
//!
//! How each consolidation [`Event`] reads on the console. With colors on,
//! lines are prefixed by an emoji; otherwise by a bracketed tag such as
//! `[EDIT]`, which keeps piped and CI output greppable.
//!
//! `--color auto` turns colors off when `NO_COLOR` is set and otherwise
//! defers to `console`, which checks the terminal and `CLICOLOR` /
//! `CLICOLOR_FORCE`.

use std::env;

use clap::ValueEnum;

use crate::consolidate::Event;

/// The `--color` choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Whether console lines use emoji markers.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                env::var_os("NO_COLOR").is_none() && console::colors_enabled()
            }
        };
        Self { use_color }
    }

    fn marker<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }
}

/// The console line for one event.
pub fn render_event(config: &OutputConfig, event: &Event) -> String {
    match event {
        Event::RestoreSucceeded => {
            format!("{} Solution built without errors", config.marker("✅", "[OK]"))
        }
        Event::RestoreFailed {
            exit_code,
            conflicts,
        } => format!(
            "{} Restore failed with exit code {}: {} downgrade conflict(s) found",
            config.marker("🔍", "[SCAN]"),
            exit_code,
            conflicts
        ),
        Event::Edited(edit) => format!("{} {}", config.marker("📝", "[EDIT]"), edit),
        Event::ManifestWritten { path } => format!(
            "{} Project file '{}' has been updated",
            config.marker("💾", "[WRITE]"),
            path.display()
        ),
        Event::ManifestUnchanged { path } => format!(
            "{} Project file '{}' is already up to date",
            config.marker("✔️", "[SKIP]"),
            path.display()
        ),
        Event::ManifestPlanned { path } => format!(
            "{} Project file '{}' would be updated (dry run)",
            config.marker("🔎", "[DRY RUN]"),
            path.display()
        ),
    }
}
