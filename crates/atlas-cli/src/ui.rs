use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(flags, std::io::stdout().is_terminal()));
}

fn prefs_for(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    UiPrefs {
        progress: is_tty && !flags.quiet && flags.format != OutputFormat::Json,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs { progress: false })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
        }
    }

    #[test]
    fn progress_only_on_terminal_with_raw_output() {
        assert!(prefs_for(&flags(OutputFormat::Raw, false), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Raw, false), false).progress);
        assert!(!prefs_for(&flags(OutputFormat::Raw, true), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Json, false), true).progress);
    }
}
