//! CLI command implementations

pub mod events;

use crate::config::ConfigStore;
use bevents_core::{FormatOptions, OutputMode, Presenter};

/// Context passed to all commands
pub struct CommandContext {
    pub config: ConfigStore,
    pub output_mode: OutputMode,
    pub format: FormatOptions,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_mode, OutputMode::Json)
    }

    /// Presenter for this invocation's output mode
    pub fn presenter(&self) -> Presenter {
        Presenter::new(self.output_mode, self.format)
    }
}
