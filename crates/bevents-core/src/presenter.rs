//! Rendering of notification configurations
//!
//! Text mode prints one tab-separated line per configuration:
//!
//! ```text
//! {id}\t{arn}\t{event},{event}[\tprefix:{prefix}][\tsuffix:{suffix}]
//! ```
//!
//! JSON mode prints one compact JSON object per configuration.

use crate::error::Result;
use crate::types::NotificationConfig;
use console::Style;
use std::io::Write;

/// Output mode, selected once per invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Formatter options for text output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub color_enabled: bool,
}

impl FormatOptions {
    pub fn colored() -> Self {
        Self {
            color_enabled: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_enabled: false,
        }
    }
}

/// Renders configurations in the selected output mode
#[derive(Debug, Clone)]
pub struct Presenter {
    mode: OutputMode,
    style: Style,
}

impl Presenter {
    pub fn new(mode: OutputMode, options: FormatOptions) -> Self {
        let style = Style::new()
            .green()
            .bold()
            .force_styling(options.color_enabled);
        Self { mode, style }
    }

    /// Render a single output unit (without trailing newline)
    pub fn render(&self, config: &NotificationConfig) -> Result<String> {
        match self.mode {
            OutputMode::Text => Ok(self.render_text(config)),
            OutputMode::Json => Ok(serde_json::to_string(&config.to_message())?),
        }
    }

    fn render_text(&self, config: &NotificationConfig) -> String {
        let head = format!("{}\t{}\t", config.id, config.arn);
        let mut line = self.style.apply_to(head).to_string();

        let events: Vec<String> = config
            .events
            .iter()
            .map(|event| self.style.apply_to(event).to_string())
            .collect();
        line.push_str(&events.join(","));

        if let Some(prefix) = config.prefix_filter() {
            line.push_str("\tprefix:");
            line.push_str(prefix);
        }
        if let Some(suffix) = config.suffix_filter() {
            line.push_str("\tsuffix:");
            line.push_str(suffix);
        }
        line
    }

    /// Write one line per configuration, in order. Returns the number written.
    pub fn emit<W: Write>(&self, out: &mut W, configs: &[NotificationConfig]) -> Result<usize> {
        for config in configs {
            let unit = self.render(config)?;
            writeln!(out, "{}", unit)?;
        }
        out.flush()?;
        Ok(configs.len())
    }
}
