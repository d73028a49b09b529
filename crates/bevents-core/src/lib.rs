//! bevents core library
//!
//! Types, the notification capability trait and the presentation logic used by
//! the `bevents` command-line tool.

pub mod args;
pub mod error;
pub mod lister;
pub mod presenter;
pub mod types;

pub use args::ListArgs;
pub use error::{BoxError, Error, Result};
pub use lister::{list_notification_configs, NotificationSource};
pub use presenter::{FormatOptions, OutputMode, Presenter};
pub use types::{NotificationConfig, NotificationMessage};

/// bevents version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status marker carried by every structured output record
pub const SUCCESS_STATUS: &str = "success";
