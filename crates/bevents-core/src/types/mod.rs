//! Core types for bevents

mod notification;

pub use notification::*;
