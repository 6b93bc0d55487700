//! # Quill Core
//!
//! Everything around the text buffer that an editor front end needs.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Session                     │
//! │  ┌───────────┐ ┌───────────┐ ┌────────────┐  │
//! │  │ Clipboard │ │ Event Bus │ │  Commands  │  │
//! │  └───────────┘ └───────────┘ └────────────┘  │
//! │         │                                     │
//! │  ┌──────┴───────────────────────────────┐    │
//! │  │      Document (path, line ending)     │    │
//! │  │   ┌──────────────────────────────┐    │    │
//! │  │   │   quill_buffer::TextBuffer   │    │    │
//! │  │   └──────────────────────────────┘    │    │
//! │  └───────────────────────────────────────┘    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The buffer never touches the file system or logs; the document and
//! session layers here do both.

pub mod command;
pub mod config;
pub mod document;
pub mod event;
pub mod session;

pub use command::Command;
pub use config::{Config, LineEndingPreference};
pub use document::{Document, LineEnding};
pub use event::{EditorEvent, EventBus};
pub use session::Session;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] quill_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Document has no path; use save-as")]
    NoPath,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument { command: String, reason: String },
}
