//! Lectern - a terminal reader for interactive digital books
//!
//! Lectern renders books built from mixed page kinds: prose laid out in
//! print-style columns, a discussion chat per chapter backed by the book
//! platform's streaming endpoint, reader response forms, and audio
//! transcripts.

pub mod app;
pub mod book;
pub mod chat;
pub mod config;
pub mod form;
pub mod layout;
pub mod reader;
pub mod settings;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
