//! Session state persistence
//!
//! Stores the last stable view per book so readers resume where they left
//! off. Column positions are deliberately not saved: a fresh run has no
//! measurements yet, so a restored page opens at its first column.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reader::View;

use super::Config;

/// Saved position for a specific book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSession {
    /// Chapter index of the last reading position
    pub chapter: usize,
    /// Page index within the chapter
    pub page: usize,
    /// Reader was on the book cover
    #[serde(default)]
    pub at_cover: bool,
    /// Reader was on the index
    #[serde(default)]
    pub at_index: bool,
}

impl BookSession {
    pub fn from_view(view: View) -> Self {
        match view {
            View::BookCover => Self {
                at_cover: true,
                ..Self::default()
            },
            View::Index => Self {
                at_index: true,
                ..Self::default()
            },
            View::Page(pos) => Self {
                chapter: pos.chapter,
                page: pos.page,
                ..Self::default()
            },
        }
    }
}

/// All session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Most recently opened book ID (if any)
    pub last_book_id: Option<String>,
    /// Saved position per book (key is book ID)
    pub books: HashMap<String, BookSession>,
}

impl Session {
    /// Load session from disk
    pub fn load() -> Result<Self> {
        let path = Self::session_path()?;

        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse session.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::session_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize session")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write session to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the session file
    fn session_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session.json"))
    }

    /// Get or create session for a book
    pub fn book_mut(&mut self, book_id: &str) -> &mut BookSession {
        self.books.entry(book_id.to_string()).or_default()
    }

    /// Get session for a book (if exists)
    pub fn book(&self, book_id: &str) -> Option<&BookSession> {
        self.books.get(book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Position;

    #[test]
    fn session_default_is_empty() {
        let session = Session::default();
        assert!(session.last_book_id.is_none());
        assert!(session.books.is_empty());
    }

    #[test]
    fn book_mut_creates_entry() {
        let mut session = Session::default();
        let book_session = session.book_mut("field-notes");
        book_session.chapter = 1;
        book_session.page = 3;

        assert!(session.books.contains_key("field-notes"));
        assert_eq!(session.books["field-notes"].page, 3);
    }

    #[test]
    fn views_map_to_saved_positions() {
        assert!(BookSession::from_view(View::BookCover).at_cover);
        assert!(BookSession::from_view(View::Index).at_index);

        let saved = BookSession::from_view(View::Page(Position {
            chapter: 2,
            page: 4,
            column: 3,
            column_count: 5,
        }));
        assert_eq!(saved.chapter, 2);
        assert_eq!(saved.page, 4);
        assert!(!saved.at_cover && !saved.at_index);
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = Session::default();
        session.last_book_id = Some("field-notes".into());
        session.book_mut("field-notes").chapter = 1;

        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.last_book_id, Some("field-notes".into()));
        assert_eq!(parsed.book("field-notes").unwrap().chapter, 1);
    }

    #[test]
    fn session_deserializes_without_front_matter_flags() {
        let json = r#"{
            "last_book_id": "b",
            "books": { "b": { "chapter": 0, "page": 2 } }
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        let saved = session.book("b").unwrap();
        assert_eq!(saved.page, 2);
        assert!(!saved.at_cover);
    }
}
