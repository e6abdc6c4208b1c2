//! Book content: model, loading, and the built-in demo book.

pub mod model;
pub mod sample;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub use model::{Book, Chapter, ChatbotConfig, FieldValue, FormField, Page};
pub use sample::demo_book;

/// Load a book from a JSON file on disk.
pub fn load_book(path: &Path) -> Result<Book> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read book file: {}", path.display()))?;
    let book: Book = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse book file: {}", path.display()))?;
    tracing::info!(
        book_id = %book.id,
        chapters = book.chapters.len(),
        "loaded book from {}",
        path.display()
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_book_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        let book = demo_book();
        fs::write(&path, serde_json::to_string_pretty(&book).unwrap()).unwrap();

        let loaded = load_book(&path).unwrap();
        assert_eq!(loaded, book);
    }

    #[test]
    fn load_book_reports_missing_file() {
        let err = load_book(Path::new("/nonexistent/book.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read book file"));
    }

    #[test]
    fn load_book_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_book(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse book file"));
    }
}
