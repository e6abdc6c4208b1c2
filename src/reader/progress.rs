//! Chapter progress for the footer.
//!
//! The fraction is an estimate: every text page in the chapter is assumed
//! to have as many columns as the current page. Non-text positions carry a
//! count of one, so the estimate collapses to plain page arithmetic there.

use crate::book::{Book, Page};

use super::engine::{Position, View};

/// Fraction of the current chapter read, in `0.0..=1.0`. Front matter has
/// no progress bar, so cover and index views report `None`.
pub fn chapter_progress(book: &Book, view: View) -> Option<f32> {
    let Position {
        chapter,
        page,
        column,
        column_count,
    } = match view {
        View::Page(pos) => pos,
        _ => return None,
    };
    let pages = &book.chapter(chapter)?.pages;
    if pages.is_empty() {
        return None;
    }

    let on_text = pages.get(page).is_some_and(Page::is_text);
    let per_text_page = if on_text && column_count > 1 {
        column_count
    } else {
        1
    };
    let read = page * per_text_page
        + if on_text {
            (column + 1).min(column_count)
        } else {
            1
        };
    let total: usize = pages
        .iter()
        .map(|p| if p.is_text() { per_text_page } else { 1 })
        .sum();

    Some((read as f32 / total as f32).clamp(0.0, 1.0))
}

/// Footer position label: sections within a multi-column text page,
/// otherwise pages within the chapter.
pub fn position_label(book: &Book, view: View) -> Option<String> {
    let pos = match view {
        View::Page(pos) => pos,
        _ => return None,
    };
    let pages = &book.chapter(pos.chapter)?.pages;
    let on_text = pages.get(pos.page).is_some_and(Page::is_text);
    if on_text && pos.column_count > 1 {
        Some(format!(
            "Section {} of {}",
            (pos.column + 1).min(pos.column_count),
            pos.column_count
        ))
    } else {
        Some(format!("Page {} of {}", pos.page + 1, pages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Chapter, ChatbotConfig};
    use crate::reader::engine::PaginationEngine;
    use pretty_assertions::assert_eq;

    fn book() -> Book {
        Book::new("b", "B").add_chapter(
            Chapter::new("One")
                .add_page(Page::text("<p>x</p>"))
                .add_page(Page::Chatbot {
                    config: ChatbotConfig::default(),
                })
                .add_page(Page::Form {
                    title: "F".to_string(),
                    fields: Vec::new(),
                }),
        )
    }

    fn at(chapter: usize, page: usize, column: usize, column_count: usize) -> View {
        View::Page(Position {
            chapter,
            page,
            column,
            column_count,
        })
    }

    #[test]
    fn front_matter_has_no_progress() {
        let book = book();
        assert_eq!(chapter_progress(&book, View::BookCover), None);
        assert_eq!(chapter_progress(&book, View::Index), None);
        assert_eq!(position_label(&book, View::BookCover), None);
    }

    #[test]
    fn columns_advance_progress_within_a_text_page() {
        let book = book();
        // Text page with two columns: the chapter weighs 2 + 1 + 1.
        assert_eq!(chapter_progress(&book, at(0, 0, 0, 2)), Some(0.25));
        assert_eq!(chapter_progress(&book, at(0, 0, 1, 2)), Some(0.5));
    }

    #[test]
    fn non_text_positions_use_plain_page_arithmetic() {
        let book = book();
        assert_eq!(chapter_progress(&book, at(0, 1, 0, 1)), Some(2.0 / 3.0));
        assert_eq!(chapter_progress(&book, at(0, 2, 0, 1)), Some(1.0));
    }

    #[test]
    fn progress_is_clamped_when_the_estimate_overshoots() {
        let book = Book::new("b", "B").add_chapter(
            Chapter::new("One")
                .add_page(Page::Chatbot {
                    config: ChatbotConfig::default(),
                })
                .add_page(Page::text("<p>x</p>")),
        );
        // Estimate weighs the leading chatbot page as a full text page.
        let p = chapter_progress(&book, at(0, 1, 2, 3)).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn progress_never_decreases_along_a_forward_walk() {
        let book = book();
        let mut engine = PaginationEngine::new(&book);
        let token = engine.measure_token();
        engine.commit_columns(token, 3);

        let mut last = 0.0;
        for _ in 0..6 {
            if let Some(p) = chapter_progress(&book, engine.view()) {
                assert!(p >= last, "progress went backwards: {p} < {last}");
                last = p;
            }
            engine.next();
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn labels_switch_between_sections_and_pages() {
        let book = book();
        assert_eq!(
            position_label(&book, at(0, 0, 1, 3)),
            Some("Section 2 of 3".to_string())
        );
        assert_eq!(
            position_label(&book, at(0, 0, 0, 1)),
            Some("Page 1 of 3".to_string())
        );
        assert_eq!(
            position_label(&book, at(0, 1, 0, 1)),
            Some("Page 2 of 3".to_string())
        );
    }
}
