//! The pagination engine: a state machine over reading positions.
//!
//! Navigation is decided against the book's page topology and the last
//! committed column measurement. Measurements arrive asynchronously from
//! the renderer, so commits carry a token from the pass that produced
//! them; a commit whose token is stale loses to the newer layout and is
//! dropped. Arriving on a text page from the following page places the
//! reader on its last column, which is only known after measurement, so
//! that placement is kept as a one-shot intent consumed by the next
//! commit.

use tracing::warn;

use crate::book::Book;

/// What the reader is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The book-level cover, shown before any chapter.
    BookCover,
    /// The table of contents.
    Index,
    /// A page inside a chapter.
    Page(Position),
}

/// A concrete reading position. `column` is always 0 and `column_count`
/// always 1 on non-text pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub chapter: usize,
    pub page: usize,
    pub column: usize,
    pub column_count: usize,
}

/// Ticket tying a column commit to the layout pass that measured it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureToken(u64);

/// One-shot column placement honored by the next measurement commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnIntent {
    LastColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Text,
    Other,
}

#[derive(Debug)]
pub struct PaginationEngine {
    chapters: Vec<Vec<PageKind>>,
    has_cover: bool,
    has_index: bool,
    view: View,
    pending: Option<ColumnIntent>,
    issued_seq: u64,
    committed_seq: u64,
}

impl PaginationEngine {
    pub fn new(book: &Book) -> Self {
        let chapters = book
            .chapters
            .iter()
            .map(|c| {
                c.pages
                    .iter()
                    .map(|p| {
                        if p.is_text() {
                            PageKind::Text
                        } else {
                            PageKind::Other
                        }
                    })
                    .collect()
            })
            .collect();
        let mut engine = Self {
            chapters,
            has_cover: book.cover.is_some(),
            has_index: book.index.is_some(),
            view: View::BookCover,
            pending: None,
            issued_seq: 0,
            committed_seq: 0,
        };
        if engine.has_cover {
            engine.view = View::BookCover;
        } else if engine.has_index {
            engine.view = View::Index;
        } else {
            engine.enter_first_page();
        }
        engine
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn position(&self) -> Option<Position> {
        match self.view {
            View::Page(pos) => Some(pos),
            _ => None,
        }
    }

    /// Advance one step: next column, then next page, then next chapter.
    /// At the end of the book this is a no-op.
    pub fn next(&mut self) {
        match self.view {
            View::BookCover => {
                if self.has_index {
                    self.view = View::Index;
                } else {
                    self.enter_first_page();
                }
            }
            View::Index => self.enter_first_page(),
            View::Page(pos) => {
                if self.is_text(pos.chapter, pos.page) && pos.column + 1 < pos.column_count {
                    self.view = View::Page(Position {
                        column: pos.column + 1,
                        ..pos
                    });
                } else if pos.page + 1 < self.pages_in(pos.chapter) {
                    self.enter_page(pos.chapter, pos.page + 1, None);
                } else if let Some(next) = self.next_readable_chapter(pos.chapter) {
                    self.enter_page(next, 0, None);
                }
            }
        }
    }

    /// Step back one unit, mirroring [`next`](Self::next). Stepping back
    /// onto a text page lands on its last column once measured. On the
    /// book cover this is a no-op.
    pub fn previous(&mut self) {
        match self.view {
            View::BookCover => {}
            View::Index => {
                if self.has_cover {
                    self.view = View::BookCover;
                }
            }
            View::Page(pos) => {
                let at_first_position = Some(pos.chapter) == self.first_readable_chapter()
                    && pos.page == 0
                    && pos.column == 0;
                if at_first_position {
                    if self.has_index {
                        self.view = View::Index;
                    } else if self.has_cover {
                        self.view = View::BookCover;
                    }
                    return;
                }
                if self.is_text(pos.chapter, pos.page) && pos.column > 0 {
                    self.view = View::Page(Position {
                        column: pos.column - 1,
                        ..pos
                    });
                } else if pos.page > 0 {
                    self.enter_page(pos.chapter, pos.page - 1, Some(ColumnIntent::LastColumn));
                } else if let Some(prev) = self.prev_readable_chapter(pos.chapter) {
                    let last = self.pages_in(prev).saturating_sub(1);
                    self.enter_page(prev, last, Some(ColumnIntent::LastColumn));
                }
            }
        }
    }

    /// Jump to the first page of a chapter, as from the index. Out of
    /// range chapters clamp to the last one; a chapter with no pages
    /// falls through to the nearest readable one.
    pub fn jump_to_chapter(&mut self, chapter: usize) {
        if self.chapters.is_empty() {
            warn!("jump requested but the book has no chapters");
            return;
        }
        let mut target = chapter.min(self.chapters.len() - 1);
        if target != chapter {
            warn!(chapter, target, "chapter out of range, clamping");
        }
        if self.chapters[target].is_empty() {
            warn!(chapter = target, "chapter has no pages, jumping to the nearest readable one");
            match self
                .next_readable_chapter(target)
                .or_else(|| self.prev_readable_chapter(target))
            {
                Some(readable) => target = readable,
                None => {
                    warn!("book has no readable pages");
                    return;
                }
            }
        }
        self.enter_page(target, 0, None);
    }

    pub fn jump_to_cover(&mut self) {
        if self.has_cover {
            self.pending = None;
            self.view = View::BookCover;
        } else {
            warn!("book has no cover");
        }
    }

    pub fn jump_to_index(&mut self) {
        if self.has_index {
            self.pending = None;
            self.view = View::Index;
        } else {
            warn!("book has no index");
        }
    }

    /// Re-enter a saved position, clamping anything out of range.
    pub fn restore_position(&mut self, chapter: usize, page: usize) {
        if self.chapters.is_empty() {
            return;
        }
        let chapter = chapter.min(self.chapters.len() - 1);
        match self.pages_in(chapter) {
            0 => self.jump_to_chapter(chapter),
            n => self.enter_page(chapter, page.min(n - 1), None),
        }
    }

    /// True when the current text page has no trusted column measurement.
    pub fn needs_measure(&self) -> bool {
        match self.view {
            View::Page(pos) => {
                self.is_text(pos.chapter, pos.page) && self.committed_seq != self.issued_seq
            }
            _ => false,
        }
    }

    /// Token for the current layout pass. Pair it with the measurement
    /// taken in the same pass when calling
    /// [`commit_columns`](Self::commit_columns).
    pub fn measure_token(&self) -> MeasureToken {
        MeasureToken(self.issued_seq)
    }

    /// Invalidate committed column counts after a resize or a settings
    /// change. The current position keeps rendering with its old count
    /// until a fresh commit arrives.
    pub fn invalidate_columns(&mut self) {
        self.issued_seq += 1;
    }

    /// Commit a column measurement for the current text page. Stale
    /// tokens lose to the newest layout pass and are dropped. A pending
    /// last-column intent is consumed here; otherwise the column index
    /// is clamped into the new count.
    pub fn commit_columns(&mut self, token: MeasureToken, measured: usize) {
        if token.0 != self.issued_seq {
            warn!(
                token = token.0,
                current = self.issued_seq,
                "dropping stale column measurement"
            );
            return;
        }
        let View::Page(pos) = self.view else {
            warn!("column measurement arrived outside a reading view");
            return;
        };
        if !self.is_text(pos.chapter, pos.page) {
            warn!(
                chapter = pos.chapter,
                page = pos.page,
                "column measurement on a non-text page"
            );
            return;
        }
        let count = if measured == 0 {
            warn!("measured zero columns, assuming one");
            1
        } else {
            measured
        };
        self.committed_seq = token.0;
        let column = match self.pending.take() {
            Some(ColumnIntent::LastColumn) => count - 1,
            None => pos.column.min(count - 1),
        };
        self.view = View::Page(Position {
            column,
            column_count: count,
            ..pos
        });
    }

    fn enter_page(&mut self, chapter: usize, page: usize, intent: Option<ColumnIntent>) {
        let is_text = self.is_text(chapter, page);
        self.pending = if is_text { intent } else { None };
        self.view = View::Page(Position {
            chapter,
            page,
            column: 0,
            column_count: 1,
        });
        if is_text {
            self.issued_seq += 1;
        }
    }

    fn enter_first_page(&mut self) {
        match self.first_readable_chapter() {
            Some(chapter) => self.enter_page(chapter, 0, None),
            None => {
                warn!("book has no readable pages");
                self.pending = None;
                self.view = View::Page(Position {
                    chapter: 0,
                    page: 0,
                    column: 0,
                    column_count: 1,
                });
            }
        }
    }

    fn first_readable_chapter(&self) -> Option<usize> {
        self.chapters.iter().position(|c| !c.is_empty())
    }

    fn next_readable_chapter(&self, after: usize) -> Option<usize> {
        (after + 1..self.chapters.len()).find(|&i| !self.chapters[i].is_empty())
    }

    fn prev_readable_chapter(&self, before: usize) -> Option<usize> {
        (0..before.min(self.chapters.len())).rev().find(|&i| !self.chapters[i].is_empty())
    }

    fn pages_in(&self, chapter: usize) -> usize {
        self.chapters.get(chapter).map_or(0, Vec::len)
    }

    fn is_text(&self, chapter: usize, page: usize) -> bool {
        matches!(
            self.chapters
                .get(chapter)
                .and_then(|c| c.get(page))
                .copied(),
            Some(PageKind::Text)
        )
    }
}
