//! Data model for interactive digital books.
//!
//! A book is a flat list of chapters, each a list of pages. Pages come in
//! several kinds: prose rendered in columns, an embedded chat, a reader
//! form, an audio interview, and decorative cover pages. Front matter
//! (book cover, index) lives outside the chapter list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Page>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: String::new(),
            year: 0,
            cover: None,
            index: None,
            chapters: Vec::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    pub fn with_cover(mut self, cover: Page) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn with_index(mut self, index: Page) -> Self {
        self.index = Some(index);
        self
    }

    pub fn add_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn page(&self, chapter: usize, page: usize) -> Option<&Page> {
        self.chapters.get(chapter)?.pages.get(page)
    }

    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }

    /// Print-style page number a chapter starts on, as shown in the index.
    /// Front matter counts too: the cover is page 1 when present and the
    /// index follows it.
    pub fn chapter_start_page(&self, chapter: usize) -> usize {
        let mut start = 1;
        if self.cover.is_some() {
            start += 1;
        }
        if self.index.is_some() {
            start += 1;
        }
        start
            + self
                .chapters
                .iter()
                .take(chapter)
                .map(|c| c.pages.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    pub fn add_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }
}

/// A single page of a chapter (or front matter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Page {
    /// Prose content, HTML, laid out in columns.
    Text { content: String },
    /// Embedded discussion assistant for the surrounding chapter.
    Chatbot {
        #[serde(default)]
        config: ChatbotConfig,
    },
    /// Reader response form.
    Form { title: String, fields: Vec<FormField> },
    /// Audio interview with an HTML transcript.
    Audio { url: String, content: String },
    /// Decorative cover. `is_book_cover` marks the book-level cover;
    /// chapter-level covers leave it false.
    Cover {
        title: String,
        #[serde(default)]
        is_book_cover: bool,
    },
    /// Table of contents page.
    Index { title: String },
}

impl Page {
    pub fn text(content: impl Into<String>) -> Self {
        Page::Text {
            content: content.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Page::Text { .. })
    }

    /// Short label for status lines and logs.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Page::Text { .. } => "text",
            Page::Chatbot { .. } => "chatbot",
            Page::Form { .. } => "form",
            Page::Audio { .. } => "audio",
            Page::Cover { .. } => "cover",
            Page::Index { .. } => "index",
        }
    }
}

/// Optional prompt overrides for a chatbot page. All fields fall back to
/// built-in defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

/// One field of a reader form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormField {
    Text {
        id: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default)]
        multiline: bool,
    },
    Number {
        id: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        id: String,
        label: String,
        options: Vec<String>,
    },
    Checkboxes {
        id: String,
        label: String,
        options: Vec<String>,
    },
}

impl FormField {
    pub fn id(&self) -> &str {
        match self {
            FormField::Text { id, .. }
            | FormField::Number { id, .. }
            | FormField::Select { id, .. }
            | FormField::Checkboxes { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormField::Text { label, .. }
            | FormField::Number { label, .. }
            | FormField::Select { label, .. }
            | FormField::Checkboxes { label, .. } => label,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            FormField::Select { options, .. } | FormField::Checkboxes { options, .. } => options,
            _ => &[],
        }
    }
}

/// A reader's answer to one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Choices(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            FieldValue::Choices(c) => Some(c),
            _ => None,
        }
    }

    /// True for empty strings and empty choice lists.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Choices(c) => c.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_chapter_book() -> Book {
        Book::new("b1", "Test Book")
            .with_cover(Page::Cover {
                title: "Test Book".to_string(),
                is_book_cover: true,
            })
            .with_index(Page::Index {
                title: "Contents".to_string(),
            })
            .add_chapter(
                Chapter::new("One")
                    .add_page(Page::text("<p>a</p>"))
                    .add_page(Page::Chatbot {
                        config: ChatbotConfig::default(),
                    }),
            )
            .add_chapter(Chapter::new("Two").add_page(Page::text("<p>b</p>")))
    }

    #[test]
    fn page_lookup_and_counts() {
        let book = two_chapter_book();
        assert_eq!(book.page_count(), 3);
        assert!(book.page(0, 1).is_some());
        assert!(book.page(0, 2).is_none());
        assert!(book.page(9, 0).is_none());
    }

    #[test]
    fn chapter_start_pages_account_for_front_matter() {
        let book = two_chapter_book();
        // Cover is page 1, index page 2, chapter one starts on 3.
        assert_eq!(book.chapter_start_page(0), 3);
        // Chapter one holds two pages, so chapter two starts on 5.
        assert_eq!(book.chapter_start_page(1), 5);
    }

    #[test]
    fn chapter_start_pages_without_front_matter() {
        let mut book = two_chapter_book();
        book.cover = None;
        book.index = None;
        assert_eq!(book.chapter_start_page(0), 1);
        assert_eq!(book.chapter_start_page(1), 3);
    }

    #[test]
    fn pages_deserialize_by_type_tag() {
        let page: Page = serde_json::from_str(r#"{"type":"text","content":"<p>hi</p>"}"#).unwrap();
        assert!(page.is_text());

        let page: Page =
            serde_json::from_str(r#"{"type":"cover","title":"X","is_book_cover":true}"#).unwrap();
        assert_eq!(page.kind_label(), "cover");

        let page: Page = serde_json::from_str(
            r#"{"type":"audio","url":"https://example.com/a.mp3","content":"<p>t</p>"}"#,
        )
        .unwrap();
        assert_eq!(page.kind_label(), "audio");
    }

    #[test]
    fn chatbot_page_tolerates_missing_config() {
        let page: Page = serde_json::from_str(r#"{"type":"chatbot"}"#).unwrap();
        match page {
            Page::Chatbot { config } => assert_eq!(config, ChatbotConfig::default()),
            other => panic!("expected chatbot, got {}", other.kind_label()),
        }
    }

    #[test]
    fn form_fields_deserialize_each_kind() {
        let json = r#"[
            {"type":"text","id":"t","label":"Thoughts","multiline":true},
            {"type":"number","id":"n","label":"Rating","min":1.0,"max":5.0},
            {"type":"select","id":"s","label":"Pick","options":["a","b"]},
            {"type":"checkboxes","id":"c","label":"All that apply","options":["x","y"]}
        ]"#;
        let fields: Vec<FormField> = serde_json::from_str(json).unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].id(), "t");
        assert_eq!(fields[2].options(), ["a", "b"]);
        assert!(fields[0].options().is_empty());
    }

    #[test]
    fn field_values_serialize_untagged() {
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("hi".to_string())).unwrap(),
            r#""hi""#
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Number(4.0)).unwrap(),
            "4.0"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Choices(vec!["a".to_string()])).unwrap(),
            r#"["a"]"#
        );
    }

    #[test]
    fn field_value_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Choices(Vec::new()).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
    }
}
