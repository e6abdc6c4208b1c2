//! Reader response forms: per-page answer state, the in-memory record of
//! submitted forms, and the submission transport.

pub mod client;
pub mod session;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::book::FieldValue;

pub use client::{FormClient, FormError};
pub use session::{FormSession, SubmittedForms};

/// Submission body for `/api/form-response`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub book_id: String,
    pub chapter_title: String,
    pub form_title: String,
    pub responses: BTreeMap<String, FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn submission_serializes_with_camel_case_keys() {
        let mut responses = BTreeMap::new();
        responses.insert("rating".to_string(), FieldValue::Number(4.0));
        responses.insert(
            "duties".to_string(),
            FieldValue::Choices(vec!["Polishing the lens".to_string()]),
        );
        let submission = FormSubmission {
            book_id: "field-notes".to_string(),
            chapter_title: "The Winter Light".to_string(),
            form_title: "Reader survey".to_string(),
            responses,
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["bookId"], "field-notes");
        assert_eq!(json["chapterTitle"], "The Winter Light");
        assert_eq!(json["formTitle"], "Reader survey");
        assert_eq!(json["responses"]["rating"], 4.0);
        assert_eq!(json["responses"]["duties"][0], "Polishing the lens");
    }
}
