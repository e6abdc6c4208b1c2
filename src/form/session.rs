//! Form answer state.
//!
//! Each form page owns one session for the lifetime of the process. A
//! session moves through editable, submitting, and submitted states;
//! answers lock while a submission is in flight and after it succeeds.
//! Separately, [`SubmittedForms`] records which forms have been submitted
//! this run, and that record outlives Start-a-new-response.

use std::collections::{BTreeMap, HashSet};

use crate::book::FieldValue;

use super::FormSubmission;

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    answers: BTreeMap<String, FieldValue>,
    submitted: bool,
    in_flight: bool,
    error: Option<String>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for a form already recorded as submitted this run.
    pub fn already_submitted() -> Self {
        Self {
            submitted: true,
            ..Self::default()
        }
    }

    pub fn answers(&self) -> &BTreeMap<String, FieldValue> {
        &self.answers
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.answers.get(id)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when edits are currently accepted.
    pub fn is_editable(&self) -> bool {
        !self.submitted && !self.in_flight
    }

    /// Store an answer. Returns false when the form is locked.
    pub fn set_field(&mut self, id: &str, value: FieldValue) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.answers.insert(id.to_string(), value);
        true
    }

    /// Toggle one option of a checkboxes field, preserving click order.
    pub fn toggle_choice(&mut self, id: &str, option: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        let mut choices = match self.answers.get(id) {
            Some(FieldValue::Choices(current)) => current.clone(),
            _ => Vec::new(),
        };
        if let Some(at) = choices.iter().position(|c| c == option) {
            choices.remove(at);
        } else {
            choices.push(option.to_string());
        }
        self.answers.insert(id.to_string(), FieldValue::Choices(choices));
        true
    }

    /// Start a submission. Returns the body to send, or `None` when one
    /// is already running or the form was already submitted.
    pub fn begin_submit(
        &mut self,
        book_id: &str,
        chapter_title: &str,
        form_title: &str,
    ) -> Option<FormSubmission> {
        if self.submitted || self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        Some(FormSubmission {
            book_id: book_id.to_string(),
            chapter_title: chapter_title.to_string(),
            form_title: form_title.to_string(),
            responses: self.answers.clone(),
        })
    }

    /// Apply the submission outcome. Failure keeps the answers editable
    /// with the error surfaced; success locks the form.
    pub fn complete_submit(&mut self, result: Result<(), String>) {
        self.in_flight = false;
        match result {
            Ok(()) => {
                self.submitted = true;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Clear the submitted form for another response. The record of the
    /// earlier submission is kept elsewhere and is not touched.
    pub fn start_new_response(&mut self) {
        if !self.submitted {
            return;
        }
        self.answers.clear();
        self.submitted = false;
        self.error = None;
    }
}

/// Which forms were submitted this run, keyed by book, chapter title,
/// and form title. Process lifetime only; nothing is persisted.
#[derive(Debug, Default)]
pub struct SubmittedForms {
    keys: HashSet<(String, String, String)>,
}

impl SubmittedForms {
    pub fn mark(&mut self, book_id: &str, chapter_title: &str, form_title: &str) {
        self.keys.insert((
            book_id.to_string(),
            chapter_title.to_string(),
            form_title.to_string(),
        ));
    }

    pub fn contains(&self, book_id: &str, chapter_title: &str, form_title: &str) -> bool {
        self.keys.contains(&(
            book_id.to_string(),
            chapter_title.to_string(),
            form_title.to_string(),
        ))
    }
}
