//! Forms registered with the CMS

use super::field::{Field, FieldValues};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Error returned when a form fails to persist its values
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form `{form}` could not be saved")]
    Persist {
        form: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Persists the values of a submitted form
#[cfg_attr(test, mockall::automock)]
pub trait FormSubmitter {
    fn submit(&self, form: &str, values: &FieldValues) -> Result<(), SubmitError>;
}

/// A named collection of fields with a submit action
pub struct Form {
    name: String,
    fields: Vec<Field>,
    values: RefCell<FieldValues>,
    submitter: Rc<dyn FormSubmitter>,
}

impl Form {
    pub fn new(name: impl Into<String>, fields: Vec<Field>, submitter: Rc<dyn FormSubmitter>) -> Self {
        Self {
            name: name.into(),
            fields,
            values: RefCell::new(FieldValues::new()),
            submitter,
        }
    }

    /// Seed the form with initial values
    pub fn with_values(self, values: FieldValues) -> Self {
        *self.values.borrow_mut() = values;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Current value of a field (empty when never set)
    pub fn value(&self, field: &str) -> String {
        self.values.borrow().get(field).cloned().unwrap_or_default()
    }

    /// Snapshot of all current values
    pub fn values(&self) -> FieldValues {
        self.values.borrow().clone()
    }

    /// Replace the value of a field
    #[cfg(test)]
    pub fn change(&self, field: &str, value: String) {
        self.values.borrow_mut().insert(field.to_string(), value);
    }

    /// Append a character to a field value
    pub fn push_char(&self, field: &str, c: char) {
        self.values
            .borrow_mut()
            .entry(field.to_string())
            .or_default()
            .push(c);
    }

    /// Remove the last character from a field value
    pub fn pop_char(&self, field: &str) {
        if let Some(value) = self.values.borrow_mut().get_mut(field) {
            value.pop();
        }
    }

    /// Hand the current values to the submitter
    pub fn submit(&self) -> Result<(), SubmitError> {
        let values = self.values();
        tracing::debug!(form = %self.name, fields = values.len(), "Submitting form");
        self.submitter.submit(&self.name, &values)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("values", &self.values.borrow())
            .finish_non_exhaustive()
    }
}
