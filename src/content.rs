//! JSON content file backing the form registry
//!
//! Each form loaded from the file submits by writing its values back to the
//! same file and stamping `saved_at`.

use crate::cms::{Field, FieldValues, Form, FormSubmitter, SubmitError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to access content file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("form `{0}` is not defined in the content file")]
    UnknownForm(String),
}

/// A form as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub values: FieldValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Top-level content file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub forms: Vec<FormRecord>,
}

impl ContentFile {
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store the values of a form and stamp the save time
    pub fn record_values(&mut self, form: &str, values: &FieldValues) -> Result<(), ContentError> {
        let record = self
            .forms
            .iter_mut()
            .find(|r| r.name == form)
            .ok_or_else(|| ContentError::UnknownForm(form.to_string()))?;
        record.values = values.clone();
        record.saved_at = Some(Utc::now());
        Ok(())
    }
}

/// Writes submitted values back into a content file
pub struct JsonFileSubmitter {
    path: PathBuf,
}

impl JsonFileSubmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn persist(&self, form: &str, values: &FieldValues) -> Result<(), ContentError> {
        let mut file = ContentFile::load(&self.path)?;
        file.record_values(form, values)?;
        file.save(&self.path)
    }
}

impl FormSubmitter for JsonFileSubmitter {
    fn submit(&self, form: &str, values: &FieldValues) -> Result<(), SubmitError> {
        self.persist(form, values).map_err(|source| SubmitError::Persist {
            form: form.to_string(),
            source: Box::new(source),
        })?;
        tracing::info!(form, path = %self.path.display(), "Form saved");
        Ok(())
    }
}

/// Load the forms of a content file, each submitting back into that file
pub fn load_forms(path: &Path) -> Result<Vec<Rc<Form>>, ContentError> {
    let file = ContentFile::load(path)?;
    let submitter: Rc<dyn FormSubmitter> = Rc::new(JsonFileSubmitter::new(path));
    let forms = file
        .forms
        .into_iter()
        .map(|record| {
            Rc::new(
                Form::new(record.name, record.fields, Rc::clone(&submitter))
                    .with_values(record.values),
            )
        })
        .collect::<Vec<_>>();
    tracing::info!(forms = forms.len(), path = %path.display(), "Loaded content file");
    Ok(forms)
}
