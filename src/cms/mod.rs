//! Host CMS object: the form registry and the view plugins

mod field;
mod form;
mod plugin;
mod registry;

pub use field::{Field, FieldValues};
pub use form::{Form, FormSubmitter, SubmitError};
pub use plugin::{MountedView, ViewEvent, ViewPlugin, ViewRegistry};
pub use registry::{FormRegistry, Subscription};

#[cfg(test)]
pub use form::MockFormSubmitter;

use std::rc::Rc;

/// Shared host state handed to views when they are mounted
#[derive(Default)]
pub struct Cms {
    pub forms: Rc<FormRegistry>,
    pub views: ViewRegistry,
}

impl Cms {
    pub fn new() -> Self {
        Self::default()
    }
}
