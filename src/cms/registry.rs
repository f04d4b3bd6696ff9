//! Observable registry of forms
//!
//! Every mutation that changes the registry notifies each subscriber once,
//! after the change is complete. Subscribers receive no payload and re-read
//! the registry through [`FormRegistry::all`].

use super::form::Form;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerSet {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }
}

/// Handle to a registry subscription; unsubscribes when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<ListenerSet>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.id);
            tracing::trace!(id = self.id, "Subscription released");
        }
    }
}

/// The live collection of forms available for editing
#[derive(Default)]
pub struct FormRegistry {
    forms: RefCell<Vec<Rc<Form>>>,
    listeners: Rc<RefCell<ListenerSet>>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all registered forms, in registration order
    pub fn all(&self) -> Vec<Rc<Form>> {
        self.forms.borrow().clone()
    }

    pub fn find(&self, name: &str) -> Option<Rc<Form>> {
        self.forms
            .borrow()
            .iter()
            .find(|form| form.name() == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.forms.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.borrow().is_empty()
    }

    /// Register a form, replacing any form with the same name in place
    #[allow(dead_code)] // Host code registers forms one by one; the content loader uses replace_all
    pub fn add(&self, form: Rc<Form>) {
        {
            let mut forms = self.forms.borrow_mut();
            match forms.iter().position(|f| f.name() == form.name()) {
                Some(index) => forms[index] = form,
                None => forms.push(form),
            }
        }
        self.notify();
    }

    /// Remove a form by name, returning it if it was registered
    #[allow(dead_code)] // Part of the host registry API; no built-in caller unregisters forms
    pub fn remove(&self, name: &str) -> Option<Rc<Form>> {
        let removed = {
            let mut forms = self.forms.borrow_mut();
            let index = forms.iter().position(|f| f.name() == name)?;
            forms.remove(index)
        };
        self.notify();
        Some(removed)
    }

    /// Replace the whole registry with a single notification
    ///
    /// When names repeat, the last form with that name wins and keeps the
    /// position of the first occurrence.
    pub fn replace_all(&self, incoming: Vec<Rc<Form>>) {
        {
            let mut forms = self.forms.borrow_mut();
            forms.clear();
            for form in incoming {
                match forms.iter().position(|f| f.name() == form.name()) {
                    Some(index) => {
                        tracing::warn!(form = %form.name(), "Duplicate form name replaced");
                        forms[index] = form;
                    }
                    None => forms.push(form),
                }
            }
        }
        self.notify();
    }

    /// Register a change callback
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.listeners.borrow_mut().insert(Rc::new(listener));
        tracing::trace!(id, "Subscription acquired");
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().listeners.len()
    }

    fn notify(&self) {
        // Listeners may subscribe or unsubscribe while being called
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::debug!(
            forms = self.len(),
            listeners = snapshot.len(),
            "Form registry changed"
        );
        for listener in snapshot {
            listener();
        }
    }
}
