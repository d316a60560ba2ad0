//! Binding between the resolver and the form that owns the address field

use std::collections::HashMap;
use tracing::info;

use crate::location::{
    resolver::{FetchTicket, LocationResolver, Step},
    types::LocationValue,
};

/// Accessor/mutator pair of the host form
pub trait FormState {
    fn value(&self, field: &str) -> Option<String>;
    fn set_value(&mut self, field: &str, value: String);
}

/// Form state kept in a map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryForm {
    fields: HashMap<String, String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

impl FormState for MemoryForm {
    fn value(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set_value(&mut self, field: &str, value: String) {
        self.fields.insert(field.to_string(), value);
    }
}

/// Names of the two form fields the location is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationField {
    pub value_field: String,
    pub label_field: String,
}

impl Default for LocationField {
    fn default() -> Self {
        Self::new("location", "location_label")
    }
}

impl LocationField {
    pub fn new(value_field: impl Into<String>, label_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            label_field: label_field.into(),
        }
    }

    /// Restore whatever the form already holds. Call once when the form
    /// is opened; the resolver ignores any later restore.
    pub fn mount<F>(&self, form: &F, resolver: &mut LocationResolver) -> Step
    where
        F: FormState + ?Sized,
    {
        match form.value(&self.value_field) {
            Some(saved) if !saved.trim().is_empty() => resolver.restore(&saved),
            _ => Step::default(),
        }
    }

    pub fn publish<F>(&self, form: &mut F, value: &LocationValue)
    where
        F: FormState + ?Sized,
    {
        info!("Publishing location {:?} to {}", value.value, self.value_field);
        form.set_value(&self.value_field, value.value.clone());
        form.set_value(&self.label_field, value.label.clone());
    }

    /// Write a step's published value, if any, and hand back its lookup
    pub fn commit<F>(&self, form: &mut F, step: Step) -> Option<FetchTicket>
    where
        F: FormState + ?Sized,
    {
        if let Some(value) = &step.publish {
            self.publish(form, value);
        }
        step.fetch
    }
}
