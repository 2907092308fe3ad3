//! Field-level validation error collection.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation messages keyed by the offending field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// ## Summary
    /// Converts the collection into a result: `Ok(())` when nothing was recorded.
    ///
    /// ## Errors
    /// Returns `self` when at least one field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Records a message if `value` is longer than `max` characters.
    pub fn check_max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("Longer than maximum length {max}."));
        }
    }

    /// Records a message if `value` falls outside `min..=max`.
    pub fn check_range(&mut self, field: &str, value: i32, min: i32, max: i32) {
        if value < min {
            self.add(field, format!("Must be greater than or equal to {min}."));
        } else if value > max {
            self.add(field, format!("Must be less than or equal to {max}."));
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}
