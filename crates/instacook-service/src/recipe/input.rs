//! Recipe request bodies and their validation.

use instacook_core::validation::FieldErrors;
use instacook_db::model::recipe::{NewRecipe, RecipePatch, RecipeReplacement};
use serde::{Deserialize, Deserializer};

pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 256;
pub const DIRECTIONS_MAX: usize = 1000;
pub const SERVINGS_RANGE: (i32, i32) = (1, 50);
pub const COOK_TIME_RANGE: (i32, i32) = (1, 300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Create and replace: `name` is required.
    Full,
    /// Patch: every field is optional, present ones must be valid.
    Partial,
}

/// Editable recipe fields as sent by a client.
///
/// The nullable fields distinguish "absent" (`None`) from "explicitly null"
/// (`Some(None)`). Unknown and read-only fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub num_of_servings: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub cook_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub directions: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RecipeInput {
    /// ## Summary
    /// Checks every present field, and in `Full` mode the required ones.
    ///
    /// ## Errors
    /// Returns all field errors found.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        match self.name.as_deref() {
            Some(name) if name.trim().is_empty() => {
                errors.add("name", format!("Length must be between 1 and {NAME_MAX}."));
            }
            Some(name) => errors.check_max_len("name", name, NAME_MAX),
            None if mode == ValidationMode::Full => {
                errors.add("name", "Missing data for required field.");
            }
            None => {}
        }

        if let Some(Some(description)) = &self.description {
            errors.check_max_len("description", description, DESCRIPTION_MAX);
        }
        if let Some(Some(directions)) = &self.directions {
            errors.check_max_len("directions", directions, DIRECTIONS_MAX);
        }
        if let Some(Some(servings)) = self.num_of_servings {
            errors.check_range("num_of_servings", servings, SERVINGS_RANGE.0, SERVINGS_RANGE.1);
        }
        if let Some(Some(cook_time)) = self.cook_time {
            errors.check_range("cook_time", cook_time, COOK_TIME_RANGE.0, COOK_TIME_RANGE.1);
        }

        errors.into_result()
    }

    fn name(&self) -> &str {
        self.name.as_deref().map_or("", str::trim)
    }

    fn text(field: Option<&Option<String>>) -> &str {
        field.and_then(Option::as_deref).unwrap_or_default()
    }

    /// Insert row for a validated input.
    #[must_use]
    pub fn to_new_recipe(&self, id: uuid::Uuid, owner: uuid::Uuid) -> NewRecipe<'_> {
        NewRecipe {
            id,
            name: self.name(),
            description: Self::text(self.description.as_ref()),
            num_of_servings: self.num_of_servings.flatten(),
            cook_time: self.cook_time.flatten(),
            directions: Self::text(self.directions.as_ref()),
            user_id: owner,
        }
    }

    /// Full replacement for a validated input; absent fields are cleared.
    #[must_use]
    pub fn to_replacement(&self, now: chrono::DateTime<chrono::Utc>) -> RecipeReplacement<'_> {
        RecipeReplacement {
            name: self.name(),
            description: Self::text(self.description.as_ref()),
            num_of_servings: self.num_of_servings.flatten(),
            cook_time: self.cook_time.flatten(),
            directions: Self::text(self.directions.as_ref()),
            updated_at: now,
        }
    }

    /// Partial update touching only the fields present in the input.
    #[must_use]
    pub fn to_patch(&self, now: chrono::DateTime<chrono::Utc>) -> RecipePatch<'_> {
        RecipePatch {
            name: self.name.as_deref().map(str::trim),
            description: self
                .description
                .as_ref()
                .map(|d| d.as_deref().unwrap_or_default()),
            num_of_servings: self.num_of_servings,
            cook_time: self.cook_time,
            directions: self
                .directions
                .as_ref()
                .map(|d| d.as_deref().unwrap_or_default()),
            updated_at: Some(now),
        }
    }
}
