// src/store/recipe.rs

//! Recipe entity and the payloads used to create and update it

use super::error::StoreError;
use serde::{Deserialize, Serialize};

/// Store-assigned recipe identifier
pub type RecipeId = String;

/// A stored recipe
///
/// Serializes to an object with exactly `id`, `name` and `ingredients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier assigned at creation, never changes
    pub id: RecipeId,
    /// Display name
    pub name: String,
    /// Ingredients in caller order
    pub ingredients: Vec<String>,
}

impl Recipe {
    fn from_parts(id: RecipeId, recipe: NewRecipe) -> Self {
        Self {
            id,
            name: recipe.name,
            ingredients: recipe.ingredients,
        }
    }
}

/// A validated recipe body without an identifier
///
/// Used for seed data and as the output of payload validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn new<S: Into<String>>(name: S, ingredients: &[&str]) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        }
    }

    pub(crate) fn with_id(self, id: RecipeId) -> Recipe {
        Recipe::from_parts(id, self)
    }
}

/// Request body for create and update
///
/// Every field is optional at the wire level so that a missing field is
/// reported by [`RecipePayload::validate`] instead of failing deserialization.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

impl RecipePayload {
    pub fn new<S: Into<String>>(name: S, ingredients: &[&str]) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            ingredients: Some(ingredients.iter().map(|i| i.to_string()).collect()),
        }
    }

    /// Attach an `id` to the payload (as an update body would carry it)
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check that `name` and `ingredients` are both present
    ///
    /// The error lists every missing field, in declaration order.
    pub fn validate(self) -> Result<NewRecipe, StoreError> {
        match (self.name, self.ingredients) {
            (Some(name), Some(ingredients)) => Ok(NewRecipe { name, ingredients }),
            (name, ingredients) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if ingredients.is_none() {
                    missing.push("ingredients");
                }
                Err(StoreError::Validation { missing })
            }
        }
    }
}

impl From<NewRecipe> for RecipePayload {
    fn from(recipe: NewRecipe) -> Self {
        Self {
            id: None,
            name: Some(recipe.name),
            ingredients: Some(recipe.ingredients),
        }
    }
}

/// Recipes present when a store starts without explicit seed data
pub fn default_seed() -> Vec<NewRecipe> {
    vec![
        NewRecipe::new(
            "boiled white rice",
            &["1 cup white rice", "2 cups water", "pinch of salt"],
        ),
        NewRecipe::new(
            "milkshake",
            &["2 tbsp cocoa", "2 cups vanilla ice cream", "1 cup milk"],
        ),
    ]
}
