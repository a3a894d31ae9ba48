// src/store/mod.rs

//! In-memory recipe store
//!
//! The store owns the recipe collection and enforces the CRUD contract:
//! - `create` assigns a fresh id that no recipe in this store has ever held
//! - `update` replaces `name` and `ingredients`, the id never changes
//! - `delete` removes permanently; deleting an unknown id follows [`DeletePolicy`]
//! - `list` returns recipes in insertion order
//!
//! Every operation runs under one `RwLock`, so id allocation and the
//! mutation that uses the id happen in the same critical section.

mod error;
mod id;
mod recipe;

pub use error::{StoreError, StoreResult};
pub use id::{IdGenerator, IdScheme, SequentialIds, UuidGenerator};
pub use recipe::{default_seed, NewRecipe, Recipe, RecipeId, RecipePayload};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Candidate ids drawn from the generator before giving up
const MAX_ID_ATTEMPTS: usize = 16;

/// Behavior of `delete` when the id is not in the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Deleting an unknown id succeeds without effect
    #[default]
    Idempotent,
    /// Deleting an unknown id fails with `NotFound`
    Strict,
}

struct Collection {
    recipes: Vec<Recipe>,
    /// Every id this store has handed out, including deleted ones
    ///
    /// Only kept when the generator may repeat itself, otherwise empty.
    /// It grows by one entry per create and is never pruned.
    issued: HashSet<RecipeId>,
}

impl Collection {
    fn position(&self, id: &str) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == id)
    }
}

/// Owner of the recipe collection
pub struct RecipeStore {
    inner: RwLock<Collection>,
    ids: Box<dyn IdGenerator>,
    track_issued: bool,
    delete_policy: DeletePolicy,
}

impl RecipeStore {
    /// Create an empty store
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        let track_issued = !ids.never_repeats();
        Self {
            inner: RwLock::new(Collection {
                recipes: Vec::new(),
                issued: HashSet::new(),
            }),
            ids,
            track_issued,
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Create a store pre-populated with `seed`, in order
    pub fn seeded(ids: Box<dyn IdGenerator>, seed: Vec<NewRecipe>) -> StoreResult<Self> {
        let store = Self::new(ids);
        for recipe in seed {
            store.insert(recipe)?;
        }
        Ok(store)
    }

    /// Set the policy for deleting unknown ids
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// All recipes in insertion order
    pub fn list(&self) -> Vec<Recipe> {
        let inner = self.inner.read();
        debug!("Listing {} recipes", inner.recipes.len());
        inner.recipes.clone()
    }

    /// A single recipe by id
    pub fn get(&self, id: &str) -> StoreResult<Recipe> {
        let inner = self.inner.read();
        inner
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Store a new recipe under a freshly assigned id
    ///
    /// Any `id` in the payload is ignored.
    pub fn create(&self, payload: RecipePayload) -> StoreResult<Recipe> {
        let recipe = payload.validate()?;
        self.insert(recipe)
    }

    fn insert(&self, recipe: NewRecipe) -> StoreResult<Recipe> {
        let mut inner = self.inner.write();

        let id = self.allocate_id(&inner)?;
        if self.track_issued {
            inner.issued.insert(id.clone());
        }

        let recipe = recipe.with_id(id);
        inner.recipes.push(recipe.clone());

        info!("Created recipe {} ({})", recipe.id, recipe.name);
        Ok(recipe)
    }

    fn allocate_id(&self, inner: &Collection) -> StoreResult<RecipeId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            let taken =
                inner.position(&candidate).is_some() || inner.issued.contains(&candidate);
            if !taken {
                return Ok(candidate);
            }
            debug!("Id generator produced already issued id {}", candidate);
        }
        Err(StoreError::IdsExhausted(MAX_ID_ATTEMPTS))
    }

    /// Replace `name` and `ingredients` of an existing recipe
    ///
    /// The payload may carry `id`; if it does it must equal `id`.
    /// The payload is validated before the recipe is looked up.
    pub fn update(&self, id: &str, payload: RecipePayload) -> StoreResult<Recipe> {
        if let Some(body_id) = payload.id.as_deref() {
            if body_id != id {
                return Err(StoreError::IdMismatch {
                    path: id.to_string(),
                    body: body_id.to_string(),
                });
            }
        }
        let NewRecipe { name, ingredients } = payload.validate()?;

        let mut inner = self.inner.write();
        let pos = inner
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let recipe = &mut inner.recipes[pos];
        recipe.name = name;
        recipe.ingredients = ingredients;

        info!("Updated recipe {} ({})", recipe.id, recipe.name);
        Ok(recipe.clone())
    }

    /// Remove a recipe
    ///
    /// Returns whether a recipe was removed. Under [`DeletePolicy::Strict`]
    /// an unknown id is `NotFound` instead of `Ok(false)`.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write();

        match inner.position(id) {
            Some(pos) => {
                let removed = inner.recipes.remove(pos);
                info!("Deleted recipe {} ({})", removed.id, removed.name);
                Ok(true)
            }
            None => match self.delete_policy {
                DeletePolicy::Idempotent => {
                    debug!("Delete of unknown recipe {} ignored", id);
                    Ok(false)
                }
                DeletePolicy::Strict => Err(StoreError::NotFound(id.to_string())),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().recipes.is_empty()
    }
}

impl fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeStore")
            .field("recipes", &self.len())
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}
