// src/server/handlers/recipes.rs
//! Recipe CRUD handlers

use crate::server::problem::{ApiError, ApiResult};
use crate::server::SharedState;
use crate::store::{Recipe, RecipePayload, StoreError};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

/// Record a failed store call and convert it for the response
fn reject(state: &SharedState, err: StoreError, instance: String) -> ApiError {
    if err.is_validation() {
        state.metrics.record_validation_error();
    } else if err.is_not_found() {
        state.metrics.record_not_found();
    }
    warn!("{} rejected: {}", instance, err);
    ApiError::from(err).with_instance(instance)
}

fn parse_body(
    state: &SharedState,
    body: Result<Json<RecipePayload>, JsonRejection>,
    instance: &str,
) -> ApiResult<RecipePayload> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            state.metrics.record_bad_request();
            warn!("{} rejected: {}", instance, rejection.body_text());
            Err(ApiError::from(rejection).with_instance(instance))
        }
    }
}

/// List all recipes
///
/// GET /recipes
pub async fn list_recipes(State(state): State<SharedState>) -> Json<Vec<Recipe>> {
    state.metrics.record_request();
    Json(state.store.list())
}

/// Get a single recipe
///
/// GET /recipes/:id
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    state.metrics.record_request();
    debug!("Fetching recipe {}", id);

    state
        .store
        .get(&id)
        .map(Json)
        .map_err(|e| reject(&state, e, format!("/recipes/{}", id)))
}

/// Create a recipe
///
/// POST /recipes
///
/// Responds 201 with the stored recipe and a `Location` header.
pub async fn create_recipe(
    State(state): State<SharedState>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> ApiResult<Response> {
    state.metrics.record_request();
    let payload = parse_body(&state, body, "/recipes")?;

    let recipe = state
        .store
        .create(payload)
        .map_err(|e| reject(&state, e, "/recipes".to_string()))?;
    state.metrics.record_created();

    let location = format!("/recipes/{}", recipe.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(recipe),
    )
        .into_response())
}

/// Replace a recipe's name and ingredients
///
/// PUT /recipes/:id
pub async fn update_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> ApiResult<Json<Recipe>> {
    state.metrics.record_request();
    let instance = format!("/recipes/{}", id);
    let payload = parse_body(&state, body, &instance)?;

    let recipe = state
        .store
        .update(&id, payload)
        .map_err(|e| reject(&state, e, instance))?;
    state.metrics.record_updated();

    Ok(Json(recipe))
}

/// Delete a recipe
///
/// DELETE /recipes/:id
///
/// Responds 204 whether or not the recipe existed, unless the store
/// runs with the strict delete policy.
pub async fn delete_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.metrics.record_request();

    let removed = state
        .store
        .delete(&id)
        .map_err(|e| reject(&state, e, format!("/recipes/{}", id)))?;
    if removed {
        state.metrics.record_deleted();
    }

    Ok(StatusCode::NO_CONTENT)
}
