//! `GET /category`

use crate::{
    api::{AppState, extract::Json},
    core::category,
    entities::CategoryModel,
    errors::Result,
};
use axum::extract::State;

/// Lists every category.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryModel>>> {
    Ok(Json(category::get_all_categories(&state.database).await?))
}
