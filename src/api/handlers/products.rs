//! Product routes - public catalogue reads and authenticated seller/admin writes.

use crate::{
    api::{
        AppState,
        extract::{AdminUser, AuthUser, Json, Path},
        responses::{DeleteResult, InsertResult, UpdateResult},
    },
    core::product::{self, NEW_ARRIVALS_LIMIT, NewProduct, ProductChanges},
    entities::{ProductModel, ProductStatus},
    errors::Result,
};
use axum::extract::State;
use serde::Deserialize;

/// Body of `PATCH /changeProductStatus/:id`
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    /// New review state
    pub status: ProductStatus,
}

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(product::get_all_products(&state.database).await?))
}

/// `GET /products/:category`
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(
        product::get_products_by_category(&state.database, &category).await?,
    ))
}

/// `GET /singleProducts/:id` - `null` when absent
pub async fn single_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<ProductModel>>> {
    Ok(Json(product::get_product_by_id(&state.database, id).await?))
}

/// `GET /newProducts`
pub async fn new_products(State(state): State<AppState>) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(
        product::get_newest_products(&state.database, NEW_ARRIVALS_LIMIT).await?,
    ))
}

/// `GET /sellerProducts/:email`
pub async fn seller_products(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(
        product::get_products_by_seller(&state.database, &email).await?,
    ))
}

/// `POST /products` - the caller becomes the seller
pub async fn create_product(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<NewProduct>,
) -> Result<Json<InsertResult>> {
    let created = product::create_product(&state.database, &caller.email, input).await?;
    tracing::info!(product_id = created.id, seller = %caller.email, "product listed");
    Ok(Json(InsertResult::inserted(created.id)))
}

/// `PATCH /products/:id`
pub async fn update_product(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<i64>,
    Json(changes): Json<ProductChanges>,
) -> Result<Json<UpdateResult>> {
    let updated = product::update_product(&state.database, id, changes).await?;
    Ok(Json(UpdateResult::single(updated.is_some())))
}

/// `PATCH /changeProductStatus/:id` - admin only
pub async fn change_product_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(change): Json<StatusChange>,
) -> Result<Json<UpdateResult>> {
    let updated = product::change_product_status(&state.database, id, change.status).await?;
    Ok(Json(UpdateResult::single(updated.is_some())))
}

/// `DELETE /products/:id`
pub async fn delete_product(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResult>> {
    let deleted = product::delete_product(&state.database, id).await?;
    Ok(Json(DeleteResult::deleted(deleted)))
}
