//! 商品处理器

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use validator::Validate;

use super::model::{ListProductsQuery, Product};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    response::{ApiResponse, Page},
};

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ApiResponse<Page<Product>>>, CoreError> {
    query.validate()?;

    let (limit, offset) = (query.limit(), query.offset());
    let items = state.product_service.list_products(limit, offset).await?;
    Ok(Json(ApiResponse::success(Page {
        items,
        limit,
        offset,
    })))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}
