// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{
        CreateProductRequest, DeleteProductRequest, Product, UpdateProductRequest, WalletAddress,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/products",
    tag = "Catalog",
    responses((status = 200, body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let market = state.market.read().await;
    Json(market.list_products())
}

#[utoipa::path(
    get,
    path = "/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product identifier")),
    tag = "Catalog",
    responses((status = 200, body = Product), (status = 404))
)]
pub async fn get_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Product>, ApiError> {
    let market = state.market.read().await;
    market
        .product_by_id(&product_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

#[utoipa::path(
    post,
    path = "/v1/products",
    request_body = CreateProductRequest,
    tag = "Catalog",
    responses((status = 201, body = Product), (status = 422), (status = 409))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state
        .engine
        .create_product(request.data, &request.artisan_address)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product identifier")),
    request_body = UpdateProductRequest,
    tag = "Catalog",
    responses((status = 200, body = Product), (status = 403), (status = 404))
)]
pub async fn update_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let mut market = state.market.write().await;
    let product = market.update_product(&product_id, request.update, &request.artisan_address)?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product identifier")),
    request_body = DeleteProductRequest,
    tag = "Catalog",
    responses((status = 204), (status = 403), (status = 404))
)]
pub async fn delete_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<DeleteProductRequest>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.write().await;
    market.remove_product(&product_id, &request.artisan_address)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/artisans/{address}/products",
    params(("address" = String, Path, description = "Artisan wallet address")),
    tag = "Catalog",
    responses((status = 200, body = [Product]))
)]
pub async fn list_artisan_products(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<Product>> {
    let market = state.market.read().await;
    Json(market.products_by_artisan(&WalletAddress::from(address)))
}
