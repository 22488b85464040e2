// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::ApiError, models::ProductProvenance, state::AppState};

#[utoipa::path(
    get,
    path = "/v1/products/{product_id}/provenance",
    params(("product_id" = String, Path, description = "Product identifier")),
    tag = "Provenance",
    responses((status = 200, body = ProductProvenance), (status = 404))
)]
pub async fn get_history(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductProvenance>, ApiError> {
    let market = state.market.read().await;
    market
        .history(&product_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No provenance recorded for this product"))
}
