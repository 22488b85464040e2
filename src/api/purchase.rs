// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{PurchaseReceipt, PurchaseRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/purchase",
    request_body = PurchaseRequest,
    tag = "Purchase",
    responses(
        (status = 200, body = PurchaseReceipt),
        (status = 409, description = "Product unavailable or signature declined"),
        (status = 502, description = "Provider failure"),
        (status = 503, description = "No signer gateway configured")
    )
)]
pub async fn purchase_product(
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseReceipt>, ApiError> {
    let receipt = state
        .engine
        .purchase(&request.product_id, &request.buyer_address)
        .await?;
    Ok(Json(receipt))
}
