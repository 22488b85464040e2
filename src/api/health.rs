// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status; always "ok" while the process is running.
    pub status: String,
    /// Signer gateway wiring: "ok" when configured, "absent" otherwise.
    /// An absent signer degrades purchases but not browsing.
    pub signer: String,
    /// Number of products currently in the catalog.
    pub products: usize,
}

#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let products = state.market.read().await.list_products().len();
    Json(HealthResponse {
        status: "ok".to_string(),
        signer: if state.signer.is_some() { "ok" } else { "absent" }.to_string(),
        products,
    })
}
