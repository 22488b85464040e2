// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    market::MarketError,
    models::WalletConnection,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/wallet/connect",
    tag = "Wallet",
    responses(
        (status = 200, body = WalletConnection),
        (status = 409, description = "User declined the connection"),
        (status = 503, description = "No signer gateway configured")
    )
)]
pub async fn connect_wallet(
    State(state): State<AppState>,
) -> Result<Json<WalletConnection>, ApiError> {
    let signer = state.signer.as_deref().ok_or(MarketError::NoSigner)?;
    let address = signer
        .request_account_access()
        .await
        .map_err(MarketError::from)?;
    Ok(Json(WalletConnection {
        connected: address.is_some(),
        address,
    }))
}
