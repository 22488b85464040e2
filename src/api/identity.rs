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
    models::{Artisan, RegisterArtisanRequest, RegistrationStatus, WalletAddress},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/artisans",
    request_body = RegisterArtisanRequest,
    tag = "Identity",
    responses((status = 201, body = Artisan), (status = 409))
)]
pub async fn register_artisan(
    State(state): State<AppState>,
    Json(request): Json<RegisterArtisanRequest>,
) -> Result<(StatusCode, Json<Artisan>), ApiError> {
    let mut market = state.market.write().await;
    let artisan = market.register_artisan(request.profile, request.wallet_address)?;
    Ok((StatusCode::CREATED, Json(artisan)))
}

#[utoipa::path(
    get,
    path = "/v1/artisans/{address}",
    params(("address" = String, Path, description = "Artisan wallet address")),
    tag = "Identity",
    responses((status = 200, body = Artisan), (status = 404))
)]
pub async fn get_artisan(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Artisan>, ApiError> {
    let market = state.market.read().await;
    market
        .find_artisan(&WalletAddress::from(address))
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Artisan not found"))
}

#[utoipa::path(
    get,
    path = "/v1/artisans/{address}/registered",
    params(("address" = String, Path, description = "Wallet address to check")),
    tag = "Identity",
    responses((status = 200, body = RegistrationStatus))
)]
pub async fn registration_status(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Json<RegistrationStatus> {
    let address = WalletAddress::from(address);
    let market = state.market.read().await;
    Json(RegistrationStatus {
        registered: market.is_registered(&address),
        wallet_address: address,
    })
}
