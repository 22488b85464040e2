// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    models::{Collectible, WalletAddress},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/collectibles/{address}",
    params(("address" = String, Path, description = "Holder wallet address")),
    tag = "Collectibles",
    responses((status = 200, body = [Collectible]))
)]
pub async fn list_collectibles(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<Collectible>> {
    let market = state.market.read().await;
    Json(market.collectibles(&WalletAddress::from(address)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_for_unknown_address() {
        let state = AppState::default();
        let Json(held) = list_collectibles(Path("0xNobody".into()), State(state)).await;
        assert!(held.is_empty());
    }
}
