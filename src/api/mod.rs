// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        Artisan, Collectible, CreateProductRequest, DeleteProductRequest, Product,
        ProductProvenance, ProvenanceEvent, ProvenanceRecord, PurchaseReceipt, PurchaseRequest,
        RegisterArtisanRequest, RegistrationStatus, UpdateProductRequest, WalletAddress,
        WalletConnection,
    },
    state::AppState,
};

pub mod catalog;
pub mod collectibles;
pub mod health;
pub mod identity;
pub mod provenance;
pub mod purchase;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/products/{product_id}",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::delete_product),
        )
        .route(
            "/products/{product_id}/provenance",
            get(provenance::get_history),
        )
        .route("/artisans", post(identity::register_artisan))
        .route("/artisans/{address}", get(identity::get_artisan))
        .route(
            "/artisans/{address}/registered",
            get(identity::registration_status),
        )
        .route(
            "/artisans/{address}/products",
            get(catalog::list_artisan_products),
        )
        .route("/purchase", post(purchase::purchase_product))
        .route(
            "/collectibles/{address}",
            get(collectibles::list_collectibles),
        )
        .route("/wallet/connect", post(wallet::connect_wallet))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog::list_products,
        catalog::get_product,
        catalog::create_product,
        catalog::update_product,
        catalog::delete_product,
        catalog::list_artisan_products,
        identity::register_artisan,
        identity::get_artisan,
        identity::registration_status,
        provenance::get_history,
        purchase::purchase_product,
        collectibles::list_collectibles,
        wallet::connect_wallet,
        health::health
    ),
    components(schemas(
        WalletAddress,
        Artisan,
        RegisterArtisanRequest,
        RegistrationStatus,
        Product,
        CreateProductRequest,
        UpdateProductRequest,
        DeleteProductRequest,
        ProvenanceEvent,
        ProvenanceRecord,
        ProductProvenance,
        Collectible,
        PurchaseRequest,
        PurchaseReceipt,
        WalletConnection,
        health::HealthResponse
    )),
    tags(
        (name = "Catalog", description = "Product listings"),
        (name = "Identity", description = "Artisan registration and lookup"),
        (name = "Provenance", description = "Product lifecycle history"),
        (name = "Purchase", description = "Wallet-driven purchase workflow"),
        (name = "Collectibles", description = "Issued token receipts"),
        (name = "Wallet", description = "Signer gateway access")
    )
)]
struct ApiDoc;
