// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! # Domain & API Data Models
//!
//! This module defines the marketplace domain records and the request and
//! response structures used by the REST API. All types derive `Serialize`,
//! `Deserialize`, and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps Ethereum-style addresses. Address
//! equality throughout the marketplace is case-insensitive: registries and
//! ledgers key by [`WalletAddress::canonical`], while stored values preserve
//! the caller-submitted casing.
//!
//! ## Model Categories
//!
//! - **Artisans**: registered seller identities, one per wallet address
//! - **Products**: catalog entries, sellable exactly once
//! - **Provenance**: append-only lifecycle history per product
//! - **Collectibles**: token receipts issued to buyers at purchase time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Provides type safety for wallet addresses throughout the API.
/// Matching is case-insensitive; display preserves the original casing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// Lowercased form used as the lookup key in every registry and ledger.
    pub fn canonical(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive equality.
    pub fn matches(&self, other: &WalletAddress) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Artisan Models
// =============================================================================

/// A registered seller identity tied to one wallet address.
///
/// `id` and `wallet_address` are immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Artisan {
    /// Stable, system-generated identifier.
    pub id: String,
    /// The artisan's wallet address (unique, case-insensitive match key).
    pub wallet_address: WalletAddress,
    /// Public display name.
    pub display_name: String,
    /// Short biography shown on the artisan's profile.
    pub bio: Option<String>,
    /// Region or workshop location.
    pub region: Option<String>,
}

/// Profile fields supplied at registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtisanProfile {
    pub display_name: String,
    pub bio: Option<String>,
    pub region: Option<String>,
}

/// Request to register a new artisan identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterArtisanRequest {
    /// Wallet address claiming the identity.
    pub wallet_address: WalletAddress,
    #[serde(flatten)]
    pub profile: ArtisanProfile,
}

/// Response for a registration lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationStatus {
    pub wallet_address: WalletAddress,
    pub registered: bool,
}

// =============================================================================
// Product Models
// =============================================================================

/// A listed catalog item, sellable once.
///
/// Invariant: `is_sold == true` implies `owner_address` is set and the
/// product's provenance contains a `Sold` entry; `is_sold == false` implies
/// `owner_address` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier, generated at creation.
    pub id: String,
    /// Owning artisan (foreign key into the identity registry).
    pub artisan_id: String,
    pub name: String,
    pub description: String,
    /// Ordered list of materials used.
    pub materials: Vec<String>,
    pub image_url: String,
    /// Listed price as a decimal string in the base currency unit
    /// (e.g. `"0.05"`). Validated positive at creation.
    pub price: String,
    /// Whether the marketplace has verified this listing.
    pub is_verified: bool,
    /// Creation timestamp, immutable.
    pub creation_date: DateTime<Utc>,
    /// Monotonic false→true transition, set by a successful purchase.
    pub is_sold: bool,
    /// Buyer address, set exactly once at sale time (case preserved).
    pub owner_address: Option<WalletAddress>,
}

/// Fields supplied when listing a new product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewProductData {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub materials: Vec<String>,
    pub image_url: String,
    /// Decimal price string, must be positive.
    pub price: String,
}

/// Partial update for an existing product. Unspecified fields are retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub materials: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub price: Option<String>,
}

/// Request to create a product, carrying the claimed artisan address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub artisan_address: WalletAddress,
    #[serde(flatten)]
    pub data: NewProductData,
}

/// Request to update a product, carrying the claimed artisan address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub artisan_address: WalletAddress,
    #[serde(flatten)]
    pub update: ProductUpdate,
}

/// Request to delete a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductRequest {
    pub artisan_address: WalletAddress,
}

// =============================================================================
// Provenance Models
// =============================================================================

/// Lifecycle event kinds recorded in a product's provenance trail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum ProvenanceEvent {
    #[serde(rename = "Created")]
    Created,
    #[serde(rename = "Listed for Sale")]
    Listed,
    #[serde(rename = "Updated")]
    Updated,
    #[serde(rename = "Sold")]
    Sold,
}

impl std::fmt::Display for ProvenanceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProvenanceEvent::Created => "Created",
            ProvenanceEvent::Listed => "Listed for Sale",
            ProvenanceEvent::Updated => "Updated",
            ProvenanceEvent::Sold => "Sold",
        };
        write!(f, "{label}")
    }
}

/// One append-only provenance entry. Never mutated or removed once appended,
/// except by whole-ledger deletion when the owning product is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProvenanceRecord {
    pub event: ProvenanceEvent,
    pub timestamp: DateTime<Utc>,
    pub actor_address: WalletAddress,
    /// Free-text description of the event.
    pub details: String,
}

impl ProvenanceRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        event: ProvenanceEvent,
        actor_address: WalletAddress,
        details: impl Into<String>,
    ) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
            actor_address,
            details: details.into(),
        }
    }
}

/// The full ordered history for one product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProductProvenance {
    pub product_id: String,
    pub records: Vec<ProvenanceRecord>,
}

// =============================================================================
// Collectible Models
// =============================================================================

/// The token receipt issued to a buyer upon purchase. Immutable once issued.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Collectible {
    /// Token identifier; equals the source product id.
    pub token_id: String,
    /// Fixed marketplace registry contract address.
    pub contract_address: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    /// Artisan display name snapshotted at issuance time; not live-updated.
    pub artisan_name: String,
}

// =============================================================================
// Purchase Models
// =============================================================================

/// Request to purchase a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    pub product_id: String,
    pub buyer_address: WalletAddress,
}

/// Successful purchase outcome.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub success: bool,
    pub product_id: String,
    /// Hash of the settled transaction.
    pub tx_hash: String,
}

// =============================================================================
// Wallet Connection Models
// =============================================================================

/// Outcome of a wallet connection attempt. A missing account is not an
/// error: it means no external signer is present or the provider returned
/// no accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalletConnection {
    pub connected: bool,
    pub address: Option<WalletAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_matching_is_case_insensitive() {
        let a = WalletAddress::from("0xAbCd");
        let b = WalletAddress::from("0xabcd");
        assert!(a.matches(&b));
        assert_eq!(a.canonical(), b.canonical());
        // Original casing is preserved for display.
        assert_eq!(a.to_string(), "0xAbCd");
    }

    #[test]
    fn provenance_event_labels() {
        assert_eq!(ProvenanceEvent::Listed.to_string(), "Listed for Sale");
        assert_eq!(ProvenanceEvent::Sold.to_string(), "Sold");
        let json = serde_json::to_string(&ProvenanceEvent::Listed).unwrap();
        assert_eq!(json, r#""Listed for Sale""#);
    }

    #[test]
    fn provenance_record_stamps_current_time() {
        let before = Utc::now();
        let record =
            ProvenanceRecord::new(ProvenanceEvent::Created, "0xA1".into(), "first firing");
        assert!(record.timestamp >= before);
        assert_eq!(record.details, "first firing");
    }
}
