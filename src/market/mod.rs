// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! # Marketplace Core
//!
//! The transactional state-management core: an explicit store object owning
//! the authoritative in-memory collections (identity registry, catalog,
//! provenance ledger, ownership ledger). Operations behave like atomic,
//! authenticated transactions even though no real chain exists.
//!
//! ## Components
//!
//! - [`identity::IdentityRegistry`] — artisan identities keyed by address
//! - [`catalog::CatalogStore`] — authoritative product records
//! - [`provenance::ProvenanceLedger`] — append-only lifecycle histories
//! - [`ownership::OwnershipLedger`] — collectibles issued to buyers
//! - [`engine::MarketEngine`] — the signer-driven purchase workflow
//!
//! [`MarketCore`] composes the synchronous components and carries the
//! cross-component operations; the async engine wraps it behind a lock and
//! adds the signer protocol.

use serde::{Deserialize, Serialize};

use crate::models::{
    Artisan, ArtisanProfile, Collectible, NewProductData, Product, ProductProvenance,
    ProductUpdate, ProvenanceEvent, WalletAddress,
};

pub mod catalog;
pub mod engine;
pub mod error;
pub mod identity;
pub mod ownership;
pub mod provenance;
pub mod snapshot;

pub use catalog::CatalogStore;
pub use engine::{wei_from_price, EngineConfig, MarketEngine, PurchasePhase};
pub use error::{MarketError, MarketResult};
pub use identity::IdentityRegistry;
pub use ownership::OwnershipLedger;
pub use provenance::ProvenanceLedger;

/// All marketplace state, owned by a single in-process instance.
///
/// Created once at process/session start; `reset` empties every collection
/// (parallel test runs construct their own instances instead of sharing
/// ambient state). Serializable as a whole for snapshotting.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MarketCore {
    pub identity: IdentityRegistry,
    pub catalog: CatalogStore,
    pub provenance: ProvenanceLedger,
    pub ownership: OwnershipLedger,
}

impl MarketCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state, returning to the post-construction empty core.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // -------------------------------------------------------------------------
    // Identity operations
    // -------------------------------------------------------------------------

    pub fn register_artisan(
        &mut self,
        profile: ArtisanProfile,
        address: WalletAddress,
    ) -> MarketResult<Artisan> {
        self.identity.register(profile, address)
    }

    pub fn is_registered(&self, address: &WalletAddress) -> bool {
        self.identity.is_registered(address)
    }

    pub fn find_artisan(&self, address: &WalletAddress) -> Option<Artisan> {
        self.identity.find_by_address(address)
    }

    // -------------------------------------------------------------------------
    // Catalog operations
    // -------------------------------------------------------------------------

    pub fn create_product(
        &mut self,
        data: NewProductData,
        artisan_address: &WalletAddress,
    ) -> MarketResult<Product> {
        self.catalog
            .create(data, artisan_address, &self.identity, &mut self.provenance)
    }

    pub fn update_product(
        &mut self,
        product_id: &str,
        update: ProductUpdate,
        artisan_address: &WalletAddress,
    ) -> MarketResult<Product> {
        self.catalog.update(
            product_id,
            update,
            artisan_address,
            &self.identity,
            &mut self.provenance,
        )
    }

    pub fn remove_product(
        &mut self,
        product_id: &str,
        artisan_address: &WalletAddress,
    ) -> MarketResult<()> {
        self.catalog.remove(
            product_id,
            artisan_address,
            &self.identity,
            &mut self.provenance,
        )
    }

    pub fn product_by_id(&self, product_id: &str) -> Option<Product> {
        self.catalog.get_by_id(product_id)
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.catalog.list_all()
    }

    pub fn products_by_artisan(&self, artisan_address: &WalletAddress) -> Vec<Product> {
        self.catalog.list_by_artisan(artisan_address, &self.identity)
    }

    // -------------------------------------------------------------------------
    // Provenance & ownership queries
    // -------------------------------------------------------------------------

    pub fn history(&self, product_id: &str) -> Option<ProductProvenance> {
        self.provenance.get(product_id)
    }

    pub fn collectibles(&self, address: &WalletAddress) -> Vec<Collectible> {
        self.ownership.list(address)
    }

    // -------------------------------------------------------------------------
    // Sale commit
    // -------------------------------------------------------------------------

    /// Atomically apply a settled sale: mark the product sold, issue the
    /// collectible under the buyer's address, and record the "Sold"
    /// provenance entry referencing the transaction hash.
    ///
    /// Re-validates availability, so an interleaved attempt that lost the
    /// race fails with [`MarketError::NotAvailable`] and mutates nothing.
    /// Runs inside one `&mut self` critical section: the three updates are
    /// observed together or not at all.
    pub fn commit_sale(
        &mut self,
        product_id: &str,
        buyer: &WalletAddress,
        tx_hash: &str,
        contract_address: &str,
    ) -> MarketResult<Collectible> {
        let product = self.catalog.mark_sold(product_id, buyer)?;

        let artisan_name = self
            .identity
            .find_by_id(&product.artisan_id)
            .map(|artisan| artisan.display_name)
            .unwrap_or_else(|| "Unknown artisan".to_string());

        let collectible = Collectible {
            token_id: product.id.clone(),
            contract_address: contract_address.to_string(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
            artisan_name,
        };
        self.ownership.add(buyer, collectible.clone());

        // Sale recording tolerates a missing ledger (partially-migrated
        // data); every other path requires creation-time initialization.
        self.provenance.append_or_init(
            product_id,
            ProvenanceEvent::Sold,
            buyer.clone(),
            format!("Sold to {buyer} (tx {tx_hash})"),
        );

        tracing::info!(product_id, buyer = %buyer, tx_hash, "Sale committed");
        Ok(collectible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> ArtisanProfile {
        ArtisanProfile {
            display_name: name.to_string(),
            bio: None,
            region: None,
        }
    }

    fn vase() -> NewProductData {
        NewProductData {
            name: "Raku vase".into(),
            description: "Hand-thrown".into(),
            materials: vec!["clay".into()],
            image_url: "ipfs://vase".into(),
            price: "0.05".into(),
        }
    }

    fn core_with_product() -> (MarketCore, Product) {
        let mut core = MarketCore::new();
        core.register_artisan(profile("Mara"), "0xMara".into()).unwrap();
        let product = core.create_product(vase(), &"0xMara".into()).unwrap();
        (core, product)
    }

    /// `is_sold == true ⟺ owner_address set ⟺ provenance has a Sold entry`,
    /// checked over every product in the core.
    fn assert_sale_invariant(core: &MarketCore) {
        for product in core.list_products() {
            let has_sold_entry = core
                .history(&product.id)
                .is_some_and(|h| h.records.iter().any(|r| r.event == ProvenanceEvent::Sold));
            assert_eq!(product.is_sold, product.owner_address.is_some());
            assert_eq!(product.is_sold, has_sold_entry);
        }
    }

    #[test]
    fn fresh_product_satisfies_sale_invariant() {
        let (core, product) = core_with_product();
        assert!(!product.is_sold);
        assert_eq!(product.owner_address, None);
        assert!(core.history(&product.id).unwrap().records.len() >= 2);
        assert_sale_invariant(&core);
    }

    #[test]
    fn committed_sale_satisfies_sale_invariant() {
        let (mut core, product) = core_with_product();
        let collectible = core
            .commit_sale(&product.id, &"0xBuYeR".into(), "0xdeadbeef", "0xMarket")
            .unwrap();

        assert_eq!(collectible.token_id, product.id);
        assert_eq!(collectible.artisan_name, "Mara");
        assert_eq!(core.collectibles(&"0xBUYER".into()).len(), 1);
        assert_sale_invariant(&core);
    }

    #[test]
    fn commit_sale_is_rejected_for_sold_product_without_mutation() {
        let (mut core, product) = core_with_product();
        core.commit_sale(&product.id, &"0xFirst".into(), "0xaaa", "0xMarket")
            .unwrap();
        let records_before = core.history(&product.id).unwrap().records.len();

        let err = core
            .commit_sale(&product.id, &"0xSecond".into(), "0xbbb", "0xMarket")
            .unwrap_err();
        assert_eq!(err, MarketError::NotAvailable);
        assert!(core.collectibles(&"0xSecond".into()).is_empty());
        assert_eq!(core.history(&product.id).unwrap().records.len(), records_before);
        assert_eq!(
            core.product_by_id(&product.id).unwrap().owner_address.unwrap().0,
            "0xFirst"
        );
    }

    #[test]
    fn remove_product_removes_history() {
        let (mut core, product) = core_with_product();
        core.remove_product(&product.id, &"0xMara".into()).unwrap();
        assert!(core.history(&product.id).is_none());
    }

    #[test]
    fn reset_empties_every_collection() {
        let (mut core, product) = core_with_product();
        core.commit_sale(&product.id, &"0xB".into(), "0xaaa", "0xMarket")
            .unwrap();

        core.reset();

        assert!(core.list_products().is_empty());
        assert!(core.identity.is_empty());
        assert!(core.history(&product.id).is_none());
        assert!(core.collectibles(&"0xB".into()).is_empty());
    }
}
