// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Catalog store: the authoritative product collection.
//!
//! Owns every `Product` and drives its state transitions. Mutating
//! operations re-check authorization against the identity registry at call
//! time and fan out to the provenance ledger; each call is all-or-nothing,
//! so no partially-applied product/provenance pair is ever observable.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    NewProductData, Product, ProductUpdate, ProvenanceEvent, ProvenanceRecord, WalletAddress,
};

use super::engine::wei_from_price;
use super::error::{MarketError, MarketResult};
use super::identity::IdentityRegistry;
use super::provenance::ProvenanceLedger;

/// Product records keyed by product id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogStore {
    products: HashMap<String, Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a product for the artisan resolved from `artisan_address`.
    ///
    /// Fails with [`MarketError::UnknownArtisan`] if the address is not
    /// registered and [`MarketError::InvalidPrice`] if the price is not a
    /// positive decimal. On success the provenance ledger is initialized
    /// with a "Created" entry and a "Listed for Sale" entry carrying the
    /// price.
    pub fn create(
        &mut self,
        data: NewProductData,
        artisan_address: &WalletAddress,
        registry: &IdentityRegistry,
        provenance: &mut ProvenanceLedger,
    ) -> MarketResult<Product> {
        let artisan = registry
            .find_by_address(artisan_address)
            .ok_or(MarketError::UnknownArtisan)?;

        // Validate before any mutation so the whole operation is atomic.
        wei_from_price(&data.price)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            artisan_id: artisan.id,
            name: data.name,
            description: data.description,
            materials: data.materials,
            image_url: data.image_url,
            price: data.price,
            is_verified: false,
            creation_date: Utc::now(),
            is_sold: false,
            owner_address: None,
        };

        provenance.initialize(
            &product.id,
            vec![
                ProvenanceRecord::new(
                    ProvenanceEvent::Created,
                    artisan_address.clone(),
                    format!("Created by {}", artisan.display_name),
                ),
                ProvenanceRecord::new(
                    ProvenanceEvent::Listed,
                    artisan_address.clone(),
                    format!("Listed at {}", product.price),
                ),
            ],
        );
        self.products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, artisan = %artisan_address, "Product listed");
        Ok(product)
    }

    /// Merge `update` into an existing product owned by the caller.
    ///
    /// Shallow merge: unspecified fields are retained. Artisan lookup
    /// failure yields [`MarketError::Unauthorized`], same as a mismatched
    /// owner, so an unregistered caller learns nothing about the product.
    pub fn update(
        &mut self,
        product_id: &str,
        update: ProductUpdate,
        artisan_address: &WalletAddress,
        registry: &IdentityRegistry,
        provenance: &mut ProvenanceLedger,
    ) -> MarketResult<Product> {
        if !self.products.contains_key(product_id) {
            return Err(MarketError::NotFound);
        }
        self.authorize(product_id, artisan_address, registry)?;

        if let Some(price) = update.price.as_deref() {
            wei_from_price(price)?;
        }

        let product = self
            .products
            .get_mut(product_id)
            .ok_or(MarketError::NotFound)?;

        let mut changed = Vec::new();
        if let Some(name) = update.name {
            product.name = name;
            changed.push("name");
        }
        if let Some(description) = update.description {
            product.description = description;
            changed.push("description");
        }
        if let Some(materials) = update.materials {
            product.materials = materials;
            changed.push("materials");
        }
        if let Some(image_url) = update.image_url {
            product.image_url = image_url;
            changed.push("image_url");
        }
        if let Some(price) = update.price {
            product.price = price;
            changed.push("price");
        }

        let updated = product.clone();
        provenance.append(
            product_id,
            ProvenanceEvent::Updated,
            artisan_address.clone(),
            format!("Updated fields: {}", changed.join(", ")),
        );

        tracing::info!(product_id, fields = ?changed, "Product updated");
        Ok(updated)
    }

    /// Delete a product and its entire provenance ledger.
    pub fn remove(
        &mut self,
        product_id: &str,
        artisan_address: &WalletAddress,
        registry: &IdentityRegistry,
        provenance: &mut ProvenanceLedger,
    ) -> MarketResult<()> {
        if !self.products.contains_key(product_id) {
            return Err(MarketError::NotFound);
        }
        self.authorize(product_id, artisan_address, registry)?;

        self.products.remove(product_id);
        provenance.remove(product_id);

        tracing::info!(product_id, artisan = %artisan_address, "Product removed");
        Ok(())
    }

    pub fn get_by_id(&self, product_id: &str) -> Option<Product> {
        self.products.get(product_id).cloned()
    }

    /// All products, unsold first, newest-created first within each group.
    pub fn list_all(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by_key(|p| (p.is_sold, Reverse(p.creation_date)));
        products
    }

    /// Products of the artisan resolved from `artisan_address`, newest
    /// first. Empty if the artisan is unknown.
    pub fn list_by_artisan(
        &self,
        artisan_address: &WalletAddress,
        registry: &IdentityRegistry,
    ) -> Vec<Product> {
        let Some(artisan) = registry.find_by_address(artisan_address) else {
            return Vec::new();
        };

        let mut products: Vec<Product> = self
            .products
            .values()
            .filter(|p| p.artisan_id == artisan.id)
            .cloned()
            .collect();
        products.sort_by_key(|p| Reverse(p.creation_date));
        products
    }

    /// Transition a product to sold. Re-validates availability so a second
    /// interleaved purchase of the same product fails here.
    pub(crate) fn mark_sold(
        &mut self,
        product_id: &str,
        buyer: &WalletAddress,
    ) -> MarketResult<Product> {
        let product = self
            .products
            .get_mut(product_id)
            .ok_or(MarketError::NotAvailable)?;
        if product.is_sold {
            return Err(MarketError::NotAvailable);
        }

        product.is_sold = true;
        product.owner_address = Some(buyer.clone());
        Ok(product.clone())
    }

    /// Ownership check against current store state. Never cached.
    fn authorize(
        &self,
        product_id: &str,
        artisan_address: &WalletAddress,
        registry: &IdentityRegistry,
    ) -> MarketResult<()> {
        let artisan = registry
            .find_by_address(artisan_address)
            .ok_or(MarketError::Unauthorized)?;
        let product = self.products.get(product_id).ok_or(MarketError::NotFound)?;

        if product.artisan_id == artisan.id {
            Ok(())
        } else {
            Err(MarketError::Unauthorized)
        }
    }
}
