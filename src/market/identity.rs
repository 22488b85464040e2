// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Artisan identity registry.
//!
//! Tracks seller identities keyed by wallet address. Registration is
//! first-come-first-served per address; the address and the generated id are
//! immutable afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Artisan, ArtisanProfile, WalletAddress};

use super::error::{MarketError, MarketResult};

/// Registry of artisan identities, keyed by canonical (lowercased) address.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IdentityRegistry {
    artisans: HashMap<String, Artisan>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive membership check.
    pub fn is_registered(&self, address: &WalletAddress) -> bool {
        self.artisans.contains_key(&address.canonical())
    }

    /// Case-insensitive lookup.
    pub fn find_by_address(&self, address: &WalletAddress) -> Option<Artisan> {
        self.artisans.get(&address.canonical()).cloned()
    }

    /// Lookup by generated artisan id. Used to snapshot the artisan name
    /// when issuing a collectible.
    pub fn find_by_id(&self, artisan_id: &str) -> Option<Artisan> {
        self.artisans
            .values()
            .find(|artisan| artisan.id == artisan_id)
            .cloned()
    }

    /// Register a new artisan identity.
    ///
    /// Fails with [`MarketError::DuplicateIdentity`] if the address is
    /// already registered under any case variant. Has no side effects beyond
    /// the registry mutation.
    pub fn register(
        &mut self,
        profile: ArtisanProfile,
        address: WalletAddress,
    ) -> MarketResult<Artisan> {
        let key = address.canonical();
        if self.artisans.contains_key(&key) {
            return Err(MarketError::DuplicateIdentity);
        }

        let artisan = Artisan {
            id: Uuid::new_v4().to_string(),
            wallet_address: address,
            display_name: profile.display_name,
            bio: profile.bio,
            region: profile.region,
        };
        self.artisans.insert(key, artisan.clone());

        tracing::info!(
            artisan_id = %artisan.id,
            address = %artisan.wallet_address,
            "Registered artisan"
        );
        Ok(artisan)
    }

    /// Number of registered artisans.
    pub fn len(&self) -> usize {
        self.artisans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artisans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> ArtisanProfile {
        ArtisanProfile {
            display_name: name.to_string(),
            bio: None,
            region: Some("Kyoto".to_string()),
        }
    }

    #[test]
    fn register_allocates_fresh_id_and_stores_record() {
        let mut registry = IdentityRegistry::new();
        let artisan = registry
            .register(profile("Mara"), "0xA1b2".into())
            .unwrap();

        assert!(!artisan.id.is_empty());
        assert!(registry.is_registered(&"0xA1b2".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_fails_for_any_case_variant() {
        let mut registry = IdentityRegistry::new();
        registry
            .register(profile("Mara"), "0xA1B2".into())
            .unwrap();

        let err = registry
            .register(profile("Imposter"), "0xa1b2".into())
            .unwrap_err();
        assert_eq!(err, MarketError::DuplicateIdentity);
        // Registry is unchanged.
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry
                .find_by_address(&"0xa1b2".into())
                .unwrap()
                .display_name,
            "Mara"
        );
    }

    #[test]
    fn lookup_is_case_insensitive_and_preserves_stored_case() {
        let mut registry = IdentityRegistry::new();
        registry
            .register(profile("Mara"), "0xA1B2".into())
            .unwrap();

        let found = registry.find_by_address(&"0Xa1b2".into()).unwrap();
        assert_eq!(found.wallet_address.0, "0xA1B2");
    }

    #[test]
    fn find_by_id_resolves_registered_artisan() {
        let mut registry = IdentityRegistry::new();
        let artisan = registry.register(profile("Mara"), "0xA1".into()).unwrap();

        assert_eq!(registry.find_by_id(&artisan.id), Some(artisan));
        assert_eq!(registry.find_by_id("missing"), None);
    }
}
