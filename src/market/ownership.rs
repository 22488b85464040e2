// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Ownership ledger: collectibles issued to buyers.
//!
//! Grows only by append; entries are never reassigned or removed. Mutated
//! exclusively by a successful purchase commit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Collectible, WalletAddress};

/// Per-address holdings, keyed by canonical (lowercased) wallet address.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OwnershipLedger {
    holdings: HashMap<String, Vec<Collectible>>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collectible to the address's list, creating it if absent.
    pub fn add(&mut self, address: &WalletAddress, collectible: Collectible) {
        self.holdings
            .entry(address.canonical())
            .or_default()
            .push(collectible);
    }

    /// Collectibles held by an address, as a defensive copy. Callers cannot
    /// mutate ledger state through the returned value.
    pub fn list(&self, address: &WalletAddress) -> Vec<Collectible> {
        self.holdings
            .get(&address.canonical())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collectible(token_id: &str) -> Collectible {
        Collectible {
            token_id: token_id.to_string(),
            contract_address: "0xC0ffee".to_string(),
            name: "Raku vase".to_string(),
            image_url: "ipfs://vase".to_string(),
            description: "Hand-thrown".to_string(),
            artisan_name: "Mara".to_string(),
        }
    }

    #[test]
    fn add_and_list_are_case_insensitive() {
        let mut ledger = OwnershipLedger::new();
        ledger.add(&"0xBuYeR".into(), collectible("t1"));
        ledger.add(&"0xbuyer".into(), collectible("t2"));

        let held = ledger.list(&"0XBUYER".into());
        assert_eq!(held.len(), 2);
        assert_eq!(held[0].token_id, "t1");
        assert_eq!(held[1].token_id, "t2");
    }

    #[test]
    fn list_returns_defensive_copy() {
        let mut ledger = OwnershipLedger::new();
        ledger.add(&"0xB".into(), collectible("t1"));

        let mut held = ledger.list(&"0xB".into());
        held.clear();

        assert_eq!(ledger.list(&"0xB".into()).len(), 1);
    }

    #[test]
    fn unknown_address_has_no_holdings() {
        let ledger = OwnershipLedger::new();
        assert!(ledger.list(&"0xNobody".into()).is_empty());
    }
}
