// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Provenance ledger: append-only per-product lifecycle history.
//!
//! One ledger exists per product, created atomically with the product and
//! destroyed with it. Records are ordered by insertion and never mutated or
//! removed individually.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ProductProvenance, ProvenanceEvent, ProvenanceRecord, WalletAddress};

/// All product provenance histories, keyed by product id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProvenanceLedger {
    histories: HashMap<String, ProductProvenance>,
}

impl ProvenanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the ledger for a new product with its initial entries.
    ///
    /// Called exactly once per product, atomically with its creation.
    pub fn initialize(&mut self, product_id: &str, first_entries: Vec<ProvenanceRecord>) {
        self.histories.insert(
            product_id.to_string(),
            ProductProvenance {
                product_id: product_id.to_string(),
                records: first_entries,
            },
        );
    }

    /// Append a record stamped with the current time.
    ///
    /// A missing ledger is a silent no-op (logged at warn level): callers
    /// must have created the product first.
    pub fn append(
        &mut self,
        product_id: &str,
        event: ProvenanceEvent,
        actor_address: WalletAddress,
        details: impl Into<String>,
    ) {
        match self.histories.get_mut(product_id) {
            Some(history) => {
                history
                    .records
                    .push(ProvenanceRecord::new(event, actor_address, details));
            }
            None => {
                tracing::warn!(product_id, %event, "Dropping provenance entry for unknown product");
            }
        }
    }

    /// Append a record, creating the ledger if it does not exist.
    ///
    /// Reserved for the sale-recording path, where a product imported from
    /// partially-migrated data may lack a ledger. Every other caller uses
    /// [`append`](Self::append).
    pub fn append_or_init(
        &mut self,
        product_id: &str,
        event: ProvenanceEvent,
        actor_address: WalletAddress,
        details: impl Into<String>,
    ) {
        let history = self
            .histories
            .entry(product_id.to_string())
            .or_insert_with(|| ProductProvenance {
                product_id: product_id.to_string(),
                records: Vec::new(),
            });
        history
            .records
            .push(ProvenanceRecord::new(event, actor_address, details));
    }

    /// Full ordered history for a product, or `None` if none exists.
    pub fn get(&self, product_id: &str) -> Option<ProductProvenance> {
        self.histories.get(product_id).cloned()
    }

    /// Delete a product's ledger. Called when the product is deleted.
    pub fn remove(&mut self, product_id: &str) {
        self.histories.remove(product_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> WalletAddress {
        "0xArTiSan".into()
    }

    #[test]
    fn initialize_then_get_returns_entries_in_order() {
        let mut ledger = ProvenanceLedger::new();
        ledger.initialize(
            "p1",
            vec![
                ProvenanceRecord::new(ProvenanceEvent::Created, actor(), "thrown and glazed"),
                ProvenanceRecord::new(ProvenanceEvent::Listed, actor(), "listed at 0.05"),
            ],
        );

        let history = ledger.get("p1").unwrap();
        assert_eq!(history.records.len(), 2);
        assert_eq!(history.records[0].event, ProvenanceEvent::Created);
        assert_eq!(history.records[1].event, ProvenanceEvent::Listed);
    }

    #[test]
    fn append_to_unknown_product_is_a_no_op() {
        let mut ledger = ProvenanceLedger::new();
        ledger.append("ghost", ProvenanceEvent::Updated, actor(), "nothing");
        assert!(ledger.get("ghost").is_none());
    }

    #[test]
    fn append_or_init_creates_missing_ledger() {
        let mut ledger = ProvenanceLedger::new();
        ledger.append_or_init("legacy", ProvenanceEvent::Sold, "0xBuYeR".into(), "tx 0xabc");

        let history = ledger.get("legacy").unwrap();
        assert_eq!(history.records.len(), 1);
        assert_eq!(history.records[0].event, ProvenanceEvent::Sold);
    }

    #[test]
    fn remove_deletes_whole_history() {
        let mut ledger = ProvenanceLedger::new();
        ledger.initialize("p1", Vec::new());
        ledger.remove("p1");
        assert!(ledger.get("p1").is_none());
    }
}
