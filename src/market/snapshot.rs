// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Whole-core JSON snapshotting.
//!
//! A deliberately simple key-value persistence scheme: the entire
//! [`MarketCore`] is serialized to one JSON document, written atomically
//! (temp file + rename) and restored at startup. Process restart without a
//! snapshot resets all state, which is acceptable for this simulation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::MarketCore;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Write the core to `path`, atomically replacing any previous snapshot.
pub fn save(core: &MarketCore, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_vec_pretty(core)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;

    tracing::info!(path = %path.display(), bytes = json.len(), "Snapshot written");
    Ok(())
}

/// Restore a core from `path`.
pub fn load(path: &Path) -> Result<MarketCore, SnapshotError> {
    let json = fs::read(path)?;
    let core = serde_json::from_slice(&json)?;

    tracing::info!(path = %path.display(), "Snapshot restored");
    Ok(core)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtisanProfile, NewProductData};

    fn populated_core() -> MarketCore {
        let mut core = MarketCore::new();
        core.register_artisan(
            ArtisanProfile {
                display_name: "Mara".into(),
                bio: Some("Potter".into()),
                region: None,
            },
            "0xMara".into(),
        )
        .unwrap();
        let product = core
            .create_product(
                NewProductData {
                    name: "Raku vase".into(),
                    description: "Hand-thrown".into(),
                    materials: vec!["clay".into()],
                    image_url: "ipfs://vase".into(),
                    price: "0.05".into(),
                },
                &"0xMara".into(),
            )
            .unwrap();
        core.commit_sale(&product.id, &"0xBuyer".into(), "0xabc", "0xMarket")
            .unwrap();
        core
    }

    #[test]
    fn snapshot_round_trip_preserves_all_collections() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("market.json");

        let core = populated_core();
        save(&core, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.list_products(), core.list_products());
        assert_eq!(
            restored.find_artisan(&"0xmara".into()),
            core.find_artisan(&"0xmara".into())
        );
        let product_id = &core.list_products()[0].id;
        assert_eq!(restored.history(product_id), core.history(product_id));
        assert_eq!(
            restored.collectibles(&"0xbuyer".into()),
            core.collectibles(&"0xbuyer".into())
        );
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("market.json");

        save(&MarketCore::new(), &path).unwrap();
        save(&populated_core(), &path).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.list_products().len(), 1);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
