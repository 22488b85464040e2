// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Marketplace transaction engine: the purchase workflow.
//!
//! Each purchase attempt walks the phases
//! `validating → awaiting_signature → settling → {completed | failed}`.
//! Validation runs under a read guard; the signer and settlement awaits run
//! with no guard held; the three-way commit (catalog, ownership, provenance)
//! happens inside a single write-guard critical section and re-validates
//! availability, so two interleaved attempts on one product cannot both
//! settle (optimistic check-then-commit, acceptable for this single-process
//! simulation; concurrent external callers would need a per-product
//! compare-and-swap on `is_sold`).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::models::{NewProductData, Product, PurchaseReceipt, WalletAddress};
use crate::signer::{AssetRef, SignerError, SignerGateway, TxSpec};

use super::error::{MarketError, MarketResult};
use super::MarketCore;

/// Decimals of the chain's base currency: smallest unit = 10^-18.
pub const CURRENCY_DECIMALS: u32 = 18;

/// Phases of one purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasePhase {
    Idle,
    Validating,
    AwaitingSignature,
    Settling,
    Completed,
    Failed,
}

impl std::fmt::Display for PurchasePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PurchasePhase::Idle => "idle",
            PurchasePhase::Validating => "validating",
            PurchasePhase::AwaitingSignature => "awaiting_signature",
            PurchasePhase::Settling => "settling",
            PurchasePhase::Completed => "completed",
            PurchasePhase::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Engine wiring: the fixed marketplace contract address and the simulated
/// block-confirmation delay.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub contract_address: String,
    pub settlement_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            contract_address: crate::config::DEFAULT_MARKET_CONTRACT_ADDRESS.to_string(),
            settlement_delay: Duration::from_millis(crate::config::DEFAULT_SETTLEMENT_DELAY_MS),
        }
    }
}

impl EngineConfig {
    /// Zero-delay configuration for tests.
    pub fn immediate() -> Self {
        Self {
            settlement_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Orchestrates every operation that drives the signer gateway.
pub struct MarketEngine {
    market: Arc<RwLock<MarketCore>>,
    signer: Option<Arc<dyn SignerGateway>>,
    config: EngineConfig,
}

impl MarketEngine {
    pub fn new(
        market: Arc<RwLock<MarketCore>>,
        signer: Option<Arc<dyn SignerGateway>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            market,
            signer,
            config,
        }
    }

    pub fn contract_address(&self) -> &str {
        &self.config.contract_address
    }

    /// Run the purchase workflow for `product_id` on behalf of `buyer`.
    ///
    /// On success the product is sold to the buyer, a collectible is issued
    /// under the buyer's address, and a "Sold" provenance entry referencing
    /// the transaction hash is recorded; the three updates are observed
    /// together or not at all.
    pub async fn purchase(
        &self,
        product_id: &str,
        buyer: &WalletAddress,
    ) -> MarketResult<PurchaseReceipt> {
        self.trace_phase(product_id, PurchasePhase::Validating);
        let price = {
            let market = self.market.read().await;
            let Some(product) = market.catalog.get_by_id(product_id) else {
                return self.fail(product_id, MarketError::NotAvailable);
            };
            if product.is_sold {
                return self.fail(product_id, MarketError::NotAvailable);
            }
            product.price
        };
        let Some(signer) = self.signer.as_deref() else {
            return self.fail(product_id, MarketError::NoSigner);
        };

        let spec = TxSpec {
            to: self.config.contract_address.clone(),
            from: buyer.clone(),
            value_wei: wei_from_price(&price)?,
            data: purchase_payload(product_id),
        };

        self.trace_phase(product_id, PurchasePhase::AwaitingSignature);
        let tx_hash = match signer.submit_transaction(&spec).await {
            Ok(hash) => hash,
            Err(err) => return self.fail(product_id, err.into()),
        };

        // Simulated block confirmation. No cancellation past this point.
        self.trace_phase(product_id, PurchasePhase::Settling);
        tokio::time::sleep(self.config.settlement_delay).await;

        let collectible = {
            let mut market = self.market.write().await;
            match market.commit_sale(product_id, buyer, &tx_hash, &self.config.contract_address) {
                Ok(collectible) => collectible,
                Err(err) => return self.fail(product_id, err),
            }
        };

        // Asking the wallet to track the token is best-effort; the sale has
        // already settled.
        let asset = AssetRef {
            contract_address: self.config.contract_address.clone(),
            token_id: collectible.token_id.clone(),
        };
        if let Err(err) = signer.register_asset(&asset).await {
            tracing::warn!(product_id, error = %err, "Wallet declined to track collectible");
        }

        self.trace_phase(product_id, PurchasePhase::Completed);
        Ok(PurchaseReceipt {
            success: true,
            product_id: product_id.to_string(),
            tx_hash,
        })
    }

    /// List a new product, routing through the signer to simulate on-chain
    /// minting. If the mint transaction fails, the product is not created.
    pub async fn create_product(
        &self,
        data: NewProductData,
        artisan_address: &WalletAddress,
    ) -> MarketResult<Product> {
        // Pre-flight so a doomed request never prompts the signer.
        {
            let market = self.market.read().await;
            if !market.identity.is_registered(artisan_address) {
                return Err(MarketError::UnknownArtisan);
            }
            wei_from_price(&data.price)?;
        }

        if let Some(signer) = self.signer.as_deref() {
            let spec = TxSpec {
                to: self.config.contract_address.clone(),
                from: artisan_address.clone(),
                value_wei: 0,
                data: mint_payload(&data.name),
            };
            signer.submit_transaction(&spec).await?;
        }

        let mut market = self.market.write().await;
        market.create_product(data, artisan_address)
    }

    fn trace_phase(&self, product_id: &str, phase: PurchasePhase) {
        tracing::info!(product_id, phase = %phase, "Purchase phase");
    }

    fn fail<T>(&self, product_id: &str, err: MarketError) -> MarketResult<T> {
        tracing::info!(product_id, phase = %PurchasePhase::Failed, reason = %err, "Purchase phase");
        Err(err)
    }
}

impl From<SignerError> for MarketError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::UserRejected => MarketError::UserRejected,
            SignerError::Provider(message) => MarketError::ProviderError(message),
        }
    }
}

/// Opaque payload referencing the purchased product.
fn purchase_payload(product_id: &str) -> String {
    format!("0x{}", hex::encode(format!("purchase:{product_id}")))
}

fn mint_payload(name: &str) -> String {
    format!("0x{}", hex::encode(format!("mint:{name}")))
}

/// Convert a decimal price string to the chain's smallest unit:
/// `round(price × 10^18)`, computed with exact integer arithmetic.
///
/// Fractions longer than 18 digits are rounded half-up on the 19th digit.
/// Rejects non-positive and malformed inputs.
pub fn wei_from_price(price: &str) -> MarketResult<u128> {
    let invalid = || MarketError::InvalidPrice(price.to_string());

    let trimmed = price.trim();
    let (whole_str, frac_str) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(invalid());
    }
    if !whole_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: u128 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().map_err(|_| invalid())?
    };

    let decimals = CURRENCY_DECIMALS as usize;
    let (kept, dropped) = if frac_str.len() > decimals {
        frac_str.split_at(decimals)
    } else {
        (frac_str, "")
    };
    let mut frac: u128 = if kept.is_empty() {
        0
    } else {
        format!("{kept:0<decimals$}").parse().map_err(|_| invalid())?
    };
    // Round half-up on the first dropped digit.
    if dropped.chars().next().is_some_and(|d| d >= '5') {
        frac += 1;
    }

    let total = whole
        .checked_mul(10u128.pow(CURRENCY_DECIMALS))
        .and_then(|scaled| scaled.checked_add(frac))
        .ok_or_else(invalid)?;
    if total == 0 {
        return Err(MarketError::InvalidPrice(
            "price must be positive".to_string(),
        ));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtisanProfile, ProvenanceEvent};
    use crate::signer::{SignerScript, SimulatedSigner};

    fn new_engine() -> (Arc<RwLock<MarketCore>>, Arc<SimulatedSigner>, MarketEngine) {
        let market = Arc::new(RwLock::new(MarketCore::new()));
        let signer = Arc::new(SimulatedSigner::new().with_account("0xBuyer"));
        let engine = MarketEngine::new(
            market.clone(),
            Some(signer.clone()),
            EngineConfig::immediate(),
        );
        (market, signer, engine)
    }

    async fn listed_product(
        market: &Arc<RwLock<MarketCore>>,
        price: &str,
    ) -> (WalletAddress, Product) {
        let artisan: WalletAddress = "0xMara".into();
        let mut core = market.write().await;
        core.register_artisan(
            ArtisanProfile {
                display_name: "Mara".into(),
                bio: None,
                region: None,
            },
            artisan.clone(),
        )
        .unwrap();
        let product = core
            .create_product(
                NewProductData {
                    name: "Raku vase".into(),
                    description: "Hand-thrown".into(),
                    materials: vec!["clay".into()],
                    image_url: "ipfs://vase".into(),
                    price: price.into(),
                },
                &artisan,
            )
            .unwrap();
        (artisan, product)
    }

    #[test]
    fn wei_conversion_is_bit_exact() {
        assert_eq!(wei_from_price("0.05").unwrap(), 50_000_000_000_000_000);
        assert_eq!(wei_from_price("1").unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(wei_from_price("1.5").unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(wei_from_price("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn wei_conversion_rounds_half_up_past_eighteen_digits() {
        // 19th digit 5 rounds up, 4 rounds down.
        assert_eq!(wei_from_price("0.0000000000000000015").unwrap(), 2);
        assert_eq!(wei_from_price("0.0000000000000000014").unwrap(), 1);
        // Carry across the whole fractional part.
        assert_eq!(
            wei_from_price("0.9999999999999999995").unwrap(),
            1_000_000_000_000_000_000
        );
    }

    #[test]
    fn wei_conversion_rejects_malformed_and_non_positive() {
        for bad in ["", ".", "-1", "1.2.3", "abc", "1e3", "0", "0.0"] {
            assert!(wei_from_price(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[tokio::test]
    async fn successful_purchase_commits_all_three_updates() {
        let (market, _signer, engine) = new_engine();
        let (_artisan, product) = listed_product(&market, "0.05").await;

        let receipt = engine
            .purchase(&product.id, &"0xBuYeR".into())
            .await
            .unwrap();
        assert!(receipt.success);
        assert!(receipt.tx_hash.starts_with("0x"));

        let core = market.read().await;
        let sold = core.catalog.get_by_id(&product.id).unwrap();
        assert!(sold.is_sold);
        assert_eq!(sold.owner_address.as_ref().unwrap().0, "0xBuYeR");

        let held = core.ownership.list(&"0xbuyer".into());
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].token_id, product.id);
        assert_eq!(held[0].artisan_name, "Mara");

        let history = core.provenance.get(&product.id).unwrap();
        let last = history.records.last().unwrap();
        assert_eq!(last.event, ProvenanceEvent::Sold);
        assert!(last.details.contains(&receipt.tx_hash));
    }

    #[tokio::test]
    async fn purchasing_a_sold_product_fails_without_mutation() {
        let (market, _signer, engine) = new_engine();
        let (_artisan, product) = listed_product(&market, "1").await;

        engine.purchase(&product.id, &"0xFirst".into()).await.unwrap();

        let before = {
            let core = market.read().await;
            (
                core.catalog.get_by_id(&product.id).unwrap(),
                core.provenance.get(&product.id).unwrap(),
                core.ownership.list(&"0xSecond".into()),
            )
        };

        let err = engine
            .purchase(&product.id, &"0xSecond".into())
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::NotAvailable);

        let core = market.read().await;
        assert_eq!(core.catalog.get_by_id(&product.id).unwrap(), before.0);
        assert_eq!(core.provenance.get(&product.id).unwrap(), before.1);
        assert_eq!(core.ownership.list(&"0xSecond".into()), before.2);
    }

    #[tokio::test]
    async fn missing_product_is_not_available() {
        let (_market, _signer, engine) = new_engine();
        let err = engine.purchase("ghost", &"0xB".into()).await.unwrap_err();
        assert_eq!(err, MarketError::NotAvailable);
    }

    #[tokio::test]
    async fn user_rejection_cancels_without_mutation() {
        let (market, signer, engine) = new_engine();
        let (_artisan, product) = listed_product(&market, "1").await;

        signer.script_next(SignerScript::Reject);
        let err = engine
            .purchase(&product.id, &"0xBuyer".into())
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::UserRejected);
        assert_eq!(err.to_string(), "cancelled");

        let core = market.read().await;
        assert!(!core.catalog.get_by_id(&product.id).unwrap().is_sold);
        assert!(core.ownership.list(&"0xBuyer".into()).is_empty());

        // The product remains purchasable afterwards.
        drop(core);
        assert!(engine.purchase(&product.id, &"0xBuyer".into()).await.is_ok());
    }

    #[tokio::test]
    async fn provider_failure_propagates_opaque_message() {
        let (market, signer, engine) = new_engine();
        let (_artisan, product) = listed_product(&market, "1").await;

        signer.script_next(SignerScript::Fail("nonce too low".into()));
        let err = engine
            .purchase(&product.id, &"0xBuyer".into())
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::ProviderError("nonce too low".into()));
    }

    #[tokio::test]
    async fn purchase_without_signer_fails_with_no_signer() {
        let market = Arc::new(RwLock::new(MarketCore::new()));
        let engine = MarketEngine::new(market.clone(), None, EngineConfig::immediate());
        let (_artisan, product) = listed_product(&market, "1").await;

        let err = engine
            .purchase(&product.id, &"0xBuyer".into())
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::NoSigner);
    }

    #[tokio::test]
    async fn interleaved_purchases_settle_exactly_once() {
        let (market, _signer, engine) = new_engine();
        let (_artisan, product) = listed_product(&market, "1").await;

        // Both attempts validate before either commits; the commit-time
        // re-check must let exactly one through.
        let buyer_one = "0xOne".into();
        let buyer_two = "0xTwo".into();
        let (first, second) = tokio::join!(
            engine.purchase(&product.id, &buyer_one),
            engine.purchase(&product.id, &buyer_two),
        );
        assert!(first.is_ok() != second.is_ok());

        let core = market.read().await;
        let one = core.ownership.list(&"0xOne".into()).len();
        let two = core.ownership.list(&"0xTwo".into()).len();
        assert_eq!(one + two, 1);
    }

    #[tokio::test]
    async fn create_product_aborts_when_mint_is_rejected() {
        let (market, signer, engine) = new_engine();
        {
            let mut core = market.write().await;
            core.register_artisan(
                ArtisanProfile {
                    display_name: "Mara".into(),
                    bio: None,
                    region: None,
                },
                "0xMara".into(),
            )
            .unwrap();
        }

        signer.script_next(SignerScript::Reject);
        let err = engine
            .create_product(
                NewProductData {
                    name: "Bowl".into(),
                    description: "Ash glaze".into(),
                    materials: vec![],
                    image_url: "ipfs://bowl".into(),
                    price: "0.2".into(),
                },
                &"0xMara".into(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::UserRejected);

        let core = market.read().await;
        assert!(core.catalog.list_all().is_empty());
    }

    #[tokio::test]
    async fn create_product_skips_signer_for_unknown_artisan() {
        let (market, signer, engine) = new_engine();
        // A rejection script that must never be consumed.
        signer.script_next(SignerScript::Reject);

        let err = engine
            .create_product(
                NewProductData {
                    name: "Bowl".into(),
                    description: "Ash glaze".into(),
                    materials: vec![],
                    image_url: "ipfs://bowl".into(),
                    price: "0.2".into(),
                },
                &"0xGhost".into(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::UnknownArtisan);

        let market = market.read().await;
        assert!(market.catalog.list_all().is_empty());
    }
}
