// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Signer gateway: the external wallet boundary.
//!
//! The rest of the core never touches a wallet provider directly, only this
//! contract. Production adapts a real provider; tests inject the scripted
//! [`SimulatedSigner`]. Timeouts are deliberately not modeled: a hung
//! external signer hangs the calling operation.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::WalletAddress;

pub mod simulated;

pub use simulated::{SimulatedSigner, SignerScript};

/// Hash of a submitted transaction, `0x`-prefixed hex.
pub type TxHash = String;

/// Failure modes at the wallet boundary.
///
/// Malformed provider responses must be normalized to [`Provider`] with a
/// best-effort message rather than leaking provider-specific structures.
///
/// [`Provider`]: SignerError::Provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The user explicitly declined the request.
    #[error("user rejected the request")]
    UserRejected,

    /// The provider failed with an opaque message.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Transaction specification handed to the external signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSpec {
    /// Destination: the marketplace contract address.
    pub to: String,
    /// Source: the buyer's (or minting artisan's) wallet address.
    pub from: WalletAddress,
    /// Value in the chain's smallest unit.
    pub value_wei: u128,
    /// Opaque payload referencing the product.
    pub data: String,
}

/// Reference to a collectible the wallet is asked to track (ERC-721).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub contract_address: String,
    pub token_id: String,
}

/// Abstraction over the external wallet used to authorize and broadcast
/// transactions.
#[async_trait]
pub trait SignerGateway: Send + Sync {
    /// Interactive account request. `Ok(None)` means no external signer is
    /// present or the provider returned no accounts; that is not an error.
    async fn request_account_access(&self) -> Result<Option<WalletAddress>, SignerError>;

    /// Non-interactive query for the currently connected account.
    async fn get_active_account(&self) -> Option<WalletAddress>;

    /// Submit a transaction and suspend until the signer accepts or
    /// rejects. On acceptance the purchase engine still waits the fixed
    /// settlement delay before the returned hash is considered final.
    async fn submit_transaction(&self, spec: &TxSpec) -> Result<TxHash, SignerError>;

    /// Ask the signer to track a collectible; returns whether it was added.
    async fn register_asset(&self, asset: &AssetRef) -> Result<bool, SignerError>;

    /// Account-change notification stream. On a new account the caller must
    /// re-resolve identity and re-fetch ownership for the new address.
    fn subscribe_account_changes(&self) -> watch::Receiver<Option<WalletAddress>>;
}
