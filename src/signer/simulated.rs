// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Scripted wallet provider for the simulated chain path.
//!
//! Holds a connected account and a one-shot script deciding the outcome of
//! the next interactive request. The user decision resolves immediately;
//! settlement latency after acceptance belongs to the purchase engine.

use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::watch;

use crate::models::WalletAddress;

use super::{AssetRef, SignerError, SignerGateway, TxHash, TxSpec};

/// Outcome scripted for the next interactive signer request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignerScript {
    /// Approve the request (the default; restored after every request).
    #[default]
    Approve,
    /// The user declines.
    Reject,
    /// The provider fails with an opaque message.
    Fail(String),
}

#[derive(Debug)]
struct Inner {
    account: Option<WalletAddress>,
    script: SignerScript,
    nonce: u64,
}

/// Simulated external wallet.
pub struct SimulatedSigner {
    inner: Mutex<Inner>,
    account_tx: watch::Sender<Option<WalletAddress>>,
}

impl Default for SimulatedSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSigner {
    pub fn new() -> Self {
        let (account_tx, _) = watch::channel(None);
        Self {
            inner: Mutex::new(Inner {
                account: None,
                script: SignerScript::Approve,
                nonce: 0,
            }),
            account_tx,
        }
    }

    /// Builder-style initial account.
    pub fn with_account(self, address: impl Into<WalletAddress>) -> Self {
        self.switch_account(Some(address.into()));
        self
    }

    /// Script the outcome of the next interactive request. The script is
    /// consumed by that request and resets to `Approve`.
    pub fn script_next(&self, script: SignerScript) {
        self.inner.lock().expect("signer lock poisoned").script = script;
    }

    /// Simulate the user switching accounts in the wallet. Subscribers on
    /// the account-change stream observe the new value.
    pub fn switch_account(&self, address: Option<WalletAddress>) {
        self.inner.lock().expect("signer lock poisoned").account = address.clone();
        let _ = self.account_tx.send(address);
    }

    /// Consume the one-shot script and, on approval, take a fresh nonce.
    fn take_decision(&self) -> (SignerScript, u64) {
        let mut inner = self.inner.lock().expect("signer lock poisoned");
        let script = std::mem::take(&mut inner.script);
        inner.nonce += 1;
        (script, inner.nonce)
    }

    fn simulated_hash(spec: &TxSpec, nonce: u64) -> TxHash {
        let mut hasher = Sha256::new();
        hasher.update(spec.from.canonical());
        hasher.update(&spec.to);
        hasher.update(spec.value_wei.to_be_bytes());
        hasher.update(&spec.data);
        hasher.update(nonce.to_be_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl SignerGateway for SimulatedSigner {
    async fn request_account_access(&self) -> Result<Option<WalletAddress>, SignerError> {
        let (script, _) = self.take_decision();
        match script {
            SignerScript::Reject => Err(SignerError::UserRejected),
            SignerScript::Fail(message) => Err(SignerError::Provider(message)),
            SignerScript::Approve => Ok(self
                .inner
                .lock()
                .expect("signer lock poisoned")
                .account
                .clone()),
        }
    }

    async fn get_active_account(&self) -> Option<WalletAddress> {
        self.inner
            .lock()
            .expect("signer lock poisoned")
            .account
            .clone()
    }

    async fn submit_transaction(&self, spec: &TxSpec) -> Result<TxHash, SignerError> {
        let (script, nonce) = self.take_decision();
        match script {
            SignerScript::Reject => Err(SignerError::UserRejected),
            SignerScript::Fail(message) => Err(SignerError::Provider(message)),
            SignerScript::Approve => Ok(Self::simulated_hash(spec, nonce)),
        }
    }

    async fn register_asset(&self, asset: &AssetRef) -> Result<bool, SignerError> {
        let (script, _) = self.take_decision();
        match script {
            SignerScript::Reject => Err(SignerError::UserRejected),
            SignerScript::Fail(message) => Err(SignerError::Provider(message)),
            SignerScript::Approve => {
                tracing::debug!(token_id = %asset.token_id, "Wallet is tracking collectible");
                Ok(true)
            }
        }
    }

    fn subscribe_account_changes(&self) -> watch::Receiver<Option<WalletAddress>> {
        self.account_tx.subscribe()
    }
}
