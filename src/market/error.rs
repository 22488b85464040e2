// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Typed failure results for the marketplace core.
//!
//! Every core operation returns `MarketResult<T>`; no error here is fatal to
//! the process. Validation failures are returned to the immediate caller so
//! the presentation layer can render a message without crashing, and the two
//! signer-boundary errors (`UserRejected`, `ProviderError`) propagate
//! unchanged to the purchase caller without automatic retry.

use thiserror::Error;

/// Marketplace error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// The wallet address is already registered (case-insensitive).
    #[error("wallet address is already registered")]
    DuplicateIdentity,

    /// No artisan is registered for the claimed wallet address.
    #[error("no artisan registered for this wallet address")]
    UnknownArtisan,

    /// The referenced product does not exist.
    #[error("product not found")]
    NotFound,

    /// The claimed identity does not own the product it tried to mutate.
    #[error("caller does not own this product")]
    Unauthorized,

    /// The product does not exist or has already been sold.
    #[error("product is not available for purchase")]
    NotAvailable,

    /// No signer gateway is reachable.
    #[error("no signer gateway is reachable")]
    NoSigner,

    /// The user explicitly declined the transaction at the signing step.
    #[error("cancelled")]
    UserRejected,

    /// The external provider failed; carries a best-effort opaque message.
    #[error("provider error: {0}")]
    ProviderError(String),

    /// The supplied price is not a positive decimal.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

pub type MarketResult<T> = Result<T, MarketError>;
