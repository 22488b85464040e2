// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! Artisan Market - Simulated Marketplace Transaction Service
//!
//! An in-memory transactional core for an artisan-goods marketplace,
//! driven by a wallet-style signer gateway over a simulated chain.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `market` - Identity, catalog, provenance, ownership, and the
//!   purchase engine
//! - `signer` - Wallet signer gateway trait and the simulated provider

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod signer;
pub mod state;
