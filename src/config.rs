// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `MARKET_CONTRACT_ADDRESS` | Marketplace registry contract address | fixed simulation address |
//! | `SETTLEMENT_DELAY_MS` | Simulated block-confirmation delay | `1500` |
//! | `SNAPSHOT_PATH` | JSON snapshot file; unset disables persistence | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use crate::market::EngineConfig;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the marketplace contract address used as
/// the destination of every simulated transaction and as the collectible
/// registry address.
pub const MARKET_CONTRACT_ADDRESS_ENV: &str = "MARKET_CONTRACT_ADDRESS";

/// Environment variable name for the simulated settlement delay in
/// milliseconds.
pub const SETTLEMENT_DELAY_MS_ENV: &str = "SETTLEMENT_DELAY_MS";

/// Environment variable name for the snapshot file path. When unset, state
/// lives only in memory and a restart resets it.
pub const SNAPSHOT_PATH_ENV: &str = "SNAPSHOT_PATH";

/// Environment variable name for the logging format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Fixed marketplace/registry address for the simulated chain. There is no
/// contract behind it; it only anchors transaction specs and collectibles.
pub const DEFAULT_MARKET_CONTRACT_ADDRESS: &str = "0x7a3c1f09d4b2e85a6c910f3b7d24e6a85c0d9f11";

/// Default simulated block-confirmation delay.
pub const DEFAULT_SETTLEMENT_DELAY_MS: u64 = 1500;

/// Build the engine configuration from the environment, falling back to the
/// documented defaults for missing or malformed values.
pub fn engine_config_from_env() -> EngineConfig {
    let contract_address = std::env::var(MARKET_CONTRACT_ADDRESS_ENV)
        .unwrap_or_else(|_| DEFAULT_MARKET_CONTRACT_ADDRESS.to_string());

    let settlement_delay_ms = std::env::var(SETTLEMENT_DELAY_MS_ENV)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SETTLEMENT_DELAY_MS);

    EngineConfig {
        contract_address,
        settlement_delay: Duration::from_millis(settlement_delay_ms),
    }
}
