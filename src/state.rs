// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::market::{EngineConfig, MarketCore, MarketEngine};
use crate::signer::{SignerGateway, SimulatedSigner};

#[derive(Clone)]
pub struct AppState {
    pub market: Arc<RwLock<MarketCore>>,
    pub signer: Option<Arc<dyn SignerGateway>>,
    pub engine: Arc<MarketEngine>,
}

impl AppState {
    pub fn new(
        core: MarketCore,
        signer: Option<Arc<dyn SignerGateway>>,
        config: EngineConfig,
    ) -> Self {
        let market = Arc::new(RwLock::new(core));
        let engine = Arc::new(MarketEngine::new(market.clone(), signer.clone(), config));
        Self {
            market,
            signer,
            engine,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        let signer: Arc<dyn SignerGateway> = Arc::new(SimulatedSigner::new());
        Self::new(MarketCore::new(), Some(signer), EngineConfig::immediate())
    }
}
