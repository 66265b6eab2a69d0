use anyhow::{Context, Result};
use jsonrpsee::server::{ServerBuilder, ServerHandle};
use std::net::SocketAddr;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::common::QuantityPolicy;
use crate::config::Config;
use crate::estimator::Estimator;
use crate::price::PriceCache;
use crate::rpc::{MintCostRpcImpl, MintCostRpcServer};

#[derive(Clone)]
pub struct MintCostServer {
    estimator: Estimator,
    cache: PriceCache,
    policy: QuantityPolicy,
    refresh_interval: Option<Duration>,
    addr: SocketAddr,
}

impl MintCostServer {
    pub fn new(
        estimator: Estimator,
        cache: PriceCache,
        policy: QuantityPolicy,
        refresh_interval: Option<Duration>,
        addr: SocketAddr,
    ) -> Self {
        Self {
            estimator,
            cache,
            policy,
            refresh_interval,
            addr,
        }
    }

    // Create a server from configuration, `addr` overrides the configured one
    pub fn from_config(config: &Config, addr: Option<SocketAddr>) -> Result<Self> {
        let feed = config
            .gas_price_feed()
            .context("Failed to set up gas price feed")?;

        Ok(Self::new(
            Estimator::default(),
            PriceCache::new(feed),
            config.quantity_policy(),
            config.refresh_interval(),
            addr.unwrap_or(config.rpc_addr),
        ))
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    // Start listening for RPC calls, returns the bound address
    pub async fn start(&self) -> Result<(SocketAddr, ServerHandle)> {
        let rpc_impl = MintCostRpcImpl::new(self.estimator.clone(), self.cache.clone(), self.policy);

        let server = ServerBuilder::default()
            .build(self.addr)
            .await
            .with_context(|| format!("Failed to bind RPC server on {}", self.addr))?;
        let local_addr = server.local_addr()?;

        let handle = server.start(rpc_impl.into_rpc());

        info!("🚀 Mint cost RPC server listening on http://{}", local_addr);
        Ok((local_addr, handle))
    }

    // Fetch the gas price in the background and keep it fresh if configured
    pub fn start_price_refresh(&self) -> JoinHandle<()> {
        self.cache.spawn_refresh(self.refresh_interval)
    }

    pub async fn run(&self) -> Result<()> {
        let (_, handle) = self.start().await?;
        let refresh = self.start_price_refresh();

        self.wait_for_shutdown().await?;

        info!("🛑 Shutting down server...");
        refresh.abort();
        handle.stop()?;
        handle.stopped().await;
        info!("✅ Server stopped gracefully");

        Ok(())
    }

    async fn wait_for_shutdown(&self) -> Result<()> {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        {
            let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
                .context("Failed to install signal handler")?;

            tokio::select! {
                result = ctrl_c => match result {
                    Ok(()) => info!("📡 Received Ctrl+C signal"),
                    Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
                },
                _ = terminate.recv() => {
                    info!("📡 Received terminate signal");
                },
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = ctrl_c.await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
        }

        Ok(())
    }
}
