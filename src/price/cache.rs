use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tracing::{info, warn};

use super::{FeedError, GasPrice, GasPriceFeed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedGasPrice {
    pub price: GasPrice,
    pub fetched_at: DateTime<Utc>,
}

/// Last gas price fetched from a feed.
///
/// One refresh task writes, any number of readers take snapshots. A failed
/// refresh keeps the previous price.
#[derive(Debug, Clone)]
pub struct PriceCache {
    feed: Arc<dyn GasPriceFeed>,
    sender: Arc<watch::Sender<Option<CachedGasPrice>>>,
}

impl PriceCache {
    pub fn new(feed: Arc<dyn GasPriceFeed>) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            feed,
            sender: Arc::new(sender),
        }
    }

    // snapshot of the cached price, None until the first successful fetch
    pub fn latest(&self) -> Option<CachedGasPrice> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CachedGasPrice>> {
        self.sender.subscribe()
    }

    // fetch once and store the result on success
    pub async fn refresh(&self) -> Result<CachedGasPrice, FeedError> {
        let price = self.feed.fetch_gas_price().await?;
        let cached = CachedGasPrice {
            price,
            fetched_at: Utc::now(),
        };

        self.sender.send_replace(Some(cached.clone()));
        Ok(cached)
    }

    // fetch now, then again on every tick when an interval is given
    pub fn spawn_refresh(&self, every: Option<Duration>) -> JoinHandle<()> {
        let cache = self.clone();

        tokio::spawn(async move {
            let Some(every) = every else {
                cache.refresh_logged().await;
                return;
            };

            info!("⛽ Refreshing gas price every {:?}", every);
            let mut ticker = interval(every);

            loop {
                // the first tick completes immediately
                ticker.tick().await;
                cache.refresh_logged().await;
            }
        })
    }

    async fn refresh_logged(&self) {
        match self.refresh().await {
            Ok(cached) => {
                info!(
                    "⛽ [{}] Gas price updated: {} gwei",
                    cached.fetched_at.format("%H:%M:%S"),
                    cached.price.gwei_display()
                );
            }
            Err(e) => {
                warn!("❌ Gas price refresh failed: {}", e);
            }
        }
    }
}
