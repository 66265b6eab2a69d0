use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::unbounded_channel;
use tracing::warn;

use crate::common::QuantityPolicy;
use crate::estimator::Estimator;
use crate::price::PriceCache;
use crate::quantity::{Quantity, QuantityInput};

// Render an estimate for `quantity` with whatever price the cache holds
pub fn render_estimate(estimator: &Estimator, cache: &PriceCache, quantity: Quantity) -> String {
    let cached = cache.latest();

    match estimator.estimate(quantity, cached.as_ref().map(|c| &c.price)) {
        Ok(estimate) => {
            let mut out = format!(
                "{} photos: {}\n  {}",
                quantity,
                estimate.display_cost(),
                estimator.breakdown(&estimate)
            );
            if let Some(note) = estimate.gas_price_note() {
                out.push_str(&format!("\n  {}", note));
            }
            out
        }
        Err(e) => {
            warn!("❌ Estimation failed: {}", e);
            format!("{} photos: {}", quantity, e)
        }
    }
}

/// Reads one quantity edit per line and prints the updated estimate.
///
/// The estimate for the initial quantity is printed first. Stops at end of
/// input.
pub async fn run_interactive<R, W>(
    estimator: &Estimator,
    cache: &PriceCache,
    policy: QuantityPolicy,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let initial = Quantity::initial();
    writer
        .write_all(format!("{}\n", render_estimate(estimator, cache, initial)).as_bytes())
        .await?;

    // the input reports accepted edits through this channel
    let (changes_tx, mut changes_rx) = unbounded_channel();
    let mut input = QuantityInput::new(initial, policy, move |quantity| {
        let _ = changes_tx.send(quantity);
    });

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(e) = input.on_input(&line) {
            writer
                .write_all(format!("{} (keeping {})\n", e, input.current()).as_bytes())
                .await?;
            continue;
        }

        while let Ok(quantity) = changes_rx.try_recv() {
            let text = render_estimate(estimator, cache, quantity);
            writer.write_all(format!("{}\n", text).as_bytes()).await?;
        }
    }

    writer.flush().await?;
    Ok(())
}
