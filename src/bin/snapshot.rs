//! One-shot refresh printed to stdout.

use dotenvy::dotenv;
use levelboard::config::DashboardConfig;
use levelboard::core::dashboard::{Dashboard, DashboardSnapshot};
use levelboard::logging;
use levelboard::services::tradingview::TradingViewProvider;
use levelboard::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    let market_data = Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);
    let recommendations = Arc::new(TradingViewProvider::new(config.tradingview_base_url.clone())?);
    let dashboard = Dashboard::new(config, market_data, recommendations);

    let snapshot = dashboard.refresh().await?;
    print_snapshot(&snapshot);

    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!("{} dashboard", snapshot.symbol);
    match &snapshot.market {
        Some(market) => {
            println!("  Signal: {}", market.signal.signal);
            println!("  Price: ${:.2}", market.current_price);
            println!("  Reason: {}", market.signal.reason);
            println!("  Levels:");
            for (i, level) in market.levels.iter().enumerate() {
                println!(
                    "    {}. {} at {:.2} (bar {})",
                    i + 1,
                    level.kind,
                    level.average_price,
                    level.anchor_index
                );
            }
        }
        None => println!(
            "  {}",
            snapshot.market_error.as_deref().unwrap_or_default()
        ),
    }

    match (&snapshot.recommendation, &snapshot.recommendation_error) {
        (Some(rec), _) => println!(
            "  Recommendation: {} (buy {}, sell {}, neutral {})",
            rec.label, rec.buy, rec.sell, rec.neutral
        ),
        (None, Some(e)) => println!("  Recommendation: {}", e),
        (None, None) => {}
    }

    let stats = &snapshot.statistics;
    println!("  Wins: {}  Losses: {}", stats.wins, stats.losses);
    println!("  Win ratio: {:.2}%", stats.win_ratio * 100.0);
    println!("  Profit factor: {:.2}", stats.profit_factor);
    println!("  Avg win: {:.2}  Avg loss: {:.2}", stats.average_win, stats.average_loss);
}
