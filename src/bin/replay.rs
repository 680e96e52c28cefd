use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use bot_dashboard::client::DashboardClient;
use bot_dashboard::config::DashboardConfig;
use bot_dashboard::dashboard::Dashboard;
use bot_dashboard::notify::Silent;
use bot_dashboard::render::format::{money, percent, signed_money};
use bot_dashboard::transport::ReplayTransport;
use bot_dashboard::view::HtmlFileSurface;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = DashboardConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Usage: replay <frames.log> [output.html]
    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .context("usage: replay <frames.log> [output.html]")?;
    if let Some(output) = args.get(2) {
        cfg.output_path = output.into();
    }

    let transport = ReplayTransport::from_file(input)
        .await
        .with_context(|| format!("Failed to read {}", input))?;
    let frames = transport.remaining();

    let surface = HtmlFileSurface::new(cfg.output_path.clone());
    let dashboard = Dashboard::new(&cfg, surface, Box::new(Silent));
    let output = cfg.output_path.clone();
    let mut client = DashboardClient::new(cfg, dashboard, transport);
    client.run().await?;

    let dash = client.dashboard();
    let s = dash.snapshot();

    println!("\n{}", "=".repeat(60));
    println!("  REPLAY SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Events:      {}", frames);
    println!("  Connection:  {}", dash.connection());
    let status = if s.status.is_empty() {
        "OFFLINE"
    } else {
        s.status.as_str()
    };
    println!("  Status:      {}", status);
    println!("  Balance:     {}", money(s.account_balance));
    println!("  Floating:    {}", signed_money(s.floating_pnl));
    println!(
        "  Trades:      {} ({} W / {} L, {})",
        s.total_trades,
        s.winning_trades,
        s.losing_trades,
        percent(s.win_rate, 1)
    );
    println!("  Positions:   {}", s.active_positions.len());
    println!("  Signals:     {}", s.trading_signals.len());
    println!("  Output:      {}", output.display());
    println!("{}", "=".repeat(60));

    Ok(())
}
