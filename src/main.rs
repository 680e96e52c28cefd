use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use bot_dashboard::client::DashboardClient;
use bot_dashboard::config::DashboardConfig;
use bot_dashboard::dashboard::Dashboard;
use bot_dashboard::notify;
use bot_dashboard::transport::SocketIoTransport;
use bot_dashboard::view::HtmlFileSurface;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!("{}", "=".repeat(60));
    info!("Trading bot dashboard starting up");
    info!("Backend: {}", cfg.backend_url);
    info!("Output: {}", cfg.output_path.display());
    info!("Type 'r' + Enter to refresh manually");
    info!("{}", "=".repeat(60));

    if let Some(dir) = cfg.output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let surface = HtmlFileSurface::new(cfg.output_path.clone());
    let dashboard = Dashboard::new(&cfg, surface, notify::from_config(cfg.sound_enabled));
    let transport = SocketIoTransport::new(&cfg);
    let mut client = DashboardClient::new(cfg, dashboard, transport);

    let refresh = client.refresh_handle();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if matches!(line.trim(), "r" | "refresh") && refresh.send(()).await.is_err() {
                warn!("Refresh channel closed");
                break;
            }
        }
    });

    client.run().await?;
    Ok(())
}
