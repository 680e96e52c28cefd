//! Snapshot to view projection.
//!
//! Each fragment is a pure function of the snapshot. The [`Renderer`] places
//! the resulting trees into a [`Surface`], region by region: a region the
//! surface does not have is skipped with a warning and never stops the rest
//! of the pass.

pub mod banner;
pub mod config_panel;
pub mod format;
pub mod positions;
pub mod signals;
pub mod status;
pub mod trades;

use chrono::NaiveTime;
use tracing::warn;

use crate::config::DashboardConfig;
use crate::connection::ConnectionState;
use crate::models::Snapshot;
use crate::view::{Node, Surface};

pub use banner::{connection_banner, last_updated};
pub use config_panel::config_panel;
pub use positions::positions_list;
pub use signals::signals_feed;
pub use status::{performance_metrics, status_bar};
pub use trades::trades_list;

/// Named display regions.
pub mod regions {
    pub const CONNECTION_STATUS: &str = "connection-status";
    pub const LAST_UPDATED: &str = "last-updated";

    pub const BOT_STATUS: &str = "bot-status";
    pub const ACCOUNT_BALANCE: &str = "account-balance";
    pub const FLOATING_PNL: &str = "floating-pnl";
    pub const WIN_RATE: &str = "win-rate";
    pub const OPEN_POSITIONS: &str = "open-positions";

    pub const METRIC_BALANCE: &str = "metric-balance";
    pub const METRIC_PNL: &str = "metric-pnl";
    pub const METRIC_WIN_RATE: &str = "metric-win-rate";
    pub const METRIC_TOTAL_TRADES: &str = "metric-total-trades";
    pub const METRIC_WINNING_TRADES: &str = "metric-winning-trades";
    pub const METRIC_LOSING_TRADES: &str = "metric-losing-trades";
    pub const METRIC_PROFIT_FACTOR: &str = "metric-profit-factor";

    pub const POSITIONS_LIST: &str = "positions-list";
    pub const TRADES_LIST: &str = "trades-list";
    pub const SIGNALS_LIST: &str = "signals-list";
    pub const CONFIG_PANEL: &str = "config-panel";

    pub const ALL: &[&str] = &[
        CONNECTION_STATUS,
        LAST_UPDATED,
        BOT_STATUS,
        ACCOUNT_BALANCE,
        FLOATING_PNL,
        WIN_RATE,
        OPEN_POSITIONS,
        METRIC_BALANCE,
        METRIC_PNL,
        METRIC_WIN_RATE,
        METRIC_TOTAL_TRADES,
        METRIC_WINNING_TRADES,
        METRIC_LOSING_TRADES,
        METRIC_PROFIT_FACTOR,
        POSITIONS_LIST,
        TRADES_LIST,
        SIGNALS_LIST,
        CONFIG_PANEL,
    ];
}

#[derive(Debug, Clone)]
pub struct Renderer {
    win_rate_threshold: f64,
}

impl Renderer {
    pub fn new(win_rate_threshold: f64) -> Self {
        Self { win_rate_threshold }
    }

    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self::new(cfg.win_rate_threshold)
    }

    /// Full pass over every data fragment. Returns how many regions were written.
    pub fn render_all(&self, snapshot: &Snapshot, surface: &mut dyn Surface) -> usize {
        let mut written = 0;

        let scalars = status_bar(snapshot, self.win_rate_threshold)
            .into_iter()
            .chain(performance_metrics(snapshot, self.win_rate_threshold));
        for (region, node) in scalars {
            written += place(surface, region, node) as usize;
        }

        written += place(surface, regions::POSITIONS_LIST, positions_list(snapshot)) as usize;
        written += place(surface, regions::TRADES_LIST, trades_list(snapshot)) as usize;
        written += place(surface, regions::SIGNALS_LIST, signals_feed(snapshot)) as usize;
        written += place(surface, regions::CONFIG_PANEL, config_panel(snapshot)) as usize;

        written
    }

    pub fn render_signals(&self, snapshot: &Snapshot, surface: &mut dyn Surface) -> bool {
        place(surface, regions::SIGNALS_LIST, signals_feed(snapshot))
    }

    pub fn render_connection(&self, state: &ConnectionState, surface: &mut dyn Surface) -> bool {
        place(surface, regions::CONNECTION_STATUS, connection_banner(state))
    }

    pub fn render_last_updated(&self, at: NaiveTime, surface: &mut dyn Surface) -> bool {
        place(surface, regions::LAST_UPDATED, last_updated(at))
    }
}

fn place(surface: &mut dyn Surface, region: &str, node: Node) -> bool {
    if !surface.has_region(region) {
        warn!("Display region '{}' not found, skipping", region);
        return false;
    }
    surface.replace_region(region, node);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_snapshot;
    use crate::view::MemorySurface;

    const DATA_REGIONS: usize = regions::ALL.len() - 2;

    #[test]
    fn full_pass_fills_every_data_region() {
        let mut surface = MemorySurface::full();
        let written = Renderer::new(50.0).render_all(&sample_snapshot(), &mut surface);

        assert_eq!(written, DATA_REGIONS);
        assert_eq!(surface.text(regions::BOT_STATUS).as_deref(), Some("LIVE"));
        assert!(surface.get(regions::CONNECTION_STATUS).is_none());
    }

    #[test]
    fn missing_region_does_not_block_others() {
        let mut surface = MemorySurface::full();
        surface.remove_region(regions::POSITIONS_LIST);
        surface.remove_region(regions::BOT_STATUS);

        let written = Renderer::new(50.0).render_all(&sample_snapshot(), &mut surface);

        assert_eq!(written, DATA_REGIONS - 2);
        assert!(surface.get(regions::POSITIONS_LIST).is_none());
        assert!(surface.get(regions::TRADES_LIST).is_some());
        assert!(surface.get(regions::SIGNALS_LIST).is_some());
        assert_eq!(
            surface.text(regions::ACCOUNT_BALANCE).as_deref(),
            Some("$10,250.75")
        );
    }

    #[test]
    fn surface_without_regions_is_harmless() {
        let mut surface = MemorySurface::with_regions([]);
        let renderer = Renderer::new(50.0);
        assert_eq!(renderer.render_all(&sample_snapshot(), &mut surface), 0);
        assert!(!renderer.render_signals(&sample_snapshot(), &mut surface));
        assert!(!renderer.render_connection(&ConnectionState::Connected, &mut surface));
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = Renderer::new(50.0);
        let snapshot = sample_snapshot();

        let mut first = MemorySurface::full();
        let mut second = MemorySurface::full();
        renderer.render_all(&snapshot, &mut first);
        renderer.render_all(&snapshot, &mut second);
        renderer.render_all(&snapshot, &mut second);

        for region in regions::ALL {
            assert_eq!(first.get(region), second.get(region), "{}", region);
        }
    }

    #[test]
    fn signals_only_pass_touches_one_region() {
        let mut surface = MemorySurface::full();
        assert!(Renderer::new(50.0).render_signals(&sample_snapshot(), &mut surface));
        assert_eq!(surface.take_writes(), vec![regions::SIGNALS_LIST.to_string()]);
    }
}
