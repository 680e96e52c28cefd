use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::transport::Transport;
use crate::view::Surface;

/// Single-task event loop: transport events, the startup request, the poll
/// timer and manual refreshes are handled one at a time in arrival order.
pub struct DashboardClient<T: Transport, S: Surface> {
    dashboard: Dashboard<S>,
    transport: T,
    cfg: DashboardConfig,
    refresh_tx: mpsc::Sender<()>,
    refresh_rx: mpsc::Receiver<()>,
    requests_sent: usize,
}

impl<T: Transport, S: Surface> DashboardClient<T, S> {
    pub fn new(cfg: DashboardConfig, dashboard: Dashboard<S>, transport: T) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel(8);
        Self {
            dashboard,
            transport,
            cfg,
            refresh_tx,
            refresh_rx,
            requests_sent: 0,
        }
    }

    /// Handle for triggering a manual refresh from elsewhere.
    pub fn refresh_handle(&self) -> mpsc::Sender<()> {
        self.refresh_tx.clone()
    }

    pub fn dashboard(&self) -> &Dashboard<S> {
        &self.dashboard
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    /// Manual refresh: always asks, connected or not.
    pub async fn refresh(&mut self) {
        self.request_update("manual").await;
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Dashboard client running (poll every {}s)",
            self.cfg.poll_interval_secs
        );

        let initial = time::sleep(self.cfg.initial_request_delay());
        tokio::pin!(initial);
        let mut initial_sent = false;

        let period = self.cfg.poll_interval();
        let mut poll = time::interval_at(Instant::now() + period, period);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down dashboard");
                    return Ok(());
                }
                _ = &mut initial, if !initial_sent => {
                    initial_sent = true;
                    self.request_update("startup").await;
                }
                _ = poll.tick() => {
                    if self.dashboard.is_connected() {
                        self.request_update("poll").await;
                    } else {
                        debug!("Skipping poll while {}", self.dashboard.connection());
                    }
                }
                Some(()) = self.refresh_rx.recv() => {
                    self.refresh().await;
                }
                event = self.transport.next_event() => match event {
                    Some(event) => self.dashboard.handle_event(event),
                    None => {
                        info!("Transport closed");
                        return Ok(());
                    }
                },
            }
        }
    }

    async fn request_update(&mut self, trigger: &str) {
        debug!("request_update ({})", trigger);
        match self.transport.request_update().await {
            Ok(()) => self.requests_sent += 1,
            Err(e) => warn!("request_update ({}) failed: {}", trigger, e),
        }
    }
}
