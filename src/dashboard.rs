use chrono::{Local, NaiveTime};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::connection::{ConnectionEvent, ConnectionState};
use crate::models::Snapshot;
use crate::notify::Notifier;
use crate::render::Renderer;
use crate::store::ViewModelStore;
use crate::transport::TransportEvent;
use crate::view::Surface;

/// Event handler tying the store, the connection banner and the renderer
/// together. Every call runs to completion: merge, then render, then flush.
pub struct Dashboard<S: Surface> {
    store: ViewModelStore,
    connection: ConnectionState,
    renderer: Renderer,
    surface: S,
    notifier: Box<dyn Notifier>,
    clock: fn() -> NaiveTime,
}

fn local_time() -> NaiveTime {
    Local::now().time()
}

impl<S: Surface> Dashboard<S> {
    pub fn new(cfg: &DashboardConfig, surface: S, notifier: Box<dyn Notifier>) -> Self {
        let mut dashboard = Self {
            store: ViewModelStore::new(),
            connection: ConnectionState::default(),
            renderer: Renderer::from_config(cfg),
            surface,
            notifier,
            clock: local_time,
        };

        // Paint defaults so the page is never blank before the first sync.
        dashboard.render_connection();
        dashboard
            .renderer
            .render_all(dashboard.store.snapshot(), &mut dashboard.surface);
        dashboard.flush();
        dashboard
    }

    /// Replace the wall clock used for the last-updated stamp.
    pub fn with_clock(mut self, clock: fn() -> NaiveTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn handle_event(&mut self, event: TransportEvent) {
        debug!("Event: {}", event.name());

        match event {
            TransportEvent::Connect => {
                info!("Connected to bot backend");
                self.set_connection(ConnectionEvent::Connect);
            }
            TransportEvent::Disconnect => {
                warn!("Disconnected from bot backend");
                self.set_connection(ConnectionEvent::Disconnect);
            }
            TransportEvent::Error(message) => {
                warn!("Transport error: {}", message);
                self.set_connection(ConnectionEvent::Error(message));
            }
            TransportEvent::InitialData(snapshot) => {
                info!(
                    "Initial sync: status={} balance={:.2} positions={} signals={}",
                    snapshot.status,
                    snapshot.account_balance,
                    snapshot.active_positions.len(),
                    snapshot.trading_signals.len()
                );
                self.store.initialize(snapshot);
                self.render_data();
            }
            TransportEvent::BotUpdate(update) => {
                self.store.apply_update(update);
                self.render_data();
            }
            TransportEvent::TradingSignal(signal) => {
                if !self.store.append_signal(signal.clone()) {
                    return;
                }
                info!(
                    "Signal: {} {} {}",
                    signal.kind, signal.instrument, signal.message
                );
                self.renderer
                    .render_signals(self.store.snapshot(), &mut self.surface);
                if let Err(e) = self.notifier.signal_cue(&signal) {
                    debug!("Signal cue failed: {}", e);
                }
            }
        }

        self.flush();
    }

    fn set_connection(&mut self, event: ConnectionEvent) {
        self.connection = self.connection.transition(event);
        self.render_connection();
    }

    fn render_connection(&mut self) {
        self.renderer
            .render_connection(&self.connection, &mut self.surface);
    }

    fn render_data(&mut self) {
        self.renderer
            .render_all(self.store.snapshot(), &mut self.surface);
        self.renderer
            .render_last_updated((self.clock)(), &mut self.surface);
    }

    fn flush(&mut self) {
        if let Err(e) = self.surface.flush() {
            warn!("Failed to flush dashboard: {}", e);
        }
    }
}
