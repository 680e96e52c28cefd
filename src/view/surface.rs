use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::render::regions;
use crate::view::{escape_html, Node};

/// Host of the named display regions the renderer writes into.
pub trait Surface {
    fn has_region(&self, id: &str) -> bool;
    fn replace_region(&mut self, id: &str, content: Node);

    /// Push pending changes to wherever the surface displays them.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory surface with an explicit set of present regions.
#[derive(Debug, Default)]
pub struct MemorySurface {
    present: BTreeSet<String>,
    content: BTreeMap<String, Node>,
    writes: Vec<String>,
}

impl MemorySurface {
    /// A surface exposing every region the dashboard knows about.
    pub fn full() -> Self {
        Self::with_regions(regions::ALL.iter().copied())
    }

    pub fn with_regions<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            present: ids.into_iter().map(str::to_string).collect(),
            ..Default::default()
        }
    }

    pub fn remove_region(&mut self, id: &str) {
        self.present.remove(id);
        self.content.remove(id);
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.content.get(id)
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.get(id).map(Node::text_content)
    }

    /// Region ids written since the last call, in write order.
    pub fn take_writes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.writes)
    }
}

impl Surface for MemorySurface {
    fn has_region(&self, id: &str) -> bool {
        self.present.contains(id)
    }

    fn replace_region(&mut self, id: &str, content: Node) {
        self.writes.push(id.to_string());
        self.content.insert(id.to_string(), content);
    }
}

/// Surface that lays all regions out in one HTML page and rewrites the file
/// on every flush.
pub struct HtmlFileSurface {
    path: PathBuf,
    content: BTreeMap<String, Node>,
    dirty: bool,
}

const STYLE: &str = "body{font-family:sans-serif;background:#0f172a;color:#e2e8f0;margin:1.5rem}\
section{background:#1e293b;border-radius:8px;padding:1rem;margin-bottom:1rem}\
h2{font-size:1rem;color:#94a3b8;margin:0 0 .5rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(160px,1fr));gap:.75rem}\
.label{display:block;color:#94a3b8;font-size:.8rem}\
.profit,.good,.buy,.signal-bullish,.connected{color:#22c55e}\
.loss,.bad,.sell,.signal-bearish,.disconnected,.error{color:#ef4444}\
.signal-candle{color:#eab308}.empty-state{color:#64748b;font-style:italic}\
.card{border-bottom:1px solid #334155;padding:.5rem 0}";

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn region(&self, id: &str) -> String {
        let inner = self
            .content
            .get(id)
            .map(Node::to_html)
            .unwrap_or_else(|| "--".to_string());
        format!("<div id=\"{}\">{}</div>", escape_html(id), inner)
    }

    fn metric(&self, label: &str, id: &str) -> String {
        format!(
            "<div><span class=\"label\">{}</span>{}</div>",
            label,
            self.region(id)
        )
    }

    pub fn render_page(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta http-equiv=\"refresh\" content=\"5\">\n");
        html.push_str("<title>Trading Bot Dashboard</title>\n");
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

        html.push_str("<header>");
        html.push_str(&self.region(regions::CONNECTION_STATUS));
        html.push_str(&self.region(regions::LAST_UPDATED));
        html.push_str("</header>\n");

        html.push_str("<section><h2>Status</h2><div class=\"grid\">");
        html.push_str(&self.metric("Bot", regions::BOT_STATUS));
        html.push_str(&self.metric("Balance", regions::ACCOUNT_BALANCE));
        html.push_str(&self.metric("Floating P&amp;L", regions::FLOATING_PNL));
        html.push_str(&self.metric("Win Rate", regions::WIN_RATE));
        html.push_str(&self.metric("Open Positions", regions::OPEN_POSITIONS));
        html.push_str("</div></section>\n");

        html.push_str("<section><h2>Performance</h2><div class=\"grid\">");
        html.push_str(&self.metric("Balance", regions::METRIC_BALANCE));
        html.push_str(&self.metric("P&amp;L", regions::METRIC_PNL));
        html.push_str(&self.metric("Win Rate", regions::METRIC_WIN_RATE));
        html.push_str(&self.metric("Total Trades", regions::METRIC_TOTAL_TRADES));
        html.push_str(&self.metric("Winning", regions::METRIC_WINNING_TRADES));
        html.push_str(&self.metric("Losing", regions::METRIC_LOSING_TRADES));
        html.push_str(&self.metric("Profit Factor", regions::METRIC_PROFIT_FACTOR));
        html.push_str("</div></section>\n");

        for (title, id) in [
            ("Active Positions", regions::POSITIONS_LIST),
            ("Recent Trades", regions::TRADES_LIST),
            ("Live Signals", regions::SIGNALS_LIST),
            ("Strategy Config", regions::CONFIG_PANEL),
        ] {
            html.push_str(&format!("<section><h2>{}</h2>{}</section>\n", title, self.region(id)));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Surface for HtmlFileSurface {
    fn has_region(&self, id: &str) -> bool {
        regions::ALL.contains(&id)
    }

    fn replace_region(&mut self, id: &str, content: Node) {
        if self.content.get(id) != Some(&content) {
            self.content.insert(id.to_string(), content);
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        // Write then rename so a viewer never sees a half-written page.
        let tmp = self.path.with_extension("html.tmp");
        fs::write(&tmp, self.render_page())?;
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        debug!("Dashboard written to {}", self.path.display());
        Ok(())
    }
}
