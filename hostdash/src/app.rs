//! App state and main loop: input handling, applying scheduler updates, and drawing.

use std::{
    collections::VecDeque,
    io,
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::alerts::{AlertEvent, ThresholdConfig};
use crate::client::MonitorApi;
use crate::clock::SystemClock;
use crate::config::DashboardConfig;
use crate::history::SeriesName;
use crate::logs::LogLine;
use crate::scheduler::Scheduler;
use crate::session::Session;
use crate::sink::{ChannelSink, SeriesData, UiEvent};
use crate::types::MetricSample;
use crate::ui::{
    alerts::draw_alerts, chart::draw_percent_chart, gauges::draw_usage_gauge,
    header::draw_header, logs::draw_logs, net::draw_net_spark, services::draw_services, theme,
};

const ALERT_FEED_CAP: usize = 50;

pub struct App {
    target: String,
    thresholds: ThresholdConfig,
    history_cap: usize,

    // Latest sample + chart feeds
    last_sample: Option<MetricSample>,
    cpu: SeriesData,
    memory: SeriesData,
    net_sent: SeriesData,
    net_recv: SeriesData,
    sent_peak: f64,
    recv_peak: f64,

    logs: Vec<LogLine>,
    alerts: VecDeque<(String, AlertEvent)>,
    clock: Option<DateTime<Local>>,

    should_quit: bool,
}

impl App {
    pub fn new(target: &str, thresholds: ThresholdConfig, history_cap: usize) -> Self {
        Self {
            target: target.to_string(),
            thresholds,
            history_cap,
            last_sample: None,
            cpu: SeriesData::default(),
            memory: SeriesData::default(),
            net_sent: SeriesData::default(),
            net_recv: SeriesData::default(),
            sent_peak: 0.0,
            recv_peak: 0.0,
            logs: Vec::new(),
            alerts: VecDeque::with_capacity(ALERT_FEED_CAP),
            clock: None,
            should_quit: false,
        }
    }

    pub async fn run<A: MonitorApi>(
        mut self,
        api: Arc<A>,
        session: Session,
        config: DashboardConfig,
    ) -> anyhow::Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::new(
            api,
            Arc::new(SystemClock),
            ChannelSink::new(tx),
            session,
            config,
        );
        let cancel = CancellationToken::new();
        let poller = tokio::spawn(scheduler.run(cancel.clone()));

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal, rx).await;

        cancel.cancel();
        let joined = poller.await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res?;
        joined.context("scheduler task")?;
        Ok(())
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut rx: UnboundedReceiver<UiEvent>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    let ctrl_c = k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(k.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            while let Ok(ev) = rx.try_recv() {
                self.handle(ev);
            }

            terminal.draw(|f| self.draw(f))?;

            sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    /// Fold one scheduler notification into the view state.
    pub fn handle(&mut self, ev: UiEvent) {
        match ev {
            UiEvent::Sample(s) => self.last_sample = Some(*s),
            UiEvent::Series(name, data) => {
                let latest = data.values.last().copied().unwrap_or(0.0);
                match name {
                    SeriesName::Cpu => self.cpu = data,
                    SeriesName::Memory => self.memory = data,
                    SeriesName::NetSent => {
                        self.sent_peak = self.sent_peak.max(latest);
                        self.net_sent = data;
                    }
                    SeriesName::NetRecv => {
                        self.recv_peak = self.recv_peak.max(latest);
                        self.net_recv = data;
                    }
                }
            }
            UiEvent::Logs(lines) => self.logs = lines,
            UiEvent::Alerts(at, batch) => {
                for a in batch {
                    crate::history::push_capped(&mut self.alerts, (at.clone(), a), ALERT_FEED_CAP);
                }
            }
            UiEvent::Clock(now) => self.clock = Some(now),
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, charts, gauges, network, bottom lists
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),   // header
                Constraint::Ratio(1, 3), // cpu + memory charts
                Constraint::Length(3),   // memory / swap / disk gauges
                Constraint::Length(5),   // net sent / recv
                Constraint::Min(8),      // services, logs, alerts
            ])
            .split(area);

        draw_header(f, rows[0], self.last_sample.as_ref(), self.clock, &self.target);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        draw_percent_chart(f, charts[0], "CPU", &self.cpu, self.history_cap, theme::CPU);
        draw_percent_chart(f, charts[1], "Memory", &self.memory, self.history_cap, theme::MEMORY);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[2]);
        let sys = self.last_sample.as_ref().map(|s| &s.system);
        draw_usage_gauge(f, gauges[0], "Memory", sys.map(|m| &m.memory), self.thresholds.memory);
        draw_usage_gauge(f, gauges[1], "Swap", sys.map(|m| &m.swap), self.thresholds.swap);
        draw_usage_gauge(f, gauges[2], "Disk", sys.map(|m| &m.disk), self.thresholds.disk);

        let net = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        draw_net_spark(f, net[0], "Sent", &self.net_sent, self.sent_peak, theme::NET_SENT);
        draw_net_spark(f, net[1], "Received", &self.net_recv, self.recv_peak, theme::NET_RECV);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(45),
                Constraint::Percentage(30),
            ])
            .split(rows[4]);
        let services = self
            .last_sample
            .as_ref()
            .map(|s| s.services.as_slice())
            .unwrap_or_default();
        draw_services(f, bottom[0], services);
        draw_logs(f, bottom[1], &self.logs);
        draw_alerts(f, bottom[2], &self.alerts);
    }

    pub fn alert_feed(&self) -> &VecDeque<(String, AlertEvent)> {
        &self.alerts
    }

    pub fn peaks(&self) -> (f64, f64) {
        (self.sent_peak, self.recv_peak)
    }
}
