//! Poll loop: one fetch per tick, results folded into the session in order.
//!
//! Fetches run as spawned tasks so a slow server never delays the next
//! tick. Their results come back over a channel tagged with the tick's
//! sequence number and are applied on the scheduler task, which is the only
//! place session state changes.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::alerts::AlertEvent;
use crate::client::MonitorApi;
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::session::{Session, TickUpdate};
use crate::sink::DashboardSink;
use crate::types::MetricSample;

type Outcome = (u64, Result<MetricSample, FetchError>);

pub struct Scheduler<A, C, S> {
    api: Arc<A>,
    clock: Arc<C>,
    sink: S,
    session: Session,
    config: DashboardConfig,
    next_seq: u64,
}

impl<A, C, S> Scheduler<A, C, S>
where
    A: MonitorApi,
    C: Clock + 'static,
    S: DashboardSink,
{
    pub fn new(api: Arc<A>, clock: Arc<C>, sink: S, session: Session, config: DashboardConfig) -> Self {
        Self {
            api,
            clock,
            sink,
            session,
            config,
            next_seq: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// One complete tick inline: fetch, apply, publish, transmit alerts.
    pub async fn tick(&mut self) -> Option<TickUpdate> {
        let seq = self.take_seq();
        let outcome = self.api.fetch_sample().await;
        let update = self.apply(seq, outcome)?;
        send_alerts(self.api.as_ref(), &update.admitted).await;
        Some(update)
    }

    fn apply(&mut self, seq: u64, outcome: Result<MetricSample, FetchError>) -> Option<TickUpdate> {
        let label = self.clock.label();
        let now_ms = self.clock.now_millis();
        let update = self.session.apply(seq, outcome, &label, now_ms)?;
        self.session.publish(&update, &mut self.sink);
        tracing::debug!(
            seq,
            points = self.session.history().len(),
            alerts = update.admitted.len(),
            "tick applied"
        );
        Some(update)
    }

    fn spawn_fetch(&mut self, tx: &mpsc::UnboundedSender<Outcome>) {
        let seq = self.take_seq();
        let api = Arc::clone(&self.api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let res = api.fetch_sample().await;
            let _ = tx.send((seq, res));
        });
    }

    /// Run until `cancel` fires. The first poll happens immediately.
    /// Returns the scheduler so callers can inspect final state.
    pub async fn run(mut self, cancel: CancellationToken) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();

        let mut poll = interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut wall = interval(self.config.clock_interval);
        wall.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            poll_ms = self.config.poll_interval.as_millis() as u64,
            clock_ms = self.config.clock_interval.as_millis() as u64,
            "scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("scheduler shutting down");
                    break;
                }
                _ = poll.tick() => self.spawn_fetch(&tx),
                _ = wall.tick() => self.sink.on_clock(self.clock.now().with_timezone(&Local)),
                Some((seq, res)) = rx.recv() => {
                    if let Some(update) = self.apply(seq, res) {
                        if !update.admitted.is_empty() {
                            let api = Arc::clone(&self.api);
                            tokio::spawn(async move {
                                send_alerts(api.as_ref(), &update.admitted).await;
                            });
                        }
                    }
                }
            }
        }
        self
    }

    /// Run on a spawned task until `shutdown` resolves, then stop it.
    /// A scheduler task that panics surfaces as an error right away.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<Self>
    where
        F: Future<Output = ()>,
        S: 'static,
    {
        let cancel = CancellationToken::new();
        let mut task = tokio::spawn(self.run(cancel.clone()));
        tokio::select! {
            res = &mut task => return res.context("scheduler task"),
            _ = shutdown => {}
        }
        cancel.cancel();
        task.await.context("scheduler task")
    }
}

/// One POST per tick covering every admitted alert; failures are dropped.
pub async fn send_alerts<A: MonitorApi + ?Sized>(api: &A, alerts: &[AlertEvent]) {
    if alerts.is_empty() {
        return;
    }
    match api.post_alerts(alerts).await {
        Ok(()) => tracing::info!(count = alerts.len(), "alerts reported to server"),
        Err(e) => tracing::warn!(count = alerts.len(), error = %e, "failed to report alerts"),
    }
}
