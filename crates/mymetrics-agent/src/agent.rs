//! Agent lifecycle: collect and push loops until shutdown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::collector::{Collector, Snapshot};
use crate::pusher::push_all;
use crate::sink::MetricSink;
use crate::source::MetricsSource;

pub struct Agent {
    collector: Collector,
    sink: Arc<dyn MetricSink>,
    snapshot: Snapshot,
    poll_interval: Duration,
    report_interval: Duration,
}

impl Agent {
    pub fn new(
        source: Box<dyn MetricsSource>,
        sink: Arc<dyn MetricSink>,
        poll_interval: Duration,
        report_interval: Duration,
    ) -> Self {
        let snapshot = Snapshot::new();
        Self {
            collector: Collector::new(source, snapshot.clone()),
            sink,
            snapshot,
            poll_interval,
            report_interval,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// Run both loops until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let collect = tokio::spawn(collect_loop(self.collector, self.poll_interval));
        let push = tokio::spawn(push_loop(self.sink, self.snapshot, self.report_interval));

        shutdown.await;
        tracing::info!("agent stopping");
        collect.abort();
        push.abort();
    }
}

/// Polls immediately, then once per `every`.
async fn collect_loop(mut collector: Collector, every: Duration) {
    let mut tick = tokio::time::interval(every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tick.tick().await;
        collector.poll();
        tracing::trace!(polls = collector.polls(), "metrics collected");
    }
}

/// First push one full interval after start. Each batch is bounded by `every`.
async fn push_loop(sink: Arc<dyn MetricSink>, snapshot: Snapshot, every: Duration) {
    let mut tick = tokio::time::interval_at(Instant::now() + every, every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tick.tick().await;
        let values = snapshot.copy();
        let report = push_all(sink.as_ref(), &values, Instant::now() + every).await;
        if report.is_ok() {
            tracing::debug!(sent = report.sent, "metrics pushed");
            continue;
        }
        tracing::warn!(
            sent = report.sent,
            failed = report.failed.len(),
            "metric push incomplete"
        );
        for (name, e) in &report.failed {
            tracing::warn!(metric = %name, error = %e, "failed to push metric");
        }
    }
}
