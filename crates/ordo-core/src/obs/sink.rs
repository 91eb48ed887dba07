//! Metrics sink boundary.
//!
//! This module is the only bridge between order operations and the
//! process-local metrics state.

use crate::{obs::metrics, write::BatchCounts};
use std::cell::Cell;

thread_local! {
    static SINK_OVERRIDE: Cell<Option<&'static dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Add,
    Remove,
    Move,
    Transfer,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    OpStart {
        kind: OpKind,
        collection_path: &'static str,
    },
    OpFinish {
        kind: OpKind,
        collection_path: &'static str,
        counts: BatchCounts,
    },
    OpRejected {
        kind: OpKind,
        collection_path: &'static str,
    },
    Healed {
        collection_path: &'static str,
        children: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into global metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::OpStart {
                kind,
                collection_path,
            } => {
                metrics::with_state_mut(|m| {
                    let calls = match kind {
                        OpKind::Add => &mut m.ops.add_calls,
                        OpKind::Remove => &mut m.ops.remove_calls,
                        OpKind::Move => &mut m.ops.move_calls,
                        OpKind::Transfer => &mut m.ops.transfer_calls,
                    };
                    *calls = calls.saturating_add(1);

                    let entry = m
                        .collections
                        .entry(collection_path.to_string())
                        .or_default();
                    entry.calls = entry.calls.saturating_add(1);
                });
            }

            MetricsEvent::OpFinish {
                collection_path,
                counts,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.creates = m.ops.creates.saturating_add(counts.creates);
                    m.ops.index_writes = m.ops.index_writes.saturating_add(counts.index_writes);
                    m.ops.deletes = m.ops.deletes.saturating_add(counts.deletes);
                    m.ops.reparents = m.ops.reparents.saturating_add(counts.reparents);
                    m.ops.skipped_writes = m.ops.skipped_writes.saturating_add(counts.skipped);

                    let entry = m
                        .collections
                        .entry(collection_path.to_string())
                        .or_default();
                    entry.index_writes = entry.index_writes.saturating_add(counts.index_writes);
                    entry.skipped_writes = entry.skipped_writes.saturating_add(counts.skipped);
                });
            }

            MetricsEvent::OpRejected {
                collection_path, ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rejected_calls = m.ops.rejected_calls.saturating_add(1);

                    let entry = m
                        .collections
                        .entry(collection_path.to_string())
                        .or_default();
                    entry.rejected_calls = entry.rejected_calls.saturating_add(1);
                });
            }

            MetricsEvent::Healed {
                collection_path,
                children,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.heals = m.ops.heals.saturating_add(1);
                    m.ops.healed_children = m.ops.healed_children.saturating_add(children);

                    let entry = m
                        .collections
                        .entry(collection_path.to_string())
                        .or_default();
                    entry.heals = entry.heals.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    match SINK_OVERRIDE.with(Cell::get) {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub(crate) fn with_metrics_sink<T>(sink: &'static dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<&'static dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.replace(Some(sink)));
    let _guard = Guard(prev);

    f()
}

///
/// Span
///
/// RAII guard that emits start/finish events for one operation.
/// Finish accounting happens even on early return.
///

pub(crate) struct Span {
    kind: OpKind,
    collection_path: &'static str,
    counts: BatchCounts,
}

impl Span {
    #[must_use]
    pub(crate) fn new(kind: OpKind, collection_path: &'static str) -> Self {
        record(MetricsEvent::OpStart {
            kind,
            collection_path,
        });

        Self {
            kind,
            collection_path,
            counts: BatchCounts::default(),
        }
    }

    pub(crate) const fn set_counts(&mut self, counts: BatchCounts) {
        self.counts = counts;
    }

    pub(crate) fn reject(&self) {
        record(MetricsEvent::OpRejected {
            kind: self.kind,
            collection_path: self.collection_path,
        });
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        record(MetricsEvent::OpFinish {
            kind: self.kind,
            collection_path: self.collection_path,
            counts: self.counts,
        });
    }
}

///
/// TESTS
///
