//! Observability: operation telemetry and sink abstractions.
//!
//! Order and write logic never touch metrics state directly; every event
//! flows through [`MetricsEvent`] and a [`MetricsSink`].

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::{CollectionCounters, EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, OpKind, metrics_report, metrics_reset_all};
