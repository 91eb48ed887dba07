
use crate::{
    config::OrderConfig,
    diagnostics::OrderReport,
    error::InternalError,
    obs::sink::{self, MetricsEvent, MetricsSink, OpKind, Span},
    order::{OrderPlan, OrderedChildren, plan_append, plan_move, plan_remove},
    store::ChildStore,
    traits::CollectionKind,
    types::{ChildId, ParentId},
    write::{MutationBatch, apply_batch},
};
use std::marker::PhantomData;

///
/// WriteReport
///
/// What one structural operation issued against the store.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteReport {
    pub kind: OpKind,
    pub batch: MutationBatch,
    pub created: Option<ChildId>,

    /// True when the operation also repaired a corrupt snapshot.
    pub healed: bool,
}

impl WriteReport {
    /// Number of pre-existing children whose index was rewritten.
    #[must_use]
    pub fn index_writes(&self) -> u64 {
        self.batch.counts().index_writes
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.batch.is_empty()
    }
}

///
/// OrderSession
///
/// Session-scoped handle over a child store with policy (config, debug,
/// metrics).
///
/// The store is typically a unit of work: the session issues an operation's
/// mutations into it and the caller commits or drops it. Mutations of one
/// parent's children must be serialized by the caller.
///

pub struct OrderSession<S: ChildStore> {
    store: S,
    config: OrderConfig,
    debug: bool,
    metrics: Option<&'static dyn MetricsSink>,
}

impl<S: ChildStore> OrderSession<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: OrderConfig::default(),
            debug: false,
            metrics: None,
        }
    }

    /// Build a session with an explicit, validated config.
    pub fn with_config(store: S, config: OrderConfig) -> Result<Self, InternalError> {
        config.validate()?;

        Ok(Self {
            store,
            debug: config.debug,
            config,
            metrics: None,
        })
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &OrderConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Handle on the `K` collection owned by `parent`.
    pub const fn collection<K: CollectionKind>(&mut self, parent: ParentId) -> Collection<'_, S, K> {
        Collection {
            session: self,
            parent,
            _marker: PhantomData,
        }
    }

    fn debug_log(&self, s: impl Into<String>) {
        if self.debug {
            println!("[debug] {}", s.into());
        }
    }

    fn fetch(&self, parent: ParentId) -> Result<OrderedChildren, InternalError> {
        let snapshot = self.store.fetch_children(parent)?;

        Ok(OrderedChildren::from_snapshot(
            snapshot,
            self.config.tie_break,
        ))
    }

    fn with_metrics<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        if let Some(metrics) = self.metrics {
            sink::with_metrics_sink(metrics, || f(self))
        } else {
            f(self)
        }
    }
}

///
/// Collection
///
/// One parent's ordered children of kind `K`.
///

pub struct Collection<'a, S: ChildStore, K: CollectionKind> {
    session: &'a mut OrderSession<S>,
    parent: ParentId,
    _marker: PhantomData<K>,
}

impl<S: ChildStore, K: CollectionKind> Collection<'_, S, K> {
    #[must_use]
    pub const fn parent(&self) -> ParentId {
        self.parent
    }

    // ======================================================================
    // Reads
    // ======================================================================

    /// Current children in canonical order.
    pub fn children(&self) -> Result<OrderedChildren, InternalError> {
        self.session.fetch(self.parent)
    }

    /// Index health of the current children. Never writes.
    pub fn inspect(&self) -> Result<OrderReport, InternalError> {
        let snapshot = self.session.store.fetch_children(self.parent)?;

        Ok(OrderReport::from_records(&snapshot))
    }

    // ======================================================================
    // Structural operations
    // ======================================================================

    /// Append a new child; it receives index `n` and is returned attached.
    pub fn add_child(&mut self) -> Result<ChildId, InternalError> {
        let max_children = self.session.config.max_children;
        let report = self.execute(OpKind::Add, |children| {
            plan_append(children, max_children)
        })?;

        report
            .created
            .ok_or_else(|| InternalError::write_internal("append batch created no child"))
    }

    /// Delete `child` and close the gap it leaves.
    pub fn remove_child(&mut self, child: ChildId) -> Result<WriteReport, InternalError> {
        self.execute(OpKind::Remove, |children| plan_remove(children, child))
    }

    /// Move the child at canonical position `from` to canonical position `to`.
    pub fn move_child(&mut self, from: usize, to: usize) -> Result<WriteReport, InternalError> {
        self.execute(OpKind::Move, |children| plan_move(children, from, to))
    }

    /// Reassign `child` to the same kind of collection under `destination`.
    ///
    /// The source closes the gap as in a remove; the destination receives the
    /// child at index `n` as in an add.
    pub fn transfer_child(
        &mut self,
        child: ChildId,
        destination: ParentId,
    ) -> Result<WriteReport, InternalError> {
        let parent = self.parent;

        self.session.with_metrics(|session| {
            let mut span = Span::new(OpKind::Transfer, K::PATH);
            let result = Self::transfer_inner(session, &mut span, parent, child, destination);
            Self::settle(session, &span, OpKind::Transfer, parent, result)
        })
    }

    fn transfer_inner(
        session: &mut OrderSession<S>,
        span: &mut Span,
        parent: ParentId,
        child: ChildId,
        destination: ParentId,
    ) -> Result<WriteReport, InternalError> {
        if destination == parent {
            return Err(InternalError::session_precondition(format!(
                "cannot transfer child {child}: destination is the current parent {parent}"
            )));
        }

        let max_children = session.config.max_children;
        let source = session.fetch(parent)?;
        let target = session.fetch(destination)?;
        let remove = plan_remove(&source, child)?;
        let append = plan_append(&target, max_children)?;

        let batch = MutationBatch::from_transfer(child, &remove, destination, &append)?;
        let healed = remove.healed || append.healed;
        let report = Self::apply(session, span, OpKind::Transfer, batch, healed)?;

        Self::record_heal(&source, &remove);
        Self::record_heal(&target, &append);

        Ok(report)
    }

    // Shared plan → diff → apply pipeline for single-collection operations.
    fn execute(
        &mut self,
        kind: OpKind,
        planner: impl FnOnce(&OrderedChildren) -> Result<OrderPlan, InternalError>,
    ) -> Result<WriteReport, InternalError> {
        let parent = self.parent;

        self.session.with_metrics(|session| {
            let mut span = Span::new(kind, K::PATH);
            let result = Self::execute_inner(session, &mut span, kind, parent, planner);
            Self::settle(session, &span, kind, parent, result)
        })
    }

    fn execute_inner(
        session: &mut OrderSession<S>,
        span: &mut Span,
        kind: OpKind,
        parent: ParentId,
        planner: impl FnOnce(&OrderedChildren) -> Result<OrderPlan, InternalError>,
    ) -> Result<WriteReport, InternalError> {
        let children = session.fetch(parent)?;
        let plan = planner(&children)?;

        let batch = MutationBatch::from_plan(parent, &plan);
        let report = Self::apply(session, span, kind, batch, plan.healed)?;
        Self::record_heal(&children, &plan);

        Ok(report)
    }

    // Every failure after the span opens is reported as a rejection.
    fn settle(
        session: &OrderSession<S>,
        span: &Span,
        kind: OpKind,
        parent: ParentId,
        result: Result<WriteReport, InternalError>,
    ) -> Result<WriteReport, InternalError> {
        if let Err(err) = &result {
            span.reject();
            session.debug_log(format!(
                "{} {kind:?} parent={parent} rejected: {err}",
                K::PATH
            ));
        }

        result
    }

    fn apply(
        session: &mut OrderSession<S>,
        span: &mut Span,
        kind: OpKind,
        batch: MutationBatch,
        healed: bool,
    ) -> Result<WriteReport, InternalError> {
        let counts = batch.counts();
        session.debug_log(format!(
            "{} {kind:?} writes={} creates={} deletes={} reparents={} skipped={} healed={healed}",
            K::PATH,
            counts.index_writes,
            counts.creates,
            counts.deletes,
            counts.reparents,
            counts.skipped,
        ));

        let created = apply_batch(&mut session.store, &batch)?;
        span.set_counts(counts);

        Ok(WriteReport {
            kind,
            batch,
            created,
            healed,
        })
    }

    fn record_heal(children: &OrderedChildren, plan: &OrderPlan) {
        if !plan.healed {
            return;
        }

        sink::record(MetricsEvent::Healed {
            collection_path: K::PATH,
            children: OrderReport::from_records(children.as_slice()).corrupt_children(),
        });
    }
}
