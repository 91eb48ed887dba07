//! Index assignment for ordered child collections.
//!
//! Everything here is pure: a snapshot goes in, a plan of target indices comes
//! out. The plan names a target for every surviving child, including children
//! whose target equals their stored index; dropping those is the writer's job.
//!
//! Planning always works on the canonical order (stored index ascending,
//! duplicates ranked by the configured tie-break), never on raw stored
//! values, so any gap or duplicate in the input is healed by the next plan.

mod ordered;
mod plan;

pub use ordered::OrderedChildren;
pub use plan::{
    IndexTarget, OrderPlan, PlanKind, plan_append, plan_canonical, plan_move, plan_remove,
};
