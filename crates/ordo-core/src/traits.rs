// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified path naming a runtime node.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// CollectionKind
///
/// Marker for one ordered parent→children relation, e.g. the models of a
/// purchase. The path keys debug output and per-collection metrics.
///

pub trait CollectionKind: Path + 'static {}
