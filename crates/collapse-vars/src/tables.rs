//! Per-function analysis state (§3).
//!
//! Every table is indexed by identifier name and scoped to exactly one
//! function body; nothing here persists across invocations of
//! [`crate::optimize_function`].

use collapse_vars_ast::Node;
use indexmap::{IndexMap, IndexSet};

/// All tables use `indexmap` rather than `std::collections` so that
/// iterating an eliminable/dependency set during the rewrite passes
/// visits names in first-declaration order instead of hash order —
/// the same reason the teacher's own compile passes iterate `IndexMap`s
/// when a pass's output order is itself observable (stats, diagnostics,
/// generated code).
#[derive(Debug, Default)]
pub struct Tables {
    /// Names declared via `var` in this body.
    pub is_local: IndexSet<String>,
    /// Exactly one assigning occurrence (the declaration itself).
    pub is_single_def: IndexMap<String, bool>,
    /// Number of `name`-kind reads of this identifier.
    pub use_count: IndexMap<String, usize>,
    /// The initializer expression for a single-def variable.
    pub initial_value: IndexMap<String, Node>,
    /// Initializer subtree contains only side-effect-free kinds.
    pub uses_only_simple_nodes: IndexMap<String, bool>,
    /// `depends_on[R]` is the set of variables whose initializers read
    /// `R` (transitively closed after §4.5 runs).
    pub depends_on: IndexMap<String, IndexSet<String>>,
    /// Transitively reads at least one non-local name.
    pub depends_on_a_global: IndexMap<String, bool>,
    /// A dependency may have been mutated during this variable's live
    /// range (§4.6 — set when a single-def name is read while *not*
    /// currently live, i.e. "was live, then killed").
    pub deps_mutated_in_live_range: IndexMap<String, bool>,
}

impl Tables {
    pub fn is_single_def(&self, name: &str) -> bool {
        self.is_single_def.get(name).copied().unwrap_or(false)
    }

    pub fn use_count(&self, name: &str) -> usize {
        self.use_count.get(name).copied().unwrap_or(0)
    }
}
