//! Eligibility Decision (§4.7).
//!
//! Folds every table populated by the earlier passes into one verdict
//! per single-def name: is it safe to delete the declaration and
//! substitute its initializer at every use site?

use crate::tables::Tables;
use indexmap::IndexSet;

/// A variable beyond this many reads is left alone even if every other
/// condition holds — substituting it would duplicate its initializer
/// past the point of being a size win.
pub const MAX_USES: usize = 3;

pub fn eligible_names(tables: &Tables) -> IndexSet<String> {
    tables
        .is_single_def
        .iter()
        .filter(|(_, is_single)| **is_single)
        .map(|(name, _)| name.clone())
        .filter(|name| is_eligible(name, tables))
        .collect()
}

fn is_eligible(name: &str, tables: &Tables) -> bool {
    if !tables.is_single_def(name) {
        return false;
    }
    if !tables.uses_only_simple_nodes.get(name).copied().unwrap_or(false) {
        return false;
    }
    let uses = tables.use_count(name);
    if uses == 0 {
        return true;
    }
    uses <= MAX_USES && !tables.deps_mutated_in_live_range.get(name).copied().unwrap_or(false)
}
