//! Redundant local-variable elimination for one function body at a time
//! (spec.md §1–§8). Pass order is fixed and documented at each call site
//! below; no pass may observe the output of a later one.
//!
//! ```text
//! closure guard -> basic stats -> initializer analysis -> transitive closure
//!   -> live-range analysis -> eligibility -> declaration removal -> collapse
//!   -> substitution
//! ```

mod closure;
mod closure_guard;
mod error;
mod eligibility;
mod init_analysis;
mod live_range;
mod rewrite;
mod stats;
mod tables;
mod target;
mod walk;

pub use error::Error;
pub use eligibility::MAX_USES;
pub use tables::Tables;
pub use walk::{WalkControl, walk_body_mut, walk_mut};

use collapse_vars_ast::Node;
use indexmap::IndexMap;

/// The per-function result: either the count of eliminated variables,
/// or the sentinel meaning the closure guard rejected the body (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeOutcome {
    Skipped,
    Eliminated(usize),
}

/// Run the full pipeline over one function body, mutating it in place.
pub fn optimize_function(body: &mut Vec<Node>) -> Result<OptimizeOutcome, Error> {
    check_var_bindings_nonempty(body)?;

    if closure_guard::should_skip(body) {
        return Ok(OptimizeOutcome::Skipped);
    }

    let mut tables = stats::run(body);
    init_analysis::run(&mut tables);
    closure::run(&mut tables);
    live_range::run(body, &mut tables);

    let eliminable = eligibility::eligible_names(&tables);

    let mut initializers: IndexMap<String, Node> = eliminable
        .iter()
        .map(|name| {
            let init = tables
                .initial_value
                .get(name)
                .cloned()
                .expect("single-def variable always has exactly one initial_value entry");
            (name.clone(), init)
        })
        .collect();

    rewrite::remove_declarations(body, &eliminable);
    rewrite::collapse_initializers(&mut initializers);
    rewrite::substitute_at_use_sites(body, &initializers);

    Ok(OptimizeOutcome::Eliminated(eliminable.len()))
}

fn check_var_bindings_nonempty(body: &[Node]) -> Result<(), Error> {
    let mut ok = true;
    walk::walk_body_ref(body, &mut |node| {
        if let Node::Var(bindings) = node {
            if bindings.is_empty() {
                ok = false;
            }
        }
    });
    if ok { Ok(()) } else { Err(Error::EmptyVarBindings) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_var_bindings_is_an_error() {
        let mut body = vec![Node::Var(vec![])];
        assert_eq!(optimize_function(&mut body), Err(Error::EmptyVarBindings));
    }
}
