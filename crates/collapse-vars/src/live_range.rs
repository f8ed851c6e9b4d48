//! Live-Range Mutation Analysis (§4.6) — the most intricate pass.
//!
//! Walks the body a second time threading a `live` set of single-def
//! names that are currently safe to substitute. Two visitors cooperate:
//!
//! - the *block visitor* (`walk_block`/`process_stmt`) drives statement
//!   sequencing, `var` declarations entering names into `live`, and
//!   compound control-flow nodes applying snapshot-and-intersect
//!   discipline across their branches;
//! - the *mutation visitor* (`mutation_visit`) walks expressions,
//!   killing `live` entries a reassignment or control-flow boundary can
//!   no longer vouch for, and flags `deps_mutated_in_live_range` the
//!   moment a single-def name is read while not currently live — i.e.
//!   it was live, then got killed, before this read.
//!
//! A node's own kill effect is always applied *after* recursing into
//! its children, so a statement that both uses and invalidates a name
//! (`return a;` where `a` depends on a non-local) still reads it
//! cleanly before the boundary closes behind it.

use crate::tables::Tables;
use crate::target::assignment_target_root;
use crate::walk::{children_ref, walk_ref};
use collapse_vars_ast::{Node, is_control_flow_kind};
use indexmap::IndexSet;

pub fn run(body: &[Node], tables: &mut Tables) {
    let mut live = IndexSet::new();
    walk_block(body, &mut live, tables);
}

fn walk_block(stmts: &[Node], live: &mut IndexSet<String>, tables: &mut Tables) {
    for stmt in stmts {
        process_stmt(stmt, live, tables);
    }
}

/// The block visitor's per-statement dispatch.
fn process_stmt(stmt: &Node, live: &mut IndexSet<String>, tables: &mut Tables) {
    match stmt {
        Node::Var(bindings) => {
            for binding in bindings {
                if let Some(init) = &binding.init {
                    mutation_visit(init, live, tables);
                }
                if tables.is_single_def(&binding.name) {
                    live.insert(binding.name.clone());
                }
            }
        }
        Node::Block(stmts) => walk_block(stmts, live, tables),
        Node::If {
            test,
            then_branch,
            else_branch,
        } => {
            let pre = live.clone();
            let mut branches = vec![branch_with_expr(&pre, test, tables)];
            branches.push(branch_with_body(&pre, then_branch, tables));
            if let Some(e) = else_branch {
                branches.push(branch_with_body(&pre, e, tables));
            }
            *live = intersect(branches);
        }
        Node::Switch {
            discriminant,
            cases,
        } => {
            let pre = live.clone();
            let mut branches = vec![branch_with_expr(&pre, discriminant, tables)];
            for case in cases {
                let mut snap = pre.clone();
                if let Some(t) = &case.test {
                    mutation_visit(t, &mut snap, tables);
                }
                walk_block(&case.body, &mut snap, tables);
                branches.push(snap);
            }
            *live = intersect(branches);
        }
        Node::Try {
            block,
            catch,
            finally,
        } => {
            let pre = live.clone();
            let mut branches = vec![branch_with_block(&pre, block, tables)];
            if let Some(c) = catch {
                branches.push(branch_with_block(&pre, &c.body, tables));
            }
            if let Some(f) = finally {
                branches.push(branch_with_block(&pre, f, tables));
            }
            *live = intersect(branches);
        }
        Node::While { test, body } => {
            let pre = live.clone();
            let test_branch = branch_with_expr(&pre, test, tables);
            let mut body_branch = pre.clone();
            handle_loop_body(&mut body_branch, body, tables);
            *live = intersect(vec![test_branch, body_branch]);
        }
        Node::Do { body, test } => {
            let pre = live.clone();
            let mut body_branch = pre.clone();
            handle_loop_body(&mut body_branch, body, tables);
            let test_branch = branch_with_expr(&pre, test, tables);
            *live = intersect(vec![body_branch, test_branch]);
        }
        Node::For {
            init,
            test,
            update,
            body,
        } => {
            // `init` runs exactly once, unconditionally, before the
            // repeated part of the loop — it mutates the real `live` set
            // directly rather than a branch snapshot.
            if let Some(i) = init {
                process_stmt(i, live, tables);
            }
            let pre = live.clone();
            let mut branches = vec![];
            if let Some(t) = test {
                branches.push(branch_with_expr(&pre, t, tables));
            }
            if let Some(u) = update {
                branches.push(branch_with_expr(&pre, u, tables));
            }
            let mut body_branch = pre.clone();
            handle_loop_body(&mut body_branch, body, tables);
            branches.push(body_branch);
            *live = intersect(branches);
        }
        Node::ForIn { object, body, .. } => {
            let pre = live.clone();
            let obj_branch = branch_with_expr(&pre, object, tables);
            let mut body_branch = pre.clone();
            handle_loop_body(&mut body_branch, body, tables);
            *live = intersect(vec![obj_branch, body_branch]);
        }
        Node::Label { body, .. } => {
            // Conservative: the labeled statement is still walked with
            // full block-visitor discipline, but the label itself is a
            // control-flow kind (a `break`/`continue label` can jump
            // here from anywhere inside), so it closes live ranges the
            // same way a bare `call`/`return` would.
            process_stmt(body, live, tables);
            kill_all_unless_used_and_local(&IndexSet::new(), live, tables);
        }
        _ => mutation_visit(stmt, live, tables),
    }
}

fn branch_with_expr(pre: &IndexSet<String>, expr: &Node, tables: &mut Tables) -> IndexSet<String> {
    let mut snap = pre.clone();
    mutation_visit(expr, &mut snap, tables);
    snap
}

fn branch_with_block(pre: &IndexSet<String>, stmts: &[Node], tables: &mut Tables) -> IndexSet<String> {
    let mut snap = pre.clone();
    walk_block(stmts, &mut snap, tables);
    snap
}

fn branch_with_body(pre: &IndexSet<String>, body: &Node, tables: &mut Tables) -> IndexSet<String> {
    let mut snap = pre.clone();
    process_stmt(body, &mut snap, tables);
    snap
}

fn intersect(sets: Vec<IndexSet<String>>) -> IndexSet<String> {
    let mut iter = sets.into_iter();
    let Some(first) = iter.next() else {
        return IndexSet::new();
    };
    iter.fold(first, |acc, s| acc.intersection(&s).cloned().collect())
}

/// Loop bodies start from an empty `live` set: nothing from the
/// enclosing scope may be treated as live inside a loop that might run
/// any number of times. Names declared inside the body that survive
/// their own execution are carried into `outer`; names that were live
/// at some point during the body but got killed before the body ended
/// are removed from `outer` too (matching by name is a no-op for almost
/// every program, since the same identifier declared twice already
/// disqualifies itself from single-def status — but the rule is applied
/// uniformly regardless).
fn handle_loop_body(outer: &mut IndexSet<String>, body: &Node, tables: &mut Tables) {
    let mut ever_declared = IndexSet::new();
    collect_single_def_var_names(body, tables, &mut ever_declared);

    let mut inner_live = IndexSet::new();
    process_stmt(body, &mut inner_live, tables);

    for name in ever_declared.difference(&inner_live) {
        outer.remove(name);
    }
    for name in inner_live {
        outer.insert(name);
    }
}

fn collect_single_def_var_names(node: &Node, tables: &Tables, out: &mut IndexSet<String>) {
    if let Node::Var(bindings) = node {
        for binding in bindings {
            if tables.is_single_def(&binding.name) {
                out.insert(binding.name.clone());
            }
        }
    }
    for child in children_ref(node) {
        collect_single_def_var_names(child, tables, out);
    }
}

/// The mutation visitor. Recurses into children before applying this
/// node's own effect, so a use nested in the very statement that closes
/// its live range is still seen while the name is live.
fn mutation_visit(node: &Node, live: &mut IndexSet<String>, tables: &mut Tables) {
    match node {
        Node::Assign { target, value, .. } => {
            mutation_visit_target_subexprs(target, live, tables);
            mutation_visit(value, live, tables);

            if let Some(root) = assignment_target_root(target) {
                kill_dependents_of(&root, live, tables);
            }
            let used = used_names_of(node);
            kill_global_dependents_not_used(&used, live, tables);
        }
        Node::UnaryPrefix { operand, .. } | Node::UnaryPostfix { operand, .. } => {
            mutation_visit_target_subexprs(operand, live, tables);
            if let Some(root) = assignment_target_root(operand) {
                kill_dependents_of(&root, live, tables);
            }
        }
        Node::Name(name) => {
            if tables.is_single_def(name) && !live.contains(name) {
                tables.deps_mutated_in_live_range.insert(name.clone(), true);
            }
        }
        _ if is_control_flow_kind(node.kind()) => {
            for child in children_ref(node) {
                mutation_visit(child, live, tables);
            }
            let used = used_names_of(node);
            kill_all_unless_used_and_local(&used, live, tables);
        }
        _ => {
            for child in children_ref(node) {
                mutation_visit(child, live, tables);
            }
        }
    }
}

/// Everything in a mutation target *except* the root identifier is a
/// genuine read that must still be walked for its own effects.
fn mutation_visit_target_subexprs(node: &Node, live: &mut IndexSet<String>, tables: &mut Tables) {
    match node {
        Node::Sub { object, index } => {
            mutation_visit_target_subexprs(object, live, tables);
            mutation_visit(index, live, tables);
        }
        Node::Dot { object, .. } => mutation_visit_target_subexprs(object, live, tables),
        _ => {}
    }
}

/// The names read by this node's own operand subtrees — the LHS and RHS
/// of an assignment, the callee and arguments of a call/`new`, the
/// returned or thrown value. Other control-flow kinds have no operand
/// of their own.
fn used_names_of(node: &Node) -> IndexSet<String> {
    match node {
        Node::Assign { target, value, .. } => {
            let mut names = collect_names(target);
            names.extend(collect_names(value));
            names
        }
        Node::Call { callee, args } | Node::New { callee, args } => {
            let mut names = collect_names(callee);
            for arg in args {
                names.extend(collect_names(arg));
            }
            names
        }
        Node::Return(Some(value)) | Node::Throw(value) => collect_names(value),
        _ => IndexSet::new(),
    }
}

fn collect_names(node: &Node) -> IndexSet<String> {
    let mut out = IndexSet::new();
    walk_ref(node, &mut |n| {
        if let Node::Name(name) = n {
            out.insert(name.clone());
        }
    });
    out
}

fn kill_dependents_of(root: &str, live: &mut IndexSet<String>, tables: &Tables) {
    if let Some(deps) = tables.depends_on.get(root) {
        for v in deps {
            live.remove(v);
        }
    }
}

fn kill_global_dependents_not_used(used: &IndexSet<String>, live: &mut IndexSet<String>, tables: &Tables) {
    live.retain(|name| !tables.depends_on_a_global.get(name).copied().unwrap_or(false) || used.contains(name));
}

fn kill_all_unless_used_and_local(used: &IndexSet<String>, live: &mut IndexSet<String>, tables: &Tables) {
    live.retain(|name| {
        used.contains(name) && !tables.depends_on_a_global.get(name).copied().unwrap_or(false)
    });
}
