//! Basic Statistics Pass (§4.3).
//!
//! One traversal that populates `is_local`, `is_single_def`, `use_count`,
//! and `initial_value`. The only node shapes that need bespoke handling
//! are `var` (declares names), `name` (reads them), and the mutating
//! forms `assign`/`unary-prefix`/`unary-postfix` (disqualify their
//! target). Everything else is descended into generically.

use crate::tables::Tables;
use crate::target::assignment_target_root;
use crate::walk::children_ref;
use collapse_vars_ast::Node;

pub fn run(body: &[Node]) -> Tables {
    let mut tables = Tables::default();
    for stmt in body {
        visit(stmt, &mut tables);
    }
    tables
}

fn visit(node: &Node, tables: &mut Tables) {
    match node {
        Node::Var(bindings) => {
            for binding in bindings {
                declare(&binding.name, binding.init.clone(), tables);
            }
            // Traversal does not skip subtrees: initializers are walked
            // for name reads only after every binding in this statement
            // has registered its use_count entry.
            for binding in bindings {
                if let Some(init) = &binding.init {
                    visit(init, tables);
                }
            }
        }
        Node::Name(name) => read_name(name, tables),
        Node::Assign { target, value, .. } => {
            if let Some(root) = assignment_target_root(target) {
                tables.is_single_def.insert(root, false);
            }
            visit_target_subexprs(target, tables);
            visit(value, tables);
        }
        Node::UnaryPrefix { operand, .. } | Node::UnaryPostfix { operand, .. } => {
            if let Some(root) = assignment_target_root(operand) {
                tables.is_single_def.insert(root, false);
            }
            visit_target_subexprs(operand, tables);
        }
        _ => {
            for child in children_ref(node) {
                visit(child, tables);
            }
        }
    }
}

fn declare(name: &str, init: Option<Node>, tables: &mut Tables) {
    tables.is_local.insert(name.to_string());
    if tables.is_single_def.contains_key(name) {
        tables.is_single_def.insert(name.to_string(), false);
    } else {
        tables.is_single_def.insert(name.to_string(), true);
        tables.use_count.insert(name.to_string(), 0);
        let value = init.unwrap_or_else(|| Node::Name("undefined".to_string()));
        tables.initial_value.insert(name.to_string(), value);
    }
}

fn read_name(name: &str, tables: &mut Tables) {
    if let Some(count) = tables.use_count.get_mut(name) {
        *count += 1;
    } else {
        tables.is_single_def.insert(name.to_string(), false);
    }
}

/// Everything in a mutation target *except* the root identifier is a
/// genuine read: `a[i] = 1` reads `i` even though `a` is being mutated.
fn visit_target_subexprs(node: &Node, tables: &mut Tables) {
    match node {
        Node::Sub { object, index } => {
            visit_target_subexprs(object, tables);
            visit(index, tables);
        }
        Node::Dot { object, .. } => visit_target_subexprs(object, tables),
        _ => {}
    }
}
