//! Initializer Analysis Pass (§4.4).
//!
//! For every single-def variable, walks its initializer subtree once to
//! record whether it is built entirely from side-effect-free node kinds
//! and which names it reads (the immediate — not yet transitive —
//! dependency relation).

use crate::tables::Tables;
use crate::walk::walk_ref;
use collapse_vars_ast::{Node, is_side_effect_free_kind};

pub fn run(tables: &mut Tables) {
    let single_def_names: Vec<String> = tables
        .is_single_def
        .iter()
        .filter(|(_, is_single)| **is_single)
        .map(|(name, _)| name.clone())
        .collect();

    for name in single_def_names {
        let Some(init) = tables.initial_value.get(&name).cloned() else {
            continue;
        };
        let mut simple = true;
        walk_ref(&init, &mut |node| {
            if !is_side_effect_free_kind(node.kind()) {
                simple = false;
            }
            if let Node::Name(read) = node {
                if read != "undefined" {
                    tables
                        .depends_on
                        .entry(read.clone())
                        .or_default()
                        .insert(name.clone());
                    if !tables.is_local.contains(read) {
                        tables.depends_on_a_global.insert(name.clone(), true);
                    }
                }
            }
        });
        tables.uses_only_simple_nodes.insert(name, simple);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;
    use collapse_vars_ast::VarBinding;

    #[test]
    fn pure_arithmetic_initializer_is_simple() {
        let body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: Some(Node::Binary {
                op: "+".into(),
                left: Box::new(Node::Name("x".into())),
                right: Box::new(Node::Num(1.0)),
            }),
        }])];
        let mut tables = stats::run(&body);
        run(&mut tables);
        assert_eq!(tables.uses_only_simple_nodes.get("a"), Some(&true));
        assert!(tables.depends_on.get("x").unwrap().contains("a"));
        assert_eq!(tables.depends_on_a_global.get("a"), Some(&true));
    }

    #[test]
    fn call_in_initializer_is_not_simple() {
        let body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: Some(Node::Call {
                callee: Box::new(Node::Name("f".into())),
                args: vec![],
            }),
        }])];
        let mut tables = stats::run(&body);
        run(&mut tables);
        assert_eq!(tables.uses_only_simple_nodes.get("a"), Some(&false));
    }

    #[test]
    fn dependency_on_a_local_does_not_taint_global_flag() {
        let body = vec![
            Node::Var(vec![VarBinding {
                name: "x".into(),
                init: Some(Node::Num(1.0)),
            }]),
            Node::Var(vec![VarBinding {
                name: "a".into(),
                init: Some(Node::Binary {
                    op: "+".into(),
                    left: Box::new(Node::Name("x".into())),
                    right: Box::new(Node::Num(1.0)),
                }),
            }]),
        ];
        let mut tables = stats::run(&body);
        run(&mut tables);
        assert_eq!(tables.depends_on_a_global.get("a"), None);
    }

    #[test]
    fn undefined_default_initializer_is_not_a_dependency() {
        let body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: None,
        }])];
        let mut tables = stats::run(&body);
        run(&mut tables);
        assert_eq!(tables.uses_only_simple_nodes.get("a"), Some(&true));
        assert!(tables.depends_on.get("undefined").is_none());
    }
}
