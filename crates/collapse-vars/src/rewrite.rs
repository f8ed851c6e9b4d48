//! Rewrite Passes (§4.8): declaration removal, mutual collapse of
//! initializers among the eliminable set, and substitution at use sites.

use crate::walk::{WalkControl, walk_body_mut, walk_mut};
use collapse_vars_ast::Node;
use indexmap::{IndexMap, IndexSet};

/// Drop bindings for every name in `eliminable` from every `var`
/// statement. A `var` left with no bindings becomes an empty block so
/// the parent slot still holds a legal node.
pub fn remove_declarations(body: &mut Vec<Node>, eliminable: &IndexSet<String>) {
    walk_body_mut(body, &mut |node| {
        if let Node::Var(bindings) = node {
            let kept: Vec<_> = bindings
                .drain(..)
                .filter(|b| !eliminable.contains(&b.name))
                .collect();
            *bindings = kept;
            if bindings.is_empty() {
                return Some(WalkControl::Replace(Node::Block(vec![])));
            }
        }
        None
    });
}

/// Substitute references to other eliminable names inside each
/// eliminable variable's own initializer, to a fixpoint. The dependency
/// graph among single-def variables is acyclic (§9), so this always
/// terminates.
pub fn collapse_initializers(initializers: &mut IndexMap<String, Node>) {
    loop {
        let mut changed = false;
        let names: Vec<String> = initializers.keys().cloned().collect();
        for name in names {
            let mut expr = initializers.remove(&name).expect("name came from this map's own keys");
            let replaced = substitute(&mut expr, initializers);
            initializers.insert(name, expr);
            changed |= replaced;
        }
        if !changed {
            break;
        }
    }
}

/// Replace every `name` node whose identifier is a key of `replacements`
/// with a clone of the corresponding value. Returns whether any
/// replacement was made.
fn substitute(node: &mut Node, replacements: &IndexMap<String, Node>) -> bool {
    let mut replaced = false;
    walk_mut(node, &mut |n| {
        if let Node::Name(name) = n {
            if let Some(value) = replacements.get(name) {
                replaced = true;
                return Some(WalkControl::Replace(value.clone()));
            }
        }
        None
    });
    replaced
}

/// Replace every use-site `name` reference to an eliminable variable
/// with its (already-collapsed) initializer.
pub fn substitute_at_use_sites(body: &mut Vec<Node>, initializers: &IndexMap<String, Node>) {
    walk_body_mut(body, &mut |node| {
        if let Node::Name(name) = node {
            if let Some(value) = initializers.get(name) {
                return Some(WalkControl::Replace(value.clone()));
            }
        }
        None
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use collapse_vars_ast::VarBinding;

    #[test]
    fn removes_only_eliminable_bindings_from_a_shared_var_statement() {
        let mut body = vec![Node::Var(vec![
            VarBinding {
                name: "a".into(),
                init: Some(Node::Num(1.0)),
            },
            VarBinding {
                name: "b".into(),
                init: Some(Node::Num(2.0)),
            },
        ])];
        let eliminable = IndexSet::from(["a".to_string()]);
        remove_declarations(&mut body, &eliminable);
        assert_eq!(
            body,
            vec![Node::Var(vec![VarBinding {
                name: "b".into(),
                init: Some(Node::Num(2.0)),
            }])]
        );
    }

    #[test]
    fn var_with_every_binding_removed_becomes_an_empty_block() {
        let mut body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: Some(Node::Num(1.0)),
        }])];
        let eliminable = IndexSet::from(["a".to_string()]);
        remove_declarations(&mut body, &eliminable);
        assert_eq!(body, vec![Node::Block(vec![])]);
    }

    #[test]
    fn mutual_collapse_substitutes_transitively() {
        // a = x + 1; b = a * 2; — collapsing b's initializer should
        // reach all the way through to x, not stop at a.
        let mut initializers = IndexMap::new();
        initializers.insert(
            "a".to_string(),
            Node::Binary {
                op: "+".into(),
                left: Box::new(Node::Name("x".into())),
                right: Box::new(Node::Num(1.0)),
            },
        );
        initializers.insert(
            "b".to_string(),
            Node::Binary {
                op: "*".into(),
                left: Box::new(Node::Name("a".into())),
                right: Box::new(Node::Num(2.0)),
            },
        );
        collapse_initializers(&mut initializers);
        assert_eq!(
            initializers["b"],
            Node::Binary {
                op: "*".into(),
                left: Box::new(Node::Binary {
                    op: "+".into(),
                    left: Box::new(Node::Name("x".into())),
                    right: Box::new(Node::Num(1.0)),
                }),
                right: Box::new(Node::Num(2.0)),
            }
        );
    }

    #[test]
    fn substitution_replaces_every_use_site() {
        let mut body = vec![
            Node::Return(Some(Box::new(Node::Binary {
                op: "+".into(),
                left: Box::new(Node::Name("a".into())),
                right: Box::new(Node::Name("a".into())),
            }))),
        ];
        let mut initializers = IndexMap::new();
        initializers.insert("a".to_string(), Node::Num(7.0));
        substitute_at_use_sites(&mut body, &initializers);
        assert_eq!(
            body,
            vec![Node::Return(Some(Box::new(Node::Binary {
                op: "+".into(),
                left: Box::new(Node::Num(7.0)),
                right: Box::new(Node::Num(7.0)),
            })))]
        );
    }
}
