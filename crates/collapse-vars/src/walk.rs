//! AST Traversal Primitive (§4.1).
//!
//! Every pass in this crate is built on the two functions here. Both
//! apply the single traversal exception the source's semantics demand:
//! when descending into a `for-in` node, a child whose own kind is `var`
//! is skipped (§9b — load-bearing, or the iteration variable gets
//! miscounted as an ordinary local).

use collapse_vars_ast::Node;

/// What a visitor wants done with the node it was just handed.
pub enum WalkControl {
    /// Splice this node into the parent slot and do not descend into it.
    Replace(Node),
    /// Abort the whole traversal immediately.
    Stop,
}

/// Pre-order walk with in-place replacement and early termination.
///
/// `visit` is invoked on every node before its children. Returning `None`
/// continues descent into the node's children. Returns `true` if the
/// traversal was aborted via [`WalkControl::Stop`].
pub fn walk_mut<F>(node: &mut Node, visit: &mut F) -> bool
where
    F: FnMut(&mut Node) -> Option<WalkControl>,
{
    match visit(node) {
        Some(WalkControl::Replace(replacement)) => {
            *node = replacement;
            return false;
        }
        Some(WalkControl::Stop) => return true,
        None => {}
    }
    for child in children_mut(node) {
        if walk_mut(child, visit) {
            return true;
        }
    }
    false
}

/// Walk a whole statement list the same way, since the function body
/// itself is `Vec<Node>` rather than a single `Node`.
pub fn walk_body_mut<F>(body: &mut Vec<Node>, visit: &mut F) -> bool
where
    F: FnMut(&mut Node) -> Option<WalkControl>,
{
    for stmt in body.iter_mut() {
        if walk_mut(stmt, visit) {
            return true;
        }
    }
    false
}

/// Read-only pre-order walk, for the analysis passes that only ever
/// accumulate into tables and never rewrite the tree.
pub fn walk_ref<F>(node: &Node, visit: &mut F)
where
    F: FnMut(&Node),
{
    visit(node);
    for child in children_ref(node) {
        walk_ref(child, visit);
    }
}

pub fn walk_body_ref<F>(body: &[Node], visit: &mut F)
where
    F: FnMut(&Node),
{
    for stmt in body {
        walk_ref(stmt, visit);
    }
}

/// True if descending into this for-in's declarator child would
/// re-expose its `var` binding to analysis. Shared by the mutable and
/// read-only children helpers so the exception can't drift apart
/// between them.
fn is_for_in_var_child(candidate: &Node) -> bool {
    matches!(candidate, Node::Var(_))
}

pub(crate) fn children_ref(node: &Node) -> Vec<&Node> {
    if let Node::ForIn { var, object, body } = node {
        let mut v = vec![];
        if !is_for_in_var_child(var) {
            v.push(var.as_ref());
        }
        v.push(object);
        v.push(body);
        return v;
    }
    node.children()
}

fn children_mut(node: &mut Node) -> Vec<&mut Node> {
    if let Node::ForIn { var, object, body } = node {
        let mut v = vec![];
        if !is_for_in_var_child(var) {
            v.push(var.as_mut());
        }
        v.push(object.as_mut());
        v.push(body.as_mut());
        return v;
    }
    children_mut_generic(node)
}

/// Mirrors [`collapse_vars_ast::Node::children`] but returning mutable
/// references; kept here rather than on `Node` itself because only the
/// optimizer needs in-place mutation of a tree it doesn't own the type
/// definition for the walker semantics of.
fn children_mut_generic(node: &mut Node) -> Vec<&mut Node> {
    match node {
        Node::Var(bindings) => bindings
            .iter_mut()
            .filter_map(|b| b.init.as_mut())
            .collect(),
        Node::Name(_) | Node::Num(_) | Node::Str(_) | Node::Debugger => vec![],
        Node::Binary { left, right, .. } => vec![left.as_mut(), right.as_mut()],
        Node::Sub { object, index } => vec![object.as_mut(), index.as_mut()],
        Node::Dot { object, .. } => vec![object.as_mut()],
        Node::Assign { target, value, .. } => vec![target.as_mut(), value.as_mut()],
        Node::UnaryPrefix { operand, .. } | Node::UnaryPostfix { operand, .. } => {
            vec![operand.as_mut()]
        }
        Node::Call { callee, args } | Node::New { callee, args } => {
            let mut v = vec![callee.as_mut()];
            v.extend(args.iter_mut());
            v
        }
        Node::If {
            test,
            then_branch,
            else_branch,
        } => {
            let mut v = vec![test.as_mut(), then_branch.as_mut()];
            if let Some(e) = else_branch {
                v.push(e.as_mut());
            }
            v
        }
        Node::Switch {
            discriminant,
            cases,
        } => {
            let mut v = vec![discriminant.as_mut()];
            for case in cases {
                if let Some(t) = &mut case.test {
                    v.push(t);
                }
                v.extend(case.body.iter_mut());
            }
            v
        }
        Node::Try {
            block,
            catch,
            finally,
        } => {
            let mut v: Vec<&mut Node> = block.iter_mut().collect();
            if let Some(c) = catch {
                v.extend(c.body.iter_mut());
            }
            if let Some(f) = finally {
                v.extend(f.iter_mut());
            }
            v
        }
        Node::Do { body, test } => vec![body.as_mut(), test.as_mut()],
        Node::While { test, body } => vec![test.as_mut(), body.as_mut()],
        Node::For {
            init,
            test,
            update,
            body,
        } => {
            let mut v = vec![];
            if let Some(i) = init {
                v.push(i.as_mut());
            }
            if let Some(t) = test {
                v.push(t.as_mut());
            }
            if let Some(u) = update {
                v.push(u.as_mut());
            }
            v.push(body.as_mut());
            v
        }
        Node::ForIn { var, object, body } => vec![var.as_mut(), object.as_mut(), body.as_mut()],
        Node::Function { body, .. } | Node::Defun { body, .. } => body.iter_mut().collect(),
        Node::With { object, body } => vec![object.as_mut(), body.as_mut()],
        Node::Return(v) => v.iter_mut().map(|n| n.as_mut()).collect(),
        Node::Break(_) | Node::Continue(_) => vec![],
        Node::Throw(v) => vec![v.as_mut()],
        Node::Label { body, .. } => vec![body.as_mut()],
        Node::Block(stmts) => stmts.iter_mut().collect(),
        Node::Opaque { children, .. } => children.iter_mut().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collapse_vars_ast::VarBinding;

    #[test]
    fn for_in_skips_var_child_on_read_only_walk() {
        let node = Node::ForIn {
            var: Box::new(Node::Var(vec![VarBinding {
                name: "k".into(),
                init: None,
            }])),
            object: Box::new(Node::Name("obj".into())),
            body: Box::new(Node::Block(vec![])),
        };
        let mut seen = vec![];
        walk_ref(&node, &mut |n| {
            if let Node::Var(_) = n {
                seen.push(());
            }
        });
        assert!(seen.is_empty(), "for-in's var child must not be visited");
    }

    #[test]
    fn for_in_without_var_declarator_is_still_walked() {
        let node = Node::ForIn {
            var: Box::new(Node::Name("k".into())),
            object: Box::new(Node::Name("obj".into())),
            body: Box::new(Node::Block(vec![])),
        };
        let mut names = vec![];
        walk_ref(&node, &mut |n| {
            if let Node::Name(s) = n {
                names.push(s.clone());
            }
        });
        assert_eq!(names, vec!["k".to_string(), "obj".to_string()]);
    }

    #[test]
    fn replace_short_circuits_descent() {
        let mut node = Node::Binary {
            op: "+".into(),
            left: Box::new(Node::Name("a".into())),
            right: Box::new(Node::Num(1.0)),
        };
        let mut visits = vec![];
        walk_mut(&mut node, &mut |n| {
            visits.push(n.clone());
            if matches!(n, Node::Binary { .. }) {
                Some(WalkControl::Replace(Node::Num(42.0)))
            } else {
                None
            }
        });
        assert_eq!(node, Node::Num(42.0));
        assert_eq!(visits.len(), 1, "children of a replaced node are never visited");
    }

    #[test]
    fn stop_aborts_remaining_siblings() {
        let mut body = vec![Node::Name("a".into()), Node::Name("b".into())];
        let mut seen = vec![];
        walk_body_mut(&mut body, &mut |n| {
            if let Node::Name(s) = n {
                seen.push(s.clone());
                if s == "a" {
                    return Some(WalkControl::Stop);
                }
            }
            None
        });
        assert_eq!(seen, vec!["a".to_string()]);
    }
}
