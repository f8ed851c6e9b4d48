//! Closure Guard (§4.2).
//!
//! Nested functions capture variables whose use sites this pass never
//! sees, and `with` injects bindings of unknown shape; either can
//! invalidate a single-def conclusion reached by the later passes. A
//! body containing either is rejected wholesale rather than partially
//! analyzed.

use crate::walk::walk_body_ref;
use collapse_vars_ast::Node;

/// Returns `true` if this body must be skipped: it contains a nested
/// `function`, `defun`, or `with`.
pub fn should_skip(body: &[Node]) -> bool {
    let mut found = false;
    walk_body_ref(body, &mut |node| {
        if matches!(
            node,
            Node::Function { .. } | Node::Defun { .. } | Node::With { .. }
        ) {
            found = true;
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use collapse_vars_ast::VarBinding;

    #[test]
    fn accepts_plain_body() {
        let body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: Some(Node::Num(1.0)),
        }])];
        assert!(!should_skip(&body));
    }

    #[test]
    fn rejects_nested_function_expression() {
        let body = vec![Node::Var(vec![VarBinding {
            name: "a".into(),
            init: Some(Node::Function {
                name: None,
                params: vec![],
                body: vec![],
            }),
        }])];
        assert!(should_skip(&body));
    }

    #[test]
    fn rejects_nested_defun() {
        let body = vec![Node::Defun {
            name: Some("inner".into()),
            params: vec![],
            body: vec![],
        }];
        assert!(should_skip(&body));
    }

    #[test]
    fn rejects_with() {
        let body = vec![Node::With {
            object: Box::new(Node::Name("o".into())),
            body: Box::new(Node::Block(vec![])),
        }];
        assert!(should_skip(&body));
    }
}
