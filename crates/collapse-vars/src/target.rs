//! Shared helper for resolving the identifier actually mutated by an
//! `assign`/`unary-prefix`/`unary-postfix` node, used by both the Basic
//! Statistics Pass (§4.3) and the Live-Range Mutation Analysis (§4.6).

use collapse_vars_ast::Node;

/// Walk down a mutation target through `sub`/`dot`-style children until a
/// `name` is reached; that's the identifier actually reassigned.
pub fn assignment_target_root(node: &Node) -> Option<String> {
    match node {
        Node::Name(name) => Some(name.clone()),
        Node::Sub { object, .. } | Node::Dot { object, .. } => assignment_target_root(object),
        _ => None,
    }
}
