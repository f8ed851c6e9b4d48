//! Node kind classification (§3): side-effect-free value kinds,
//! control-flow kinds, and statement/structural kinds.

use crate::Node;

/// The symbolic kind tag of a [`Node`], without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Var,
    Name,
    Num,
    Str,
    Binary,
    Sub,
    Dot,
    Assign,
    UnaryPrefix,
    UnaryPostfix,
    Call,
    New,
    If,
    Switch,
    Try,
    Do,
    While,
    For,
    ForIn,
    Function,
    Defun,
    With,
    Return,
    Break,
    Continue,
    Throw,
    Label,
    Debugger,
    Block,
    Opaque,
}

pub(crate) fn classify(node: &Node) -> NodeKind {
    match node {
        Node::Var(_) => NodeKind::Var,
        Node::Name(_) => NodeKind::Name,
        Node::Num(_) => NodeKind::Num,
        Node::Str(_) => NodeKind::Str,
        Node::Binary { .. } => NodeKind::Binary,
        Node::Sub { .. } => NodeKind::Sub,
        Node::Dot { .. } => NodeKind::Dot,
        Node::Assign { .. } => NodeKind::Assign,
        Node::UnaryPrefix { .. } => NodeKind::UnaryPrefix,
        Node::UnaryPostfix { .. } => NodeKind::UnaryPostfix,
        Node::Call { .. } => NodeKind::Call,
        Node::New { .. } => NodeKind::New,
        Node::If { .. } => NodeKind::If,
        Node::Switch { .. } => NodeKind::Switch,
        Node::Try { .. } => NodeKind::Try,
        Node::Do { .. } => NodeKind::Do,
        Node::While { .. } => NodeKind::While,
        Node::For { .. } => NodeKind::For,
        Node::ForIn { .. } => NodeKind::ForIn,
        Node::Function { .. } => NodeKind::Function,
        Node::Defun { .. } => NodeKind::Defun,
        Node::With { .. } => NodeKind::With,
        Node::Return(_) => NodeKind::Return,
        Node::Break(_) => NodeKind::Break,
        Node::Continue(_) => NodeKind::Continue,
        Node::Throw(_) => NodeKind::Throw,
        Node::Label { .. } => NodeKind::Label,
        Node::Debugger => NodeKind::Debugger,
        Node::Block(_) => NodeKind::Block,
        Node::Opaque { .. } => NodeKind::Opaque,
    }
}

/// Side-effect-free value kinds (§3): `name`, `num`, `string`, `binary`, `sub`.
///
/// Membership is about the node's *own* kind only — sub-children are not
/// re-examined by this predicate (§3: "A node qualifies only if its own
/// kind is in this set").
pub fn is_side_effect_free_kind(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Name | NodeKind::Num | NodeKind::Str | NodeKind::Binary | NodeKind::Sub
    )
}

/// Control-flow kinds (§3): potentially externally observable, end live
/// ranges conservatively.
pub fn is_control_flow_kind(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Return
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::New
            | NodeKind::Throw
            | NodeKind::Call
            | NodeKind::Label
            | NodeKind::Debugger
    )
}
