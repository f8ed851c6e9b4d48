//! AST node model shared by the `collapse-vars` optimizer and its driver.
//!
//! The tree is a heterogeneous sum type: one [`Node`] variant per kind,
//! each carrying exactly the children the parser's grammar gives it.
//! This crate owns only the node shapes and their static classification
//! (§3 of the design doc: side-effect-free / control-flow /
//! statement-structural); it has no knowledge of the optimizer passes
//! that walk it.

mod kind;

pub use kind::{NodeKind, is_control_flow_kind, is_side_effect_free_kind};

use serde::{Deserialize, Serialize};

/// A single `(name, optional initializer)` binding inside a `var` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarBinding {
    pub name: String,
    pub init: Option<Node>,
}

/// One arm of a `switch`: `test: None` is the `default:` arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub test: Option<Node>,
    pub body: Vec<Node>,
}

/// The `catch (param) { body }` clause of a `try` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Vec<Node>,
}

/// An AST node. Variant names follow the kind symbols of §6 verbatim
/// (`Str` instead of `String` only to avoid shadowing the prelude type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Var(Vec<VarBinding>),
    Name(String),
    Num(f64),
    Str(String),
    Binary {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    Sub {
        object: Box<Node>,
        index: Box<Node>,
    },
    Dot {
        object: Box<Node>,
        property: String,
    },
    Assign {
        op: String,
        target: Box<Node>,
        value: Box<Node>,
    },
    UnaryPrefix {
        op: String,
        operand: Box<Node>,
    },
    UnaryPostfix {
        op: String,
        operand: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    New {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    If {
        test: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    Switch {
        discriminant: Box<Node>,
        cases: Vec<SwitchCase>,
    },
    Try {
        block: Vec<Node>,
        catch: Option<CatchClause>,
        finally: Option<Vec<Node>>,
    },
    Do {
        body: Box<Node>,
        test: Box<Node>,
    },
    While {
        test: Box<Node>,
        body: Box<Node>,
    },
    For {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForIn {
        var: Box<Node>,
        object: Box<Node>,
        body: Box<Node>,
    },
    Function {
        name: Option<String>,
        params: Vec<String>,
        body: Vec<Node>,
    },
    Defun {
        name: Option<String>,
        params: Vec<String>,
        body: Vec<Node>,
    },
    With {
        object: Box<Node>,
        body: Box<Node>,
    },
    Return(Option<Box<Node>>),
    Break(Option<String>),
    Continue(Option<String>),
    Throw(Box<Node>),
    Label {
        name: String,
        body: Box<Node>,
    },
    Debugger,
    /// A bare statement sequence (loop/branch bodies, try blocks). Not a
    /// kind named in §6 by itself, but every compound statement there
    /// holds one as a child; without it `then_branch`/loop `body`/etc.
    /// would need to special-case "single statement vs. block" at every
    /// call site.
    Block(Vec<Node>),
    /// An unrecognized kind, descended into structurally but otherwise
    /// opaque to analysis (§7).
    Opaque { kind: String, children: Vec<Node> },
}

impl Node {
    /// The classification kind of this node (§3).
    pub fn kind(&self) -> NodeKind {
        kind::classify(self)
    }

    /// All immediate structural children, in traversal order.
    ///
    /// Used by passes that don't need the `for-in`-skips-`var` exception
    /// (only the traversal primitive in `collapse-vars` applies that
    /// exception, and it does so by consulting [`Node::for_in_children_mut`]
    /// instead of this method).
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Var(bindings) => bindings.iter().filter_map(|b| b.init.as_ref()).collect(),
            Node::Name(_) | Node::Num(_) | Node::Str(_) | Node::Debugger => vec![],
            Node::Binary { left, right, .. } => vec![left, right],
            Node::Sub { object, index } => vec![object, index],
            Node::Dot { object, .. } => vec![object],
            Node::Assign { target, value, .. } => vec![target, value],
            Node::UnaryPrefix { operand, .. } | Node::UnaryPostfix { operand, .. } => {
                vec![operand]
            }
            Node::Call { callee, args } | Node::New { callee, args } => {
                let mut v = vec![callee.as_ref()];
                v.extend(args.iter());
                v
            }
            Node::If {
                test,
                then_branch,
                else_branch,
            } => {
                let mut v = vec![test.as_ref(), then_branch.as_ref()];
                if let Some(e) = else_branch {
                    v.push(e);
                }
                v
            }
            Node::Switch {
                discriminant,
                cases,
            } => {
                let mut v = vec![discriminant.as_ref()];
                for case in cases {
                    if let Some(t) = &case.test {
                        v.push(t);
                    }
                    v.extend(case.body.iter());
                }
                v
            }
            Node::Try {
                block,
                catch,
                finally,
            } => {
                let mut v: Vec<&Node> = block.iter().collect();
                if let Some(c) = catch {
                    v.extend(c.body.iter());
                }
                if let Some(f) = finally {
                    v.extend(f.iter());
                }
                v
            }
            Node::Do { body, test } => vec![body, test],
            Node::While { test, body } => vec![test, body],
            Node::For {
                init,
                test,
                update,
                body,
            } => {
                let mut v = vec![];
                if let Some(i) = init {
                    v.push(i.as_ref());
                }
                if let Some(t) = test {
                    v.push(t.as_ref());
                }
                if let Some(u) = update {
                    v.push(u.as_ref());
                }
                v.push(body);
                v
            }
            Node::ForIn { var, object, body } => vec![var, object, body],
            Node::Function { body, .. } | Node::Defun { body, .. } => body.iter().collect(),
            Node::With { object, body } => vec![object, body],
            Node::Return(v) => v.iter().map(|n| n.as_ref()).collect(),
            Node::Break(_) | Node::Continue(_) => vec![],
            Node::Throw(v) => vec![v],
            Node::Label { body, .. } => vec![body],
            Node::Block(stmts) => stmts.iter().collect(),
            Node::Opaque { children, .. } => children.iter().collect(),
        }
    }
}
