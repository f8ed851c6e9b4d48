//! The one real failure mode at the crate boundary (§3, §7): the
//! optimizer is total over valid ASTs, so this is reserved for
//! structurally malformed input rather than anything an analysis pass
//! itself can fail to conclude.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A `var` node must hold a non-empty ordered list of bindings (§3).
    #[error("`var` node has an empty binding list")]
    EmptyVarBindings,
}
