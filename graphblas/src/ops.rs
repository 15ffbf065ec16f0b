//! Operations of the `graphblas` dialect.
//!
//! Operations are declared in [OPERATIONS]. The table is filled by the
//! dialect's operation definitions, which do not exist yet, so every
//! operation in the `graphblas` namespace is currently unregistered.

use crate::dialect::GraphBLAS;

/// Declaration of a single dialect operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpDefinition {
    /// Fully qualified name such as `graphblas.<mnemonic>`.
    pub name: &'static str,
    pub summary: &'static str,
}

impl OpDefinition {
    /// Operation name without the dialect prefix.
    pub fn mnemonic(&self) -> &'static str {
        self.name
            .strip_prefix(GraphBLAS::NAMESPACE)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(self.name)
    }
}

/// Operations declared by the dialect.
pub const OPERATIONS: &[OpDefinition] = &[];

/// Find the declaration of the operation with the given fully qualified name.
pub fn lookup(name: &str) -> Option<&'static OpDefinition> {
    OPERATIONS.iter().find(|op| op.name == name)
}
