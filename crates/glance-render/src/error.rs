//! Error types for table and tree rendering.
//!
//! Degenerate input (no rows, no fields, a width too small for anything)
//! never produces an error; it renders something degraded instead. Errors
//! are reserved for requests that cannot be interpreted at all.

use thiserror::Error;

/// Errors from table rendering.
#[derive(Debug, Error)]
pub enum TableError {
    /// An object table was requested without naming its fields.
    #[error("a `fields` option is required when rendering objects")]
    MissingFields,

    /// A value could not be converted into rows.
    #[error("failed to serialize value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from tree rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A node is more than one level deeper than the node before it.
    #[error("node {index} at level {level} has no parent")]
    ParentlessNode { index: usize, level: usize },

    /// A node is neither a `[level, value]` pair nor a `{level, value}` object.
    #[error("node {index} is not a [level, value] pair")]
    InvalidNode { index: usize },

    /// Tree input must be a list of nodes.
    #[error("tree input must be a list of nodes")]
    NotAList,
}

/// Any rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            TreeError::ParentlessNode { index: 2, level: 3 }.to_string(),
            "node 2 at level 3 has no parent"
        );
        let err: RenderError = TableError::MissingFields.into();
        assert_eq!(
            err.to_string(),
            "a `fields` option is required when rendering objects"
        );
    }
}
