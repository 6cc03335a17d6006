//! Identifiers naming strategies and the operations they request.

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;

/// Opaque identifier of one rewrite operation a strategy asks the engine
/// to perform.
///
/// The broker never interprets operation identifiers; they are carried
/// verbatim from the strategy to the engine.
///
/// # Example
///
/// ```
/// use graft_strategy::OperationDescriptor;
///
/// let operation = OperationDescriptor::new("tidy-imports");
/// assert_eq!(operation.id(), "tidy-imports");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationDescriptor {
    id: String,
}

impl OperationDescriptor {
    /// Creates an operation descriptor from its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the operation identifier.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }
}

impl std::fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// The operator's choice of strategy, by qualified name.
///
/// A descriptor resolves to exactly one registered extension at load time
/// or the invocation fails; there is no fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    qualified_name: String,
}

impl StrategyDescriptor {
    /// Creates a descriptor from an operator-supplied qualified name.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    /// Returns the qualified name to resolve.
    #[must_use]
    pub const fn qualified_name(&self) -> &str {
        self.qualified_name.as_str()
    }

    /// Validates the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::EmptyName`] when the name is blank.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.qualified_name.trim().is_empty() {
            return Err(StrategyError::EmptyName);
        }
        Ok(())
    }
}

impl std::fmt::Display for StrategyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
