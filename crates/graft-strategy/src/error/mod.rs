//! Domain errors raised by strategy resolution.
//!
//! Every failure mode of the dynamic lookup is enumerated explicitly so
//! the broker can report which configuration mistake the operator made,
//! rather than surfacing a generic reflection-style error.

use thiserror::Error;

/// Boxed failure returned by a strategy constructor.
pub type ConstructionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors arising while resolving or constructing a rewrite strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The operator supplied a blank qualified name.
    #[error("strategy qualified name must not be empty")]
    EmptyName,

    /// The qualified name resolves to no registered extension.
    #[error("no extension named '{qualified_name}' is registered in the loading realm")]
    NotFound {
        /// Name that was looked up.
        qualified_name: String,
    },

    /// The qualified name resolves to an extension of a different kind.
    #[error("extension '{qualified_name}' does not provide the rewrite-strategy capability")]
    TypeMismatch {
        /// Name that was looked up.
        qualified_name: String,
    },

    /// The strategy factory failed to produce an instance.
    ///
    /// A strategy whose constructor needs inputs the broker cannot supply
    /// reports this instead of being silently defaulted.
    #[error("failed to construct strategy '{qualified_name}': {source}")]
    Instantiation {
        /// Name of the strategy being constructed.
        qualified_name: String,
        /// Failure reported by the factory.
        #[source]
        source: ConstructionError,
    },

    /// Two loadable roots registered the same qualified name.
    #[error("extension '{qualified_name}' is registered by more than one loadable root")]
    DuplicateRegistration {
        /// The contested name.
        qualified_name: String,
    },
}
