//! Invocation configuration for the Graft rewrite broker.
//!
//! The build tool drives one broker invocation per module by handing over a
//! [`RewriteRequest`]: where the sources live, where the module's build
//! output lands, which rewrite strategy to run, and how to log. Requests are
//! plain values — the broker never reads configuration files or environment
//! variables itself, so concurrent invocations across modules cannot observe
//! each other's settings.
//!
//! Validation is fail-fast: [`RewriteRequest::validate`] rejects malformed
//! requests before any pipeline stage runs.

pub mod logging;
pub mod request;

pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::request::{ConfigError, RewriteRequest};
