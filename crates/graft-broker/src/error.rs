//! Invocation-level failure taxonomy.
//!
//! No stage is retried or skipped: the first failure aborts the pipeline,
//! surfaces here with its stage and cause attached, and no rewrite is
//! assumed to have occurred. There is no partial-success state.

use thiserror::Error;

use graft_classpath::InjectionError;
use graft_config::ConfigError;
use graft_strategy::StrategyError;

use crate::engine::EngineExecutionError;
use crate::pipeline::Stage;

/// Terminal failure of one broker invocation.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The rewrite request failed validation before the pipeline started.
    #[error("invalid rewrite request: {source}")]
    Configuration {
        /// The validation failure.
        #[source]
        source: ConfigError,
    },

    /// A resolved dependency location could not become a loadable root.
    #[error("failed to assemble the loading realm during {stage}: {source}")]
    Injection {
        /// Stage in which the conversion failed.
        stage: Stage,
        /// The conversion failure.
        #[source]
        source: InjectionError,
    },

    /// The requested strategy could not be resolved or constructed.
    #[error("failed to resolve rewrite strategy: {source}")]
    StrategyResolution {
        /// The resolution failure.
        #[source]
        source: StrategyError,
    },

    /// The external rewrite engine reported a failure.
    #[error(transparent)]
    EngineExecution(#[from] EngineExecutionError),
}

impl BrokerError {
    /// Returns the pipeline stage the invocation failed in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Configuration { .. } => Stage::Start,
            Self::Injection { stage, .. } => *stage,
            Self::StrategyResolution { .. } => Stage::LoadStrategy,
            Self::EngineExecution(_) => Stage::InvokeEngine,
        }
    }
}

#[cfg(test)]
mod tests {
    use graft_config::ConfigError;
    use graft_strategy::StrategyError;

    use super::*;

    #[test]
    fn configuration_failures_attribute_to_start() {
        let error = BrokerError::Configuration {
            source: ConfigError::MissingStrategy,
        };
        assert_eq!(error.stage(), Stage::Start);
    }

    #[test]
    fn strategy_failures_attribute_to_load_stage() {
        let error = BrokerError::StrategyResolution {
            source: StrategyError::NotFound {
                qualified_name: "com.example.Missing".into(),
            },
        };
        assert_eq!(error.stage(), Stage::LoadStrategy);
        assert!(error.to_string().contains("com.example.Missing"));
    }

    #[test]
    fn injection_failures_report_their_stage() {
        let error = BrokerError::Injection {
            stage: Stage::ResolveArtifacts,
            source: graft_classpath::InjectionError::Relative {
                path: "repo/a.jar".into(),
            },
        };
        assert_eq!(error.stage(), Stage::ResolveArtifacts);
        assert!(error.to_string().contains("resolve-artifacts"));
    }
}
