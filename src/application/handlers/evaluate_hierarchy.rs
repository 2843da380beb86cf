//! EvaluateHierarchyHandler - Runs one AHP evaluation under a deadline.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ahp::{AhpEngine, AhpResult, EngineFailure, EngineSettings};
use crate::domain::foundation::{AhpError, ErrorKind};
use crate::ports::{JudgmentSource, SourceError};

/// Errors from one evaluation request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateHierarchyError {
    #[error("Failed to load judgments: {0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Settings(AhpError),

    #[error(transparent)]
    Engine(#[from] EngineFailure),

    #[error("Evaluation did not finish within {timeout_ms} ms")]
    DeadlineExceeded { timeout_ms: u64 },

    #[error("Evaluation worker aborted: {0}")]
    WorkerAborted(String),
}

impl EvaluateHierarchyError {
    /// Returns the stable error code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Source(SourceError::NotFound(_)) => "SOURCE_NOT_FOUND",
            Self::Source(SourceError::Io { .. }) => "SOURCE_IO_ERROR",
            Self::Source(_) => ErrorKind::Config.code(),
            Self::Settings(e) => e.kind().code(),
            Self::Engine(failure) => failure.kind().code(),
            Self::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            Self::WorkerAborted(_) => "WORKER_ABORTED",
        }
    }

    /// Returns the engine error kind, if the failure came from the engine.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Source(e) if e.is_document_error() => Some(ErrorKind::Config),
            Self::Settings(e) => Some(e.kind()),
            Self::Engine(failure) => Some(failure.kind()),
            _ => None,
        }
    }
}

/// Handler evaluating the hierarchy supplied by a judgment source.
///
/// Loading and evaluation together run under one deadline. The engine runs on
/// the blocking pool so a large hierarchy never stalls the async runtime.
///
/// An expired deadline abandons the blocking job rather than cancelling it:
/// the solve runs to completion in the background and its result is dropped.
pub struct EvaluateHierarchyHandler {
    source: Arc<dyn JudgmentSource>,
    settings: EngineSettings,
    timeout: Duration,
}

impl EvaluateHierarchyHandler {
    pub fn new(source: Arc<dyn JudgmentSource>, settings: EngineSettings, timeout: Duration) -> Self {
        Self {
            source,
            settings,
            timeout,
        }
    }

    pub async fn handle(&self) -> Result<AhpResult, EvaluateHierarchyError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        match tokio::time::timeout(self.timeout, self.evaluate()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    timeout_ms,
                    "AHP evaluation exceeded its deadline"
                );
                Err(EvaluateHierarchyError::DeadlineExceeded { timeout_ms })
            }
        }
    }

    async fn evaluate(&self) -> Result<AhpResult, EvaluateHierarchyError> {
        // 1. Load judgments
        let sourced = self.source.load().await?;

        // 2. Layer per-document settings over the configured ones
        let settings = sourced.settings.apply(&self.settings);
        let engine = AhpEngine::new(settings).map_err(EvaluateHierarchyError::Settings)?;

        // 3. Evaluate off the async runtime
        let input = sourced.input;
        let result = tokio::task::spawn_blocking(move || engine.evaluate(&input))
            .await
            .map_err(|e| EvaluateHierarchyError::WorkerAborted(e.to_string()))??;

        tracing::debug!(
            source = %self.source.describe(),
            best = result.best().map(|r| r.alternative.as_str()).unwrap_or_default(),
            "Hierarchy evaluated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::judgments::InMemoryJudgmentSource;
    use crate::domain::ahp::{EngineState, HierarchyInput, SettingsOverride};
    use crate::ports::SourcedHierarchy;
    use async_trait::async_trait;

    fn input() -> HierarchyInput {
        HierarchyInput::new()
            .criteria_judgment("Cost", "Quality", 1.0 / 3.0)
            .criteria_judgment("Cost", "Speed", 1.0 / 5.0)
            .criteria_judgment("Quality", "Speed", 1.0 / 2.0)
            .alternative_judgment("Cost", "A", "B", 3.0)
            .alternative_judgment("Quality", "A", "B", 1.0 / 2.0)
            .alternative_judgment("Speed", "A", "B", 5.0)
    }

    fn handler(source: impl JudgmentSource + 'static) -> EvaluateHierarchyHandler {
        EvaluateHierarchyHandler::new(
            Arc::new(source),
            EngineSettings::default(),
            Duration::from_secs(5),
        )
    }

    struct FailingSource;

    #[async_trait]
    impl JudgmentSource for FailingSource {
        async fn load(&self) -> Result<SourcedHierarchy, SourceError> {
            Err(SourceError::NotFound("hierarchy.json".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    struct SlowSource;

    #[async_trait]
    impl JudgmentSource for SlowSource {
        async fn load(&self) -> Result<SourcedHierarchy, SourceError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(SourcedHierarchy::default())
        }

        fn describe(&self) -> String {
            "slow".into()
        }
    }

    #[tokio::test]
    async fn evaluates_in_memory_hierarchy() {
        let result = handler(InMemoryJudgmentSource::new(input()))
            .handle()
            .await
            .unwrap();
        assert_eq!(result.best().unwrap().alternative, "A");
    }

    #[tokio::test]
    async fn source_failure_is_reported() {
        let err = handler(FailingSource).handle().await.unwrap_err();
        assert!(matches!(err, EvaluateHierarchyError::Source(_)));
        assert_eq!(err.code(), "SOURCE_NOT_FOUND");
        assert_eq!(err.kind(), None);
    }

    #[tokio::test]
    async fn engine_failure_keeps_stage() {
        let source = InMemoryJudgmentSource::new(input()).with_settings(SettingsOverride {
            max_iterations: Some(1),
            ..Default::default()
        });
        let err = handler(source).handle().await.unwrap_err();
        match &err {
            EvaluateHierarchyError::Engine(failure) => {
                assert_eq!(failure.stage, EngineState::SolvingCriteria)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.code(), "AHP_NUMERICAL_ERROR");
    }

    #[tokio::test]
    async fn invalid_document_settings_are_config_errors() {
        let source = InMemoryJudgmentSource::new(input()).with_settings(SettingsOverride {
            consistency_threshold: Some(-1.0),
            ..Default::default()
        });
        let err = handler(source).handle().await.unwrap_err();
        assert!(matches!(err, EvaluateHierarchyError::Settings(_)));
        assert_eq!(err.kind(), Some(ErrorKind::Config));
    }

    #[tokio::test]
    async fn deadline_bounds_the_whole_request() {
        let handler = EvaluateHierarchyHandler::new(
            Arc::new(SlowSource),
            EngineSettings::default(),
            Duration::from_millis(20),
        );
        let err = handler.handle().await.unwrap_err();
        assert_eq!(err, EvaluateHierarchyError::DeadlineExceeded { timeout_ms: 20 });
        assert_eq!(err.code(), "DEADLINE_EXCEEDED");
    }
}
