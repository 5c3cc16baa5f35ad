//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{AppraisalUseCase, CycleUseCase, RollupUseCase, WorkflowContext};
use crate::config::{AuditSinkKind, Config, StoreBackend};
use crate::domain::ports::{AuditSink, Clock, EntityStore, NoopAuditSink};
use crate::infrastructure::{
    FixtureAttendance, FixtureFeedback, InMemoryStore, JsonAuditSink, JsonFileStore, Seed,
    SourceError, TracingAuditSink,
};

/// Store shared by all use cases of one workflow
pub type SharedStore = Arc<dyn EntityStore>;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to open audit log {path}: {source}")]
    AuditLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The three use cases over one store and one context
pub struct Workflow {
    pub cycles: CycleUseCase<SharedStore>,
    pub appraisals: AppraisalUseCase<SharedStore>,
    pub rollup: RollupUseCase<SharedStore>,
}

/// Wire a workflow from configuration
pub fn create_workflow(config: &Config, clock: Arc<dyn Clock>) -> Result<Workflow, SetupError> {
    let store = create_store(config, clock.as_ref());
    let context = create_context(config, clock)?;
    Ok(Workflow {
        cycles: CycleUseCase::new(store.clone(), context.clone()),
        appraisals: AppraisalUseCase::new(store.clone(), context.clone()),
        rollup: RollupUseCase::new(store, context),
    })
}

/// Store for the configured backend, seeded unless disabled
pub fn create_store(config: &Config, clock: &dyn Clock) -> SharedStore {
    let seed = config
        .store
        .seed_defaults
        .then(|| Seed::new(clock.today()));
    match config.store.backend {
        StoreBackend::Memory => {
            let store = InMemoryStore::new();
            Arc::new(match seed {
                Some(seed) => store.with_seed(seed),
                None => store,
            })
        }
        StoreBackend::Json => {
            let store = JsonFileStore::new(config.data_dir());
            Arc::new(match seed {
                Some(seed) => store.with_seed(seed),
                None => store,
            })
        }
    }
}

pub fn create_audit_sink(config: &Config) -> Result<Arc<dyn AuditSink>, SetupError> {
    Ok(match config.audit.sink {
        AuditSinkKind::Log => Arc::new(TracingAuditSink),
        AuditSinkKind::None => Arc::new(NoopAuditSink),
        AuditSinkKind::Json => match &config.audit.path {
            Some(path) => Arc::new(JsonAuditSink::append_to(path).map_err(|source| {
                SetupError::AuditLog {
                    path: path.clone(),
                    source,
                }
            })?),
            None => Arc::new(JsonAuditSink::stdout()),
        },
    })
}

/// Clock, audit sink and fact sources from configuration
pub fn create_context(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<WorkflowContext, SetupError> {
    let mut context = WorkflowContext::new(clock)
        .with_audit_sink(create_audit_sink(config)?)
        .with_default_student_feedback(config.sources.default_student_feedback);
    if let Some(path) = &config.sources.attendance_file {
        context = context.with_attendance_source(Arc::new(FixtureAttendance::from_file(path)?));
    }
    if let Some(path) = &config.sources.feedback_file {
        context = context.with_feedback_source(Arc::new(FixtureFeedback::from_file(path)?));
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CycleFilter;
    use crate::domain::ports::{Collection, FixedClock};
    use crate::domain::value_objects::CycleStatus;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()))
    }

    fn memory_config() -> Config {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        config.audit.sink = AuditSinkKind::None;
        config
    }

    #[test]
    fn memory_workflow_is_seeded_with_the_current_month() {
        let workflow = create_workflow(&memory_config(), clock()).unwrap();
        let cycles = workflow.cycles.list_cycles(&CycleFilter::default()).unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].id, "cyc-2025-03");
        assert_eq!(cycles[0].status, CycleStatus::Active);
    }

    #[test]
    fn seeding_can_be_disabled() {
        let mut config = memory_config();
        config.store.seed_defaults = false;
        let store = create_store(&config, clock().as_ref());
        assert!(store.get(Collection::Cycles).unwrap().is_empty());
    }

    #[test]
    fn json_backend_writes_under_data_dir() {
        let dir = tempdir().unwrap();
        let mut config = memory_config();
        config.store.backend = StoreBackend::Json;
        config.store.data_dir = Some(dir.path().to_path_buf());

        let workflow = create_workflow(&config, clock()).unwrap();
        workflow.cycles.list_cycles(&CycleFilter::default()).unwrap();
        assert!(dir.path().join("cycles.json").exists());
    }

    #[test]
    fn missing_fixture_is_reported() {
        let dir = tempdir().unwrap();
        let mut config = memory_config();
        config.sources.attendance_file = Some(dir.path().join("attendance.json"));
        let err = create_context(&config, clock()).err().unwrap();
        assert!(matches!(err, SetupError::Source(SourceError::Read { .. })));
    }

    #[test]
    fn json_audit_log_is_created() {
        let dir = tempdir().unwrap();
        let mut config = memory_config();
        config.audit.sink = AuditSinkKind::Json;
        config.audit.path = Some(dir.path().join("logs").join("audit.ndjson"));
        create_audit_sink(&config).unwrap();
        assert!(dir.path().join("logs").join("audit.ndjson").exists());
    }
}
