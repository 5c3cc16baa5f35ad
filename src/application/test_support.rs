//! Shared fixtures for use case tests

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::domain::entities::Appraisal;
use crate::domain::ports::{AuditAction, AuditEvent, AuditSink, FixedClock};
use crate::domain::services::FinalizeOverrides;
use crate::domain::value_objects::{AttendanceSummary, Identity, Role};
use crate::infrastructure::{FixtureAttendance, FixtureFeedback, InMemoryStore};

use super::{AppraisalUseCase, CycleUseCase, NewCycle, RollupUseCase, WorkflowContext};

pub struct RecordingSink(pub Arc<Mutex<Vec<AuditEvent>>>);

impl AuditSink for RecordingSink {
    fn record(&self, event: AuditEvent) {
        self.0.lock().unwrap().push(event);
    }
}

pub fn hr() -> Identity {
    Identity::new("HR1", "Priya Nair", "Human Resources", Role::Admin)
}

pub fn asha() -> Identity {
    Identity::new("E1", "Asha Rao", "Physics", Role::Faculty)
}

pub fn ravi() -> Identity {
    Identity::new("E2", "Ravi Menon", "Chemistry", Role::Faculty)
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub context: WorkflowContext,
    pub events: Arc<Mutex<Vec<AuditEvent>>>,
    pub cycles: CycleUseCase<Arc<InMemoryStore>>,
    pub appraisals: AppraisalUseCase<Arc<InMemoryStore>>,
    pub rollup: RollupUseCase<Arc<InMemoryStore>>,
}

impl Harness {
    /// E1 has 95% attendance and 8.46 feedback in March 2025; E2 has no facts
    pub fn new() -> Self {
        let mut attendance = FixtureAttendance::new();
        attendance.insert("E1", 2025, 3, AttendanceSummary::from_counts(20, 19, 1, 0, 1));
        let mut feedback = FixtureFeedback::new();
        feedback.insert("E1", "cyc-2025-03", 8.46);

        let events = Arc::new(Mutex::new(Vec::new()));
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 20, 9, 30, 0).unwrap());
        let context = WorkflowContext::new(Arc::new(clock))
            .with_audit_sink(Arc::new(RecordingSink(events.clone())))
            .with_attendance_source(Arc::new(attendance))
            .with_feedback_source(Arc::new(feedback));

        let store = Arc::new(InMemoryStore::new());
        Self {
            cycles: CycleUseCase::new(store.clone(), context.clone()),
            appraisals: AppraisalUseCase::new(store.clone(), context.clone()),
            rollup: RollupUseCase::new(store.clone(), context.clone()),
            store,
            context,
            events,
        }
    }

    pub fn actions(&self) -> Vec<AuditAction> {
        self.events.lock().unwrap().iter().map(|e| e.action).collect()
    }

    pub fn active_cycle(&self, year: i32, month: u32) -> String {
        self.cycles
            .create_cycle(&hr(), NewCycle::new(year, month).activated())
            .unwrap()
            .id
    }

    /// Started, conduct self-scored and submitted
    pub fn submitted(&self, actor: &Identity, cycle_id: &str) -> Appraisal {
        let appraisal = self.appraisals.create_appraisal(actor, cycle_id).unwrap();
        self.appraisals
            .set_self_score(actor, &appraisal.id, "conduct", 8.0, "Mentored two new hires")
            .unwrap();
        self.appraisals.submit_appraisal(actor, &appraisal.id).unwrap()
    }

    /// Every reviewer score set to `score`, then finalized with the defaults
    pub fn completed(&self, actor: &Identity, cycle_id: &str, score: f64) -> Appraisal {
        let appraisal = self.submitted(actor, cycle_id);
        let mut draft = self.appraisals.start_review(&hr(), &appraisal.id).unwrap();
        let ids: Vec<String> = draft.rows().iter().map(|r| r.criterion_id.clone()).collect();
        for id in &ids {
            draft.set_score(id, score).unwrap();
        }
        draft
            .set_comment("attendance", "Adjusted after discussion")
            .unwrap();
        self.appraisals.submit_review(&hr(), draft).unwrap();
        self.appraisals
            .finalize_appraisal(&hr(), &appraisal.id, FinalizeOverrides::new())
            .unwrap()
    }
}
