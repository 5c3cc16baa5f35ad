//! Workflow Context
//!
//! Collaborators shared by every use case: clock, audit sink, fact sources
//! and the authorization policy.

use std::sync::Arc;

use tracing::info;

use crate::domain::policies::{Action, AuthorizationPolicy};
use crate::domain::ports::{
    AttendanceSource, AuditAction, AuditEvent, AuditSink, Clock, NoFacts, NoopAuditSink,
    StudentFeedbackSource,
};
use crate::domain::value_objects::Identity;
use crate::error::AppraisalResult;

/// Feedback score used when the feedback source has nothing for an employee
pub const DEFAULT_STUDENT_FEEDBACK: f64 = 7.0;

#[derive(Clone)]
pub struct WorkflowContext {
    clock: Arc<dyn Clock>,
    audit: Arc<dyn AuditSink>,
    attendance: Arc<dyn AttendanceSource>,
    feedback: Arc<dyn StudentFeedbackSource>,
    default_student_feedback: f64,
    policy: AuthorizationPolicy,
}

impl WorkflowContext {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            audit: Arc::new(NoopAuditSink),
            attendance: Arc::new(NoFacts),
            feedback: Arc::new(NoFacts),
            default_student_feedback: DEFAULT_STUDENT_FEEDBACK,
            policy: AuthorizationPolicy,
        }
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    pub fn with_attendance_source(mut self, source: Arc<dyn AttendanceSource>) -> Self {
        self.attendance = source;
        self
    }

    pub fn with_feedback_source(mut self, source: Arc<dyn StudentFeedbackSource>) -> Self {
        self.feedback = source;
        self
    }

    pub fn with_default_student_feedback(mut self, score: f64) -> Self {
        self.default_student_feedback = score;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn attendance(&self) -> &dyn AttendanceSource {
        self.attendance.as_ref()
    }

    pub fn feedback(&self) -> &dyn StudentFeedbackSource {
        self.feedback.as_ref()
    }

    pub fn default_student_feedback(&self) -> f64 {
        self.default_student_feedback
    }

    pub fn authorize(&self, actor: &Identity, action: Action<'_>) -> AppraisalResult<()> {
        self.policy.check(actor, action)
    }

    /// Log the transition and hand it to the audit sink
    pub fn emit(&self, action: AuditAction, actor: &Identity, detail: impl Into<String>) {
        let event = AuditEvent::new(action, actor.name.clone(), detail);
        info!(action = %event.action, actor = %actor.id, detail = %event.detail, "transition");
        self.audit.record(event);
    }
}
