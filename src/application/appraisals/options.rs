//! Appraisal list filter

use crate::domain::entities::Appraisal;
use crate::domain::value_objects::AppraisalStatus;

#[derive(Debug, Clone, Default)]
pub struct AppraisalFilter {
    pub employee_id: Option<String>,
    pub cycle_id: Option<String>,
    pub status: Option<AppraisalStatus>,
}

impl AppraisalFilter {
    pub fn for_employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id.into()),
            ..Self::default()
        }
    }

    pub fn with_cycle(mut self, cycle_id: impl Into<String>) -> Self {
        self.cycle_id = Some(cycle_id.into());
        self
    }

    pub fn with_status(mut self, status: AppraisalStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, appraisal: &Appraisal) -> bool {
        self.employee_id
            .as_deref()
            .map_or(true, |id| appraisal.employee.id == id)
            && self
                .cycle_id
                .as_deref()
                .map_or(true, |id| appraisal.cycle_id == id)
            && self.status.map_or(true, |s| appraisal.status == s)
    }
}
