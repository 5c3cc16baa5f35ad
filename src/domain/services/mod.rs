//! Domain Services
//!
//! Pure business logic over domain entities: the rule-based scorers, the
//! review reconciliation gate, the insight synthesizer and the annual rollup.
//! No I/O, no clocks, no hidden state.

mod annual_rollup;
mod attendance_scorer;
mod contribution_scorer;
mod insight_synthesizer;
mod reconciliation;
mod self_assessment;

pub use annual_rollup::{eligible_months, roll_up, AnnualRollup};
pub use attendance_scorer::{suggest_attendance_score, DEFAULT_ATTENDANCE_SCORE};
pub use contribution_scorer::{
    score_contributions, score_counts, ContributionCounts, EMPTY_CATEGORY_SCORE,
    NO_ADMIN_REASON, NO_RESEARCH_REASON,
};
pub use insight_synthesizer::{synthesize_insights, DEFAULT_ATTENDANCE_PERCENTAGE};
pub use reconciliation::{
    finalize_defaults, validate_review, FinalDecision, FinalizeOverrides, ReviewDraft,
};
pub use self_assessment::{build_self_assessments, ATTENDANCE_NOTE, FEEDBACK_NOTE};
