//! Output Rendering
//!
//! Provides a unified interface for rendering records as text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::domain::entities::{Appraisal, ContributionScores, CriterionKind, Cycle};

/// Something the CLI can print in either format
pub trait Render {
    fn to_text(&self) -> String;

    fn to_json(&self) -> serde_json::Value;
}

/// Render for the selected format; JSON is pretty-printed
pub fn render<T: Render + ?Sized>(item: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => item.to_text(),
        OutputFormat::Json => serde_json::to_string_pretty(&item.to_json()).unwrap_or_default(),
    }
}

fn json_of<T: Serialize + ?Sized>(item: &T) -> serde_json::Value {
    serde_json::to_value(item).unwrap_or(serde_json::Value::Null)
}

fn kind_label(kind: CriterionKind) -> &'static str {
    match kind {
        CriterionKind::Teaching => "teaching",
        CriterionKind::Research => "research",
        CriterionKind::Administration => "administration",
        CriterionKind::Attendance => "attendance",
        CriterionKind::Custom => "custom",
    }
}

fn cycle_line(cycle: &Cycle) -> String {
    format!(
        "{}  {}  {}  {}  {}..{}",
        cycle.id, cycle.name, cycle.kind, cycle.status, cycle.period.start, cycle.period.end
    )
}

impl Render for Cycle {
    fn to_text(&self) -> String {
        let mut out = cycle_line(self);
        for c in &self.criteria {
            let _ = write!(
                out,
                "\n  {:<12} {:>3}%  {} ({})",
                c.id,
                c.weight,
                c.name,
                kind_label(c.kind)
            );
        }
        out
    }

    fn to_json(&self) -> serde_json::Value {
        json_of(self)
    }
}

impl Render for [Cycle] {
    fn to_text(&self) -> String {
        if self.is_empty() {
            return "No cycles.".to_string();
        }
        self.iter().map(cycle_line).collect::<Vec<_>>().join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        json_of(self)
    }
}

fn appraisal_line(a: &Appraisal) -> String {
    let mut line = format!(
        "{}  {}  {} ({})  {}",
        a.id, a.cycle_id, a.employee.name, a.employee.id, a.status
    );
    if let (Some(score), Some(category)) = (a.final_score, a.category) {
        let _ = write!(line, "  {:.1}/10 {}", score, category);
    }
    line
}

impl Render for Appraisal {
    fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  {} ({}, {})",
            self.id, self.employee.name, self.employee.id, self.employee.department
        );
        let _ = writeln!(out, "  Cycle:   {}", self.cycle_id);
        let _ = writeln!(out, "  Status:  {}", self.status);

        if let Some(system) = &self.system_scores {
            let _ = writeln!(
                out,
                "  System:  student feedback {:.1}, attendance {}",
                system.student_feedback, system.attendance
            );
        }
        if let Some(att) = &self.attendance_summary {
            let _ = writeln!(
                out,
                "  Attendance: {:.1}% ({}/{} days, {} late)",
                att.attendance_percentage, att.present_days, att.total_working_days, att.late_count
            );
        }
        for entry in &self.research_entries {
            let _ = writeln!(out, "  {} [{:?}] {}", entry.id, entry.kind, entry.title);
        }
        for entry in &self.admin_contributions {
            let _ = writeln!(out, "  {} [{:?}] {}", entry.id, entry.category, entry.title);
        }
        if let Some(scores) = &self.contribution_scores {
            let _ = writeln!(out, "  Suggested: {}", scores.to_text());
        }

        if !self.self_assessments.is_empty() {
            let _ = writeln!(out, "  Self assessment:");
            for row in &self.self_assessments {
                let _ = writeln!(
                    out,
                    "    {:<30} {:>4.1}  {}",
                    row.criterion_name, row.self_score, row.comments
                );
            }
        }

        if !self.reviewer_assessments.is_empty() {
            match &self.reviewer_id {
                Some(reviewer) => {
                    let _ = writeln!(out, "  Review by {}:", reviewer);
                }
                None => {
                    let _ = writeln!(out, "  Review:");
                }
            }
            for row in &self.reviewer_assessments {
                let flag = if row.attendance_adjusted { " (adjusted)" } else { "" };
                let _ = writeln!(
                    out,
                    "    {:<30} {:>4.1} -> {:>4.1}{}  {}",
                    row.criterion_name, row.self_score, row.reviewer_score, flag, row.reviewer_comments
                );
            }
        }

        if let Some(insights) = &self.insights {
            let _ = writeln!(out, "  Insights: {}", insights.overall_summary);
            for s in &insights.strengths {
                let _ = writeln!(out, "    + {}", s);
            }
            for s in &insights.areas_for_improvement {
                let _ = writeln!(out, "    - {}", s);
            }
            for s in &insights.training_suggestions {
                let _ = writeln!(out, "    * {}", s);
            }
            let _ = writeln!(out, "    {}", insights.attendance_impact);
        }

        if let (Some(score), Some(category)) = (self.final_score, self.category) {
            let _ = writeln!(out, "  Final:   {:.1}/10 ({})", score, category);
        }
        if let Some(text) = self.recommendations.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out, "  Recommendations: {}", text);
        }
        out.trim_end().to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        json_of(self)
    }
}

impl Render for [Appraisal] {
    fn to_text(&self) -> String {
        if self.is_empty() {
            return "No appraisals.".to_string();
        }
        self.iter()
            .map(appraisal_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        json_of(self)
    }
}

impl Render for ContributionScores {
    fn to_text(&self) -> String {
        format!(
            "research {:.1}, admin {:.1}. {}",
            self.research, self.admin, self.reasoning
        )
    }

    fn to_json(&self) -> serde_json::Value {
        json_of(self)
    }
}
