use serde::Serialize;

use crate::audit::domain::{AttachmentId, PlanId, PlannedCourseId, ProgramId};
use crate::audit::evaluation::{ProgressStatus, RuleProgress};
use crate::audit::validation::ConstraintReport;

/// Progress for one requirement, with its rule breakdown and the outcome
/// of its own validation constraints.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementProgressView {
    pub section_id: String,
    pub requirement_id: String,
    pub qualified_id: String,
    pub title: String,
    pub status: ProgressStatus,
    pub status_label: &'static str,
    pub percentage: f32,
    pub credits_applied: f32,
    pub credits_required: f32,
    pub rule: RuleProgress,
    pub constraints: ConstraintReport,
}

/// Progress for one section: its requirements plus section-scope
/// constraint results and credit totals.
#[derive(Debug, Clone, Serialize)]
pub struct SectionProgressView {
    pub section_id: String,
    pub title: String,
    pub status: ProgressStatus,
    pub status_label: &'static str,
    pub percentage: f32,
    pub credits_applied: f32,
    pub credits_required: f32,
    pub requirements: Vec<RequirementProgressView>,
    pub constraints: ConstraintReport,
}

/// Full audit report for one program attachment.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramProgress {
    pub attachment_id: AttachmentId,
    pub program_id: ProgramId,
    pub title: String,
    pub status: ProgressStatus,
    pub status_label: &'static str,
    pub percentage: f32,
    pub credits_applied: f32,
    pub total_credits: f32,
    pub sections: Vec<SectionProgressView>,
    pub constraints: ConstraintReport,
}

/// A planned course that contributes to no requirement in any attached
/// program, surfaced so the editor can flag it.
#[derive(Debug, Clone, Serialize)]
pub struct UnassignedCourseView {
    pub planned_course_id: PlannedCourseId,
    pub subject_number: String,
    pub title: String,
    pub credits: f32,
    pub semester: u32,
}

/// Plan-wide rollup across every attached program.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOverview {
    pub plan_id: PlanId,
    pub plan_title: String,
    pub status: ProgressStatus,
    pub status_label: &'static str,
    pub percentage: f32,
    pub programs: Vec<ProgramProgress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<UnassignedCourseView>,
}
