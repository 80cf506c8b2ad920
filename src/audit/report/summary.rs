use std::collections::BTreeMap;

use crate::audit::domain::{
    qualified_requirement_id, CourseRecord, FulfillmentRecord, Plan, PlannedCourse,
    PlannedCourseId, Program, ProgramAttachment,
};
use crate::audit::evaluation::{rule_progress, ProgressStatus};
use crate::audit::validation::{validate_constraints, ScopedFulfillment};
use crate::audit::report::views::{
    PlanOverview, ProgramProgress, RequirementProgressView, SectionProgressView,
    UnassignedCourseView,
};

/// Builds the full audit report for one program attachment from the
/// persisted fulfillment set. Read-only; assignment is a separate pass.
pub fn build_program_progress(
    program: &Program,
    attachment: &ProgramAttachment,
    planned: &[PlannedCourse],
    fulfillments: &[FulfillmentRecord],
) -> ProgramProgress {
    let courses_by_planned: BTreeMap<&PlannedCourseId, &CourseRecord> = planned
        .iter()
        .map(|course| (&course.id, &course.course))
        .collect();

    let in_attachment: Vec<ScopedFulfillment<'_>> = fulfillments
        .iter()
        .filter(|record| record.attachment_id == attachment.id)
        .filter_map(|record| {
            courses_by_planned
                .get(&record.planned_course_id)
                .copied()
                .map(|course| ScopedFulfillment { record, course })
        })
        .collect();

    let mut sections = Vec::with_capacity(program.sections.len());
    for section in &program.sections {
        let in_section: Vec<ScopedFulfillment<'_>> = in_attachment
            .iter()
            .filter(|fulfillment| fulfillment.record.section_id == section.id)
            .copied()
            .collect();

        let mut requirements = Vec::with_capacity(section.requirements.len());
        for requirement in &section.requirements {
            let in_requirement: Vec<ScopedFulfillment<'_>> = in_section
                .iter()
                .filter(|fulfillment| fulfillment.record.requirement_id == requirement.id)
                .copied()
                .collect();

            let assigned: Vec<&CourseRecord> = in_requirement
                .iter()
                .map(|fulfillment| fulfillment.course)
                .collect();
            let progress = rule_progress(&requirement.rule, &assigned);
            let constraints = validate_constraints(&requirement.constraints, &in_requirement);
            let credits_applied = in_requirement
                .iter()
                .map(|fulfillment| fulfillment.record.credits_applied)
                .sum();

            requirements.push(RequirementProgressView {
                section_id: section.id.clone(),
                requirement_id: requirement.id.clone(),
                qualified_id: qualified_requirement_id(&section.id, &requirement.id),
                title: requirement.title.clone(),
                status: progress.status,
                status_label: progress.status.label(),
                percentage: progress.percentage,
                credits_applied,
                credits_required: requirement.required_credits,
                rule: progress,
                constraints,
            });
        }

        let percentage = mean(requirements.iter().map(|r| r.percentage));
        let status = aggregate_status(requirements.iter().map(|r| r.status));
        let credits_applied = in_section
            .iter()
            .map(|fulfillment| fulfillment.record.credits_applied)
            .sum();
        let constraints = validate_constraints(&section.constraints, &in_section);

        sections.push(SectionProgressView {
            section_id: section.id.clone(),
            title: section.title.clone(),
            status,
            status_label: status.label(),
            percentage,
            credits_applied,
            credits_required: section.required_credits,
            requirements,
            constraints,
        });
    }

    let percentage = mean(sections.iter().map(|s| s.percentage));
    let status = aggregate_status(sections.iter().map(|s| s.status));
    let credits_applied = in_attachment
        .iter()
        .map(|fulfillment| fulfillment.record.credits_applied)
        .sum();
    let constraints = validate_constraints(&program.constraints, &in_attachment);

    ProgramProgress {
        attachment_id: attachment.id.clone(),
        program_id: program.id.clone(),
        title: program.title.clone(),
        status,
        status_label: status.label(),
        percentage,
        credits_applied,
        total_credits: program.total_credits,
        sections,
        constraints,
    }
}

/// Rolls per-program reports up into one plan-wide overview, listing the
/// planned courses no attached program claimed.
pub fn build_plan_overview(
    plan: &Plan,
    programs: Vec<ProgramProgress>,
    planned: &[PlannedCourse],
    fulfillments: &[FulfillmentRecord],
) -> PlanOverview {
    let mut unassigned: Vec<UnassignedCourseView> = planned
        .iter()
        .filter(|course| course.plan_id == plan.id)
        .filter(|course| {
            !fulfillments
                .iter()
                .any(|record| record.planned_course_id == course.id)
        })
        .map(|course| UnassignedCourseView {
            planned_course_id: course.id.clone(),
            subject_number: course.course.subject_number(),
            title: course.course.title.clone(),
            credits: course.course.credits,
            semester: course.semester,
        })
        .collect();
    unassigned.sort_by(|a, b| {
        (a.semester, &a.planned_course_id).cmp(&(b.semester, &b.planned_course_id))
    });

    // A plan with nothing attached has nothing in progress, unlike an
    // empty group inside a rule, which is vacuously complete.
    let (status, percentage) = if programs.is_empty() {
        (ProgressStatus::NotStarted, 0.0)
    } else {
        (
            aggregate_status(programs.iter().map(|p| p.status)),
            mean(programs.iter().map(|p| p.percentage)),
        )
    };

    PlanOverview {
        plan_id: plan.id.clone(),
        plan_title: plan.title.clone(),
        status,
        status_label: status.label(),
        percentage,
        programs,
        unassigned,
    }
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let collected: Vec<f32> = values.collect();
    if collected.is_empty() {
        100.0
    } else {
        collected.iter().sum::<f32>() / collected.len() as f32
    }
}

fn aggregate_status(statuses: impl Iterator<Item = ProgressStatus>) -> ProgressStatus {
    let collected: Vec<ProgressStatus> = statuses.collect();
    if collected.is_empty() {
        return ProgressStatus::Completed;
    }
    if collected
        .iter()
        .all(|status| *status == ProgressStatus::Completed)
    {
        ProgressStatus::Completed
    } else if collected
        .iter()
        .all(|status| *status == ProgressStatus::NotStarted)
    {
        ProgressStatus::NotStarted
    } else {
        ProgressStatus::InProgress
    }
}
