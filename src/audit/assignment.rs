use std::collections::BTreeSet;

use tracing::debug;

use crate::audit::domain::{
    qualified_requirement_id, Constraint, CourseRecord, FulfillmentRecord, GroupOperator,
    PlannedCourse, Program, ProgramAttachment, Requirement, Section,
};
use crate::audit::double_count::build_double_count_map;
use crate::audit::evaluation::evaluate_rule;

/// One (section, requirement) slot in the program's declared walk order.
struct RequirementSlot<'a> {
    section: &'a Section,
    requirement: &'a Requirement,
    qualified_id: String,
}

/// Runs one full assignment pass for a single program attachment and
/// returns the complete replacement fulfillment set.
///
/// The pass is a pure function of its inputs: courses are visited in
/// (semester, position, id) order and requirements in declared section
/// then requirement order, so re-running with unchanged inputs yields an
/// identical record set. A course that matches nothing is simply left
/// unassigned; there is no failure outcome.
pub fn assign_program(
    program: &Program,
    attachment: &ProgramAttachment,
    planned: &[PlannedCourse],
) -> Vec<FulfillmentRecord> {
    let double_count = build_double_count_map(program);

    let slots: Vec<RequirementSlot<'_>> = program
        .sections
        .iter()
        .flat_map(|section| {
            section.requirements.iter().map(move |requirement| {
                RequirementSlot {
                    section,
                    requirement,
                    qualified_id: qualified_requirement_id(&section.id, &requirement.id),
                }
            })
        })
        .collect();

    let mut ordered: Vec<&PlannedCourse> = planned
        .iter()
        .filter(|course| course.plan_id == attachment.plan_id)
        .collect();
    ordered.sort_by(|a, b| {
        (a.semester, a.position, &a.id)
            .cmp(&(b.semester, b.position, &b.id))
    });

    let mut records: Vec<FulfillmentRecord> = Vec::new();

    for planned_course in &ordered {
        // Candidate requirements, most specific claim first; declaration
        // order breaks ties. The first surviving candidate is the primary
        // assignment, every further one must clear the double-count gate.
        let mut candidates: Vec<(usize, u32)> = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let verdict = evaluate_rule(&slot.requirement.rule, &planned_course.course);
                verdict.matches.then_some((index, verdict.specificity))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (index, _) in candidates {
            let slot = &slots[index];

            let already_assigned = records
                .iter()
                .any(|record| record.planned_course_id == planned_course.id);
            if already_assigned
                && !double_count.can_double_count(&planned_course.course, &slot.qualified_id)
            {
                continue;
            }

            if !enforcement_allows(slot, &planned_course.course, &records, &ordered) {
                continue;
            }

            records.push(FulfillmentRecord {
                plan_id: attachment.plan_id.clone(),
                attachment_id: attachment.id.clone(),
                planned_course_id: planned_course.id.clone(),
                section_id: slot.section.id.clone(),
                requirement_id: slot.requirement.id.clone(),
                credits_applied: planned_course.course.credits,
            });
        }
    }

    debug!(
        attachment = %attachment.id.0,
        program = %program.id.0,
        fulfillments = records.len(),
        "assignment pass complete"
    );

    records
}

/// Checks every `require_course_from_sections` constraint declared on the
/// candidate requirement or its owning section, against the fulfillments
/// accumulated so far in this pass. Declaration order matters: a
/// constraint can observe assignments already made to earlier sections,
/// never later ones.
fn enforcement_allows(
    slot: &RequirementSlot<'_>,
    course: &CourseRecord,
    records: &[FulfillmentRecord],
    ordered: &[&PlannedCourse],
) -> bool {
    let mut enforcement = slot
        .requirement
        .constraints
        .iter()
        .chain(slot.section.constraints.iter())
        .filter_map(|constraint| match constraint {
            Constraint::RequireCourseFromSections {
                allowed_section_ids,
                operator,
            } => Some((allowed_section_ids, operator)),
            _ => None,
        })
        .peekable();

    if enforcement.peek().is_none() {
        return true;
    }

    // Sections where this course (by any of its identities) already holds
    // a fulfillment record.
    let fulfilled_sections: BTreeSet<&str> = records
        .iter()
        .filter(|record| {
            ordered
                .iter()
                .find(|candidate| candidate.id == record.planned_course_id)
                .map(|candidate| candidate.course.same_course(course))
                .unwrap_or(false)
        })
        .map(|record| record.section_id.as_str())
        .collect();

    enforcement.all(|(allowed_section_ids, operator)| match operator {
        GroupOperator::Or => allowed_section_ids
            .iter()
            .any(|section_id| fulfilled_sections.contains(section_id.as_str())),
        GroupOperator::And => allowed_section_ids
            .iter()
            .all(|section_id| fulfilled_sections.contains(section_id.as_str())),
    })
}
