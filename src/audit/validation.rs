use serde::Serialize;
use tracing::warn;

use crate::audit::domain::{Constraint, CourseRecord, FulfillmentRecord, RangeOperator};
use crate::audit::evaluation::filter_matches;

/// One fulfillment with its resolved course, as seen by a validation
/// scope (requirement, section, or program).
#[derive(Debug, Clone, Copy)]
pub struct ScopedFulfillment<'a> {
    pub record: &'a FulfillmentRecord,
    pub course: &'a CourseRecord,
}

/// Outcome for a single validation constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintCheck {
    pub constraint: Constraint,
    pub kind: &'static str,
    pub satisfied: bool,
}

/// Aggregate outcome for one scope's constraint list. Vacuously satisfied
/// when the scope declares no validation constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintReport {
    pub results: Vec<ConstraintCheck>,
    pub all_satisfied: bool,
}

/// Evaluates the validation-kind constraints in `constraints` against the
/// fulfillments of one scope. Enforcement-adjacent kinds
/// (`allow_double_count`, `require_course_from_sections`) were already
/// honored during assignment and are skipped here; they never appear in
/// the report.
pub fn validate_constraints(
    constraints: &[Constraint],
    scope: &[ScopedFulfillment<'_>],
) -> ConstraintReport {
    let mut results = Vec::new();

    for constraint in constraints {
        let satisfied = match constraint {
            Constraint::AllowDoubleCount { .. } | Constraint::RequireCourseFromSections { .. } => {
                continue;
            }
            Constraint::MinCourseCount { count, filter } => {
                count_matching(scope, filter) >= *count as usize
            }
            Constraint::MaxCourseCount { count, filter } => {
                count_matching(scope, filter) <= *count as usize
            }
            Constraint::MaxCreditsFromCourses {
                max_credits,
                course_ids,
            } => credits_from(scope, course_ids.iter()) <= *max_credits,
            Constraint::MinCreditsFromCourses {
                min_credits,
                course_ids,
            } => credits_from(scope, course_ids.iter()) >= *min_credits,
            Constraint::CourseNumberRange {
                subject_code,
                min_number,
                max_number,
                min_count,
                operator,
            } => {
                let in_range = scope
                    .iter()
                    .filter(|fulfillment| fulfillment.course.subject == *subject_code)
                    .filter_map(|fulfillment| parse_course_number(&fulfillment.course.number))
                    .filter(|number| match operator {
                        RangeOperator::Above => number >= min_number,
                        RangeOperator::Below => number <= min_number,
                        RangeOperator::Between => {
                            number >= min_number
                                && max_number.map(|max| *number <= max).unwrap_or(true)
                        }
                    })
                    .count();
                in_range >= *min_count as usize
            }
            Constraint::Unknown => {
                warn!("skipping constraint of unrecognized kind");
                continue;
            }
        };

        results.push(ConstraintCheck {
            constraint: constraint.clone(),
            kind: constraint.kind_label(),
            satisfied,
        });
    }

    let all_satisfied = results.iter().all(|check| check.satisfied);
    ConstraintReport {
        results,
        all_satisfied,
    }
}

fn count_matching(
    scope: &[ScopedFulfillment<'_>],
    filter: &crate::audit::domain::CourseFilter,
) -> usize {
    scope
        .iter()
        .filter(|fulfillment| filter_matches(filter, fulfillment.course))
        .count()
}

fn credits_from<'a>(
    scope: &[ScopedFulfillment<'_>],
    course_ids: impl Iterator<Item = &'a String>,
) -> f32 {
    let ids: Vec<&String> = course_ids.collect();
    scope
        .iter()
        .filter(|fulfillment| {
            ids.iter()
                .any(|id| fulfillment.course.matches_identifier(id))
        })
        .map(|fulfillment| fulfillment.record.credits_applied)
        .sum()
}

/// Leading digits of a course number, ignoring any trailing suffix
/// (`"3860L"` parses as 3860). Numbers with no leading digits are
/// excluded from range checks entirely.
fn parse_course_number(number: &str) -> Option<u32> {
    let digits: &str = number
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(head, _)| head)
        .unwrap_or(number);
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
