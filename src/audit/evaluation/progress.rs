use serde::Serialize;

use super::filter::filter_matches;
use crate::audit::domain::{CountType, CourseRecord, GroupOperator, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// How far a requirement's rule has progressed given the courses assigned
/// to it. Purely a reporting computation; it never influences assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleProgress {
    pub status: ProgressStatus,
    pub percentage: f32,
    pub detail: ProgressDetail,
}

/// Structured breakdown behind a progress percentage, so callers can show
/// which courses or credits are still owed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressDetail {
    Courses {
        matched: usize,
        required: usize,
    },
    List {
        fulfilled: f32,
        required: f32,
        count_type: CountType,
    },
    Credits {
        fulfilled: f32,
        required: f32,
    },
    Group {
        operator: GroupOperator,
        options: Vec<RuleProgress>,
        /// For OR groups, the index of the sub-rule currently furthest
        /// along, so the student can see which path they are pursuing.
        #[serde(skip_serializing_if = "Option::is_none")]
        active_option: Option<usize>,
    },
    Unknown,
}

/// Computes completion for `rule` over the full set of courses already
/// assigned to its requirement.
pub fn rule_progress(rule: &Rule, assigned: &[&CourseRecord]) -> RuleProgress {
    match rule {
        Rule::TakeCourses { courses } => {
            let required = courses.len();
            let matched = courses
                .iter()
                .filter(|id| assigned.iter().any(|course| course.matches_identifier(id)))
                .count();
            let percentage = if required == 0 {
                100.0
            } else {
                (matched as f32 / required as f32) * 100.0
            };
            let status = if matched == required {
                ProgressStatus::Completed
            } else if matched == 0 {
                ProgressStatus::NotStarted
            } else {
                ProgressStatus::InProgress
            };
            RuleProgress {
                status,
                percentage,
                detail: ProgressDetail::Courses { matched, required },
            }
        }
        Rule::TakeFromList {
            courses,
            count,
            count_type,
        } => {
            let in_list = assigned
                .iter()
                .filter(|course| courses.iter().any(|id| course.matches_identifier(id)));
            let fulfilled = match count_type {
                CountType::Courses => in_list.count() as f32,
                CountType::Credits => in_list.map(|course| course.credits).sum(),
            };
            let required = *count as f32;
            capped_progress(
                fulfilled,
                required,
                ProgressDetail::List {
                    fulfilled,
                    required,
                    count_type: *count_type,
                },
            )
        }
        Rule::TakeAnyCourses { credits, filter } => {
            let fulfilled = assigned
                .iter()
                .filter(|course| filter_matches(filter, course))
                .map(|course| course.credits)
                .sum();
            capped_progress(
                fulfilled,
                *credits,
                ProgressDetail::Credits {
                    fulfilled,
                    required: *credits,
                },
            )
        }
        Rule::Group { operator, rules } => group_progress(*operator, rules, assigned),
        Rule::Unknown => RuleProgress {
            status: ProgressStatus::NotStarted,
            percentage: 0.0,
            detail: ProgressDetail::Unknown,
        },
    }
}

fn capped_progress(fulfilled: f32, required: f32, detail: ProgressDetail) -> RuleProgress {
    let percentage = if required <= 0.0 {
        100.0
    } else {
        ((fulfilled / required) * 100.0).min(100.0)
    };
    let status = if percentage >= 100.0 {
        ProgressStatus::Completed
    } else if fulfilled > 0.0 {
        ProgressStatus::InProgress
    } else {
        ProgressStatus::NotStarted
    };
    RuleProgress {
        status,
        percentage,
        detail,
    }
}

fn group_progress(
    operator: GroupOperator,
    rules: &[Rule],
    assigned: &[&CourseRecord],
) -> RuleProgress {
    let options: Vec<RuleProgress> = rules
        .iter()
        .map(|sub_rule| rule_progress(sub_rule, assigned))
        .collect();

    if options.is_empty() {
        // A group with no sub-rules imposes nothing.
        return RuleProgress {
            status: ProgressStatus::Completed,
            percentage: 100.0,
            detail: ProgressDetail::Group {
                operator,
                options,
                active_option: None,
            },
        };
    }

    match operator {
        GroupOperator::And => {
            let percentage =
                options.iter().map(|o| o.percentage).sum::<f32>() / options.len() as f32;
            let status = if options
                .iter()
                .all(|o| o.status == ProgressStatus::Completed)
            {
                ProgressStatus::Completed
            } else if options
                .iter()
                .any(|o| o.status != ProgressStatus::NotStarted)
            {
                ProgressStatus::InProgress
            } else {
                ProgressStatus::NotStarted
            };
            RuleProgress {
                status,
                percentage,
                detail: ProgressDetail::Group {
                    operator,
                    options,
                    active_option: None,
                },
            }
        }
        GroupOperator::Or => {
            let active_option = options
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.percentage
                        .partial_cmp(&b.percentage)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(index, _)| index);
            let percentage = active_option
                .map(|index| options[index].percentage)
                .unwrap_or(0.0);
            let status = if options
                .iter()
                .any(|o| o.status == ProgressStatus::Completed)
            {
                ProgressStatus::Completed
            } else if options
                .iter()
                .all(|o| o.status == ProgressStatus::NotStarted)
            {
                ProgressStatus::NotStarted
            } else {
                ProgressStatus::InProgress
            };
            RuleProgress {
                status,
                percentage,
                detail: ProgressDetail::Group {
                    operator,
                    options,
                    active_option,
                },
            }
        }
    }
}
