use tracing::warn;

use super::filter::{filter_matches, filter_specificity};
use crate::audit::domain::{CourseRecord, Rule};

/// An exact course list is the most specific claim a requirement can make
/// on a course.
pub(crate) const EXACT_LIST_SPECIFICITY: u32 = 100;

/// A curated pick-list is more specific than any open filter but less than
/// an exact list: the course is one of several valid choices.
pub(crate) const CHOICE_LIST_SPECIFICITY: u32 = 60;

/// Assignment-time verdict for one (course, rule) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub matches: bool,
    pub specificity: u32,
}

impl RuleMatch {
    const fn no_match() -> Self {
        Self {
            matches: false,
            specificity: 0,
        }
    }

    const fn at(specificity: u32) -> Self {
        Self {
            matches: true,
            specificity,
        }
    }
}

/// Decides whether a single course can help satisfy `rule`, and how
/// specifically the rule claims it. The assigner prefers higher
/// specificity so a broad credit bucket cannot starve an exact-list
/// requirement of the one course able to satisfy it.
pub fn evaluate_rule(rule: &Rule, course: &CourseRecord) -> RuleMatch {
    match rule {
        Rule::TakeCourses { courses } => {
            if courses.iter().any(|id| course.matches_identifier(id)) {
                RuleMatch::at(EXACT_LIST_SPECIFICITY)
            } else {
                RuleMatch::no_match()
            }
        }
        Rule::TakeFromList { courses, .. } => {
            if courses.iter().any(|id| course.matches_identifier(id)) {
                RuleMatch::at(CHOICE_LIST_SPECIFICITY)
            } else {
                RuleMatch::no_match()
            }
        }
        Rule::TakeAnyCourses { filter, .. } => {
            if filter_matches(filter, course) {
                RuleMatch::at(filter_specificity(filter))
            } else {
                RuleMatch::no_match()
            }
        }
        // For a single candidate course both operators behave alike: one
        // matching arm is enough, because an AND group's arms are expected
        // to be covered by distinct courses over time. Progress reporting
        // treats AND differently (see `progress`).
        Rule::Group { rules, .. } => rules
            .iter()
            .map(|sub_rule| evaluate_rule(sub_rule, course))
            .filter(|verdict| verdict.matches)
            .max_by_key(|verdict| verdict.specificity)
            .unwrap_or_else(RuleMatch::no_match),
        Rule::Unknown => {
            warn!("ignoring requirement rule of unrecognized kind");
            RuleMatch::no_match()
        }
    }
}
