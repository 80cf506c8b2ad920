use std::collections::{BTreeMap, BTreeSet};

use crate::audit::domain::{Constraint, CourseRecord, Program};

/// Lookup compiled from every `allow_double_count` constraint in a
/// program, keyed by the course identifier the constraint names. Values
/// are the fully-qualified requirement ids that may claim the course in
/// addition to its primary assignment.
#[derive(Debug, Default, Clone)]
pub struct DoubleCountMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl DoubleCountMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `course` may additionally be assigned to
    /// `target_requirement` (a fully-qualified `section.requirement` id).
    /// The course is matched against map keys by catalog id, class id, or
    /// subject+number; any match counts.
    pub fn can_double_count(&self, course: &CourseRecord, target_requirement: &str) -> bool {
        self.entries
            .iter()
            .filter(|(key, _)| course.matches_identifier(key))
            .any(|(_, requirements)| requirements.contains(target_requirement))
    }
}

/// Walks program-, section-, and requirement-scope constraint lists and
/// merges every `allow_double_count` declaration into one map. Multiple
/// constraints naming the same course union their requirement sets.
pub fn build_double_count_map(program: &Program) -> DoubleCountMap {
    let mut map = DoubleCountMap::default();

    absorb(&mut map, &program.constraints);
    for section in &program.sections {
        absorb(&mut map, &section.constraints);
        for requirement in &section.requirements {
            absorb(&mut map, &requirement.constraints);
        }
    }

    map
}

fn absorb(map: &mut DoubleCountMap, constraints: &[Constraint]) {
    for constraint in constraints {
        if let Constraint::AllowDoubleCount {
            course_id,
            requirement_ids,
        } = constraint
        {
            map.entries
                .entry(course_id.clone())
                .or_default()
                .extend(requirement_ids.iter().cloned());
        }
    }
}
