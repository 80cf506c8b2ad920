use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{ClassId, Course, CourseId};

/// Identifier wrapper for student plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanId(pub String);

/// Identifier wrapper for degree programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(pub String);

/// Identifier wrapper for one program-to-plan attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttachmentId(pub String);

/// Identifier wrapper for a course placed on a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlannedCourseId(pub String);

/// A student's multi-semester plan. The editor owns its contents; the
/// engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub title: String,
}

/// Association of one degree program to one plan. A plan may attach
/// several programs (a major and a minor), each audited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAttachment {
    pub id: AttachmentId,
    pub plan_id: PlanId,
    pub program_id: ProgramId,
}

/// Resolved course data behind a planned course. Carries both identifier
/// spaces because a semester offering scraped mid-term may lack a catalog
/// course id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: Option<CourseId>,
    pub class_id: Option<ClassId>,
    pub subject: String,
    pub number: String,
    pub title: String,
    pub credits: f32,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl CourseRecord {
    pub fn from_catalog(course: &Course) -> Self {
        Self {
            course_id: Some(course.id.clone()),
            class_id: None,
            subject: course.subject.clone(),
            number: course.number.clone(),
            title: course.title.clone(),
            credits: course.credits,
            attributes: course.attributes.clone(),
        }
    }

    /// Canonical `"SUBJECT NUMBER"` label, e.g. `"MATH 1300"`.
    pub fn subject_number(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Whether `identifier` names this course. Tries the catalog course id,
    /// then the semester class id, then the canonical subject+number label.
    /// Every identifier comparison in the engine goes through here so all
    /// three forms are accepted everywhere.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        if let Some(course_id) = &self.course_id {
            if course_id.0 == identifier {
                return true;
            }
        }
        if let Some(class_id) = &self.class_id {
            if class_id.0 == identifier {
                return true;
            }
        }
        self.subject_number() == identifier
    }

    /// Whether two records describe the same course, under the same
    /// three-way identity used by [`CourseRecord::matches_identifier`].
    pub fn same_course(&self, other: &CourseRecord) -> bool {
        if let (Some(a), Some(b)) = (&self.course_id, &other.course_id) {
            if a == b {
                return true;
            }
        }
        if let (Some(a), Some(b)) = (&self.class_id, &other.class_id) {
            if a == b {
                return true;
            }
        }
        self.subject == other.subject && self.number == other.number
    }

    pub fn attribute_codes(&self, attribute_type: &str) -> &[String] {
        self.attributes
            .get(attribute_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A course placed on a plan in a given semester slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    pub id: PlannedCourseId,
    pub plan_id: PlanId,
    pub course: CourseRecord,
    pub semester: u32,
    pub position: u32,
}

/// Declarative filter over courses. Evaluation is pure and total; a kind
/// this build does not recognize deserializes to `Unknown` and matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CourseFilter {
    Any,
    SubjectNumber {
        subjects: BTreeSet<String>,
    },
    CourseNumberSuffix {
        suffixes: BTreeSet<String>,
    },
    Attribute {
        attributes: BTreeSet<String>,
        attribute_type: String,
    },
    /// Legacy editor placeholder; matches everything.
    Placeholder,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountType {
    Courses,
    Credits,
}

/// The obligation a requirement places on assigned courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Every listed course must be present.
    TakeCourses { courses: Vec<String> },
    /// At least `count` (courses or credits) drawn from the list.
    TakeFromList {
        courses: Vec<String>,
        count: u32,
        count_type: CountType,
    },
    /// At least `credits` credit-hours matching the filter.
    TakeAnyCourses { credits: f32, filter: CourseFilter },
    /// Recursive composition of sub-rules.
    Group {
        operator: GroupOperator,
        rules: Vec<Rule>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeOperator {
    Above,
    Below,
    Between,
}

/// Declared at program, section, or requirement scope.
///
/// `AllowDoubleCount` and `RequireCourseFromSections` are consulted during
/// assignment; the remaining kinds are validated after assignment and never
/// block a pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    AllowDoubleCount {
        course_id: String,
        /// Fully-qualified `section.requirement` identifiers that may each
        /// claim the course in addition to its primary assignment.
        requirement_ids: BTreeSet<String>,
    },
    RequireCourseFromSections {
        allowed_section_ids: BTreeSet<String>,
        operator: GroupOperator,
    },
    MinCourseCount {
        count: u32,
        filter: CourseFilter,
    },
    MaxCourseCount {
        count: u32,
        filter: CourseFilter,
    },
    MaxCreditsFromCourses {
        max_credits: f32,
        course_ids: BTreeSet<String>,
    },
    MinCreditsFromCourses {
        min_credits: f32,
        course_ids: BTreeSet<String>,
    },
    CourseNumberRange {
        subject_code: String,
        min_number: u32,
        max_number: Option<u32>,
        min_count: u32,
        operator: RangeOperator,
    },
    #[serde(other)]
    Unknown,
}

impl Constraint {
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Constraint::AllowDoubleCount { .. } => "allow_double_count",
            Constraint::RequireCourseFromSections { .. } => "require_course_from_sections",
            Constraint::MinCourseCount { .. } => "min_course_count",
            Constraint::MaxCourseCount { .. } => "max_course_count",
            Constraint::MaxCreditsFromCourses { .. } => "max_credits_from_courses",
            Constraint::MinCreditsFromCourses { .. } => "min_credits_from_courses",
            Constraint::CourseNumberRange { .. } => "course_number_range",
            Constraint::Unknown => "unknown",
        }
    }
}

/// A single named obligation inside a section. `id` is unique within the
/// owning section; the fully-qualified identity is `section.requirement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub title: String,
    pub rule: Rule,
    pub required_credits: f32,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// An ordered group of requirements. Declaration order is load-bearing:
/// assignment walks sections, then requirements within a section, in this
/// order, and enforcement constraints observe only assignments already made
/// earlier in the same pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    pub required_credits: f32,
}

/// A degree program: ordered sections plus program-scope constraints.
/// Immutable during an assignment pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub title: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    pub total_credits: f32,
}

/// Fully-qualified requirement identity, `section.requirement`.
pub fn qualified_requirement_id(section_id: &str, requirement_id: &str) -> String {
    format!("{section_id}.{requirement_id}")
}

/// An assignment of one planned course to one requirement within one
/// program attachment. Recomputed wholesale on every assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentRecord {
    pub plan_id: PlanId,
    pub attachment_id: AttachmentId,
    pub planned_course_id: PlannedCourseId,
    pub section_id: String,
    pub requirement_id: String,
    pub credits_applied: f32,
}

impl FulfillmentRecord {
    pub fn qualified_requirement_id(&self) -> String {
        qualified_requirement_id(&self.section_id, &self.requirement_id)
    }
}
