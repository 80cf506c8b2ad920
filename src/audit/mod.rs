//! Requirement fulfillment and constraint engine.
//!
//! Assignment (`assignment`) decides which planned course satisfies which
//! requirement and persists fulfillment records through the repository;
//! progress (`evaluation::progress`) and validation (`validation`) are
//! read-only passes over those records. The two halves deliberately
//! interpret group rules differently: a single course can help an AND
//! group through any one arm, while the group only completes when every
//! arm does.

pub mod assignment;
pub mod domain;
pub mod double_count;
pub mod evaluation;
pub mod report;
pub mod repository;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use assignment::assign_program;
pub use domain::{
    qualified_requirement_id, AttachmentId, Constraint, CountType, CourseFilter, CourseRecord,
    FulfillmentRecord, GroupOperator, Plan, PlanId, PlannedCourse, PlannedCourseId, Program,
    ProgramAttachment, ProgramId, RangeOperator, Requirement, Rule, Section,
};
pub use double_count::{build_double_count_map, DoubleCountMap};
pub use evaluation::{
    evaluate_rule, rule_progress, ProgressDetail, ProgressStatus, RuleMatch, RuleProgress,
};
pub use report::{PlanOverview, ProgramProgress, RequirementProgressView, SectionProgressView};
pub use repository::{AuditRepository, RepositoryError};
pub use service::{AuditService, AuditServiceError};
pub use validation::{validate_constraints, ConstraintCheck, ConstraintReport, ScopedFulfillment};
