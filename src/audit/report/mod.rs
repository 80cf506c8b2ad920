mod summary;
pub mod views;

pub use summary::{build_plan_overview, build_program_progress};
pub use views::{
    PlanOverview, ProgramProgress, RequirementProgressView, SectionProgressView,
    UnassignedCourseView,
};
