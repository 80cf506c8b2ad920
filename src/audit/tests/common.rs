use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use crate::audit::domain::{
    AttachmentId, Constraint, CourseRecord, FulfillmentRecord, Plan, PlanId, PlannedCourse,
    PlannedCourseId, Program, ProgramAttachment, ProgramId, Requirement, Rule, Section,
};
use crate::audit::repository::{AuditRepository, RepositoryError};
use crate::audit::service::AuditService;
use crate::catalog::{ClassId, CourseId};

pub(super) fn course(subject: &str, number: &str, credits: f32) -> CourseRecord {
    CourseRecord {
        course_id: Some(CourseId(format!("cat-{subject}-{number}"))),
        class_id: None,
        subject: subject.to_string(),
        number: number.to_string(),
        title: format!("{subject} {number}"),
        credits,
        attributes: BTreeMap::new(),
    }
}

/// A semester offering scraped without a catalog id; only the class id
/// and subject+number identify it.
pub(super) fn class_offering(subject: &str, number: &str, credits: f32) -> CourseRecord {
    CourseRecord {
        course_id: None,
        class_id: Some(ClassId(format!("class-{subject}-{number}"))),
        subject: subject.to_string(),
        number: number.to_string(),
        title: format!("{subject} {number}"),
        credits,
        attributes: BTreeMap::new(),
    }
}

pub(super) fn with_attribute(
    mut course: CourseRecord,
    attribute_type: &str,
    code: &str,
) -> CourseRecord {
    course
        .attributes
        .entry(attribute_type.to_string())
        .or_default()
        .push(code.to_string());
    course
}

pub(super) fn planned(
    plan_id: &str,
    id: &str,
    semester: u32,
    position: u32,
    course: CourseRecord,
) -> PlannedCourse {
    PlannedCourse {
        id: PlannedCourseId(id.to_string()),
        plan_id: PlanId(plan_id.to_string()),
        course,
        semester,
        position,
    }
}

pub(super) fn requirement(id: &str, rule: Rule) -> Requirement {
    Requirement {
        id: id.to_string(),
        title: id.to_string(),
        rule,
        required_credits: 3.0,
        constraints: Vec::new(),
    }
}

pub(super) fn section(id: &str, requirements: Vec<Requirement>) -> Section {
    Section {
        id: id.to_string(),
        title: id.to_string(),
        requirements,
        constraints: Vec::new(),
        required_credits: 0.0,
    }
}

pub(super) fn program(id: &str, sections: Vec<Section>) -> Program {
    Program {
        id: ProgramId(id.to_string()),
        title: id.to_string(),
        sections,
        constraints: Vec::new(),
        total_credits: 120.0,
    }
}

pub(super) fn attachment(id: &str, plan_id: &str, program_id: &str) -> ProgramAttachment {
    ProgramAttachment {
        id: AttachmentId(id.to_string()),
        plan_id: PlanId(plan_id.to_string()),
        program_id: ProgramId(program_id.to_string()),
    }
}

pub(super) fn double_count_allowance(course_id: &str, requirement_ids: &[&str]) -> Constraint {
    Constraint::AllowDoubleCount {
        course_id: course_id.to_string(),
        requirement_ids: requirement_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<BTreeSet<String>>(),
    }
}

pub(super) fn fulfillment(
    attachment_id: &str,
    planned_course_id: &str,
    section_id: &str,
    requirement_id: &str,
    credits: f32,
) -> FulfillmentRecord {
    FulfillmentRecord {
        plan_id: PlanId("plan-1".to_string()),
        attachment_id: AttachmentId(attachment_id.to_string()),
        planned_course_id: PlannedCourseId(planned_course_id.to_string()),
        section_id: section_id.to_string(),
        requirement_id: requirement_id.to_string(),
        credits_applied: credits,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    plans: Mutex<HashMap<PlanId, Plan>>,
    programs: Mutex<HashMap<ProgramId, Program>>,
    attachments: Mutex<Vec<ProgramAttachment>>,
    planned: Mutex<Vec<PlannedCourse>>,
    fulfillments: Mutex<HashMap<AttachmentId, Vec<FulfillmentRecord>>>,
}

impl MemoryRepository {
    pub(super) fn with_plan(self, id: &str, title: &str) -> Self {
        self.plans.lock().expect("plans mutex poisoned").insert(
            PlanId(id.to_string()),
            Plan {
                id: PlanId(id.to_string()),
                title: title.to_string(),
            },
        );
        self
    }

    pub(super) fn with_program(self, program: Program) -> Self {
        self.programs
            .lock()
            .expect("programs mutex poisoned")
            .insert(program.id.clone(), program);
        self
    }

    pub(super) fn with_attachment(self, attachment: ProgramAttachment) -> Self {
        self.attachments
            .lock()
            .expect("attachments mutex poisoned")
            .push(attachment);
        self
    }

    pub(super) fn with_planned(self, course: PlannedCourse) -> Self {
        self.planned
            .lock()
            .expect("planned mutex poisoned")
            .push(course);
        self
    }
}

impl AuditRepository for MemoryRepository {
    fn plan(&self, id: &PlanId) -> Result<Option<Plan>, RepositoryError> {
        Ok(self
            .plans
            .lock()
            .expect("plans mutex poisoned")
            .get(id)
            .cloned())
    }

    fn attachments_for_plan(
        &self,
        plan_id: &PlanId,
    ) -> Result<Vec<ProgramAttachment>, RepositoryError> {
        Ok(self
            .attachments
            .lock()
            .expect("attachments mutex poisoned")
            .iter()
            .filter(|attachment| attachment.plan_id == *plan_id)
            .cloned()
            .collect())
    }

    fn attachment(&self, id: &AttachmentId) -> Result<Option<ProgramAttachment>, RepositoryError> {
        Ok(self
            .attachments
            .lock()
            .expect("attachments mutex poisoned")
            .iter()
            .find(|attachment| attachment.id == *id)
            .cloned())
    }

    fn program(&self, id: &ProgramId) -> Result<Option<Program>, RepositoryError> {
        Ok(self
            .programs
            .lock()
            .expect("programs mutex poisoned")
            .get(id)
            .cloned())
    }

    fn planned_courses(&self, plan_id: &PlanId) -> Result<Vec<PlannedCourse>, RepositoryError> {
        Ok(self
            .planned
            .lock()
            .expect("planned mutex poisoned")
            .iter()
            .filter(|course| course.plan_id == *plan_id)
            .cloned()
            .collect())
    }

    fn replace_fulfillments(
        &self,
        attachment_id: &AttachmentId,
        records: Vec<FulfillmentRecord>,
    ) -> Result<(), RepositoryError> {
        self.fulfillments
            .lock()
            .expect("fulfillments mutex poisoned")
            .insert(attachment_id.clone(), records);
        Ok(())
    }

    fn fulfillments(
        &self,
        attachment_id: &AttachmentId,
    ) -> Result<Vec<FulfillmentRecord>, RepositoryError> {
        Ok(self
            .fulfillments
            .lock()
            .expect("fulfillments mutex poisoned")
            .get(attachment_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub(super) fn build_service(
    repository: MemoryRepository,
) -> (AuditService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(repository);
    (AuditService::new(repository.clone()), repository)
}
