use std::sync::Arc;

use tracing::info;

use crate::audit::assignment::assign_program;
use crate::audit::domain::{AttachmentId, FulfillmentRecord, PlanId};
use crate::audit::report::{build_plan_overview, build_program_progress, PlanOverview, ProgramProgress};
use crate::audit::repository::{AuditRepository, RepositoryError};

/// Service composing the repository with the assignment and reporting
/// passes. All three entry points operate on whole plans or attachments;
/// there is no incremental update path.
pub struct AuditService<R> {
    repository: Arc<R>,
}

impl<R> AuditService<R>
where
    R: AuditRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Recomputes and persists the fulfillment set for every program
    /// attached to the plan. Invoked whenever the plan's courses or
    /// program attachments change.
    pub fn assign(&self, plan_id: &PlanId) -> Result<(), AuditServiceError> {
        self.repository
            .plan(plan_id)?
            .ok_or(RepositoryError::NotFound)?;
        let planned = self.repository.planned_courses(plan_id)?;

        for attachment in self.repository.attachments_for_plan(plan_id)? {
            let program = self
                .repository
                .program(&attachment.program_id)?
                .ok_or(RepositoryError::NotFound)?;

            let records = assign_program(&program, &attachment, &planned);
            info!(
                plan = %plan_id.0,
                program = %program.id.0,
                fulfillments = records.len(),
                "replacing fulfillment set"
            );
            self.repository
                .replace_fulfillments(&attachment.id, records)?;
        }

        Ok(())
    }

    /// Builds the audit report for one program attachment from persisted
    /// fulfillment records.
    pub fn compute_progress(
        &self,
        attachment_id: &AttachmentId,
    ) -> Result<ProgramProgress, AuditServiceError> {
        let attachment = self
            .repository
            .attachment(attachment_id)?
            .ok_or(RepositoryError::NotFound)?;
        let program = self
            .repository
            .program(&attachment.program_id)?
            .ok_or(RepositoryError::NotFound)?;
        let planned = self.repository.planned_courses(&attachment.plan_id)?;
        let fulfillments = self.repository.fulfillments(attachment_id)?;

        Ok(build_program_progress(
            &program,
            &attachment,
            &planned,
            &fulfillments,
        ))
    }

    /// Runs `compute_progress` for every attached program and rolls the
    /// results up into one plan-wide overview.
    pub fn aggregate_plan_progress(
        &self,
        plan_id: &PlanId,
    ) -> Result<PlanOverview, AuditServiceError> {
        let plan = self
            .repository
            .plan(plan_id)?
            .ok_or(RepositoryError::NotFound)?;
        let planned = self.repository.planned_courses(plan_id)?;

        let mut programs = Vec::new();
        let mut all_records: Vec<FulfillmentRecord> = Vec::new();
        for attachment in self.repository.attachments_for_plan(plan_id)? {
            let program = self
                .repository
                .program(&attachment.program_id)?
                .ok_or(RepositoryError::NotFound)?;
            let fulfillments = self.repository.fulfillments(&attachment.id)?;
            programs.push(build_program_progress(
                &program,
                &attachment,
                &planned,
                &fulfillments,
            ));
            all_records.extend(fulfillments);
        }

        Ok(build_plan_overview(&plan, programs, &planned, &all_records))
    }
}

/// Error raised by the audit service. Engine passes themselves are total;
/// only the storage collaborator can fail.
#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
