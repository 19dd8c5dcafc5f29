//! The validation orchestrator: single-project runs, bulk runs over every
//! active project, and the auto-fix transaction.
//!
//! A run loads the project snapshot once and evaluates the selected
//! validators in [`ValidatorKind`] order. With auto-fix, each validator plans
//! its corrections against the snapshot as earlier validators' fixes will
//! leave it, and all writes for the project go through one
//! [`FixTransaction`]. A failed write rolls the whole project back and the
//! report falls back to the pre-fix evaluation with `fix_error` set.

use tally_config::ValidationSettings;
use tally_core::enums::{EntityType, FixField, ValidatorKind};
use tally_core::period::DateRange;
use tally_core::report::{
    BulkProjectEntry, BulkReport, BulkSummary, EmployeeSummary, Fix, FixValue, ValidationReport,
    ValidationResult,
};
use tally_core::store::{FixTransaction, FixWriter, SnapshotLoader, StoreError};

use crate::error::EngineError;
use crate::snapshot::{ProjectSnapshot, load_snapshot};
use crate::validator::{ValidatorRegistry, ValidatorSelection};
use crate::validators::summarize;

pub struct Orchestrator<S> {
    store: S,
    registry: ValidatorRegistry,
    settings: ValidationSettings,
}

/// Results of one pass over the selected validators.
struct Evaluation {
    results: Vec<ValidationResult>,
    fixes: Vec<Fix>,
}

impl<S> Orchestrator<S>
where
    S: SnapshotLoader + FixWriter,
{
    /// Orchestrator over the standard validators configured from `settings`.
    pub fn new(store: S, settings: ValidationSettings) -> Self {
        Self {
            store,
            registry: ValidatorRegistry::standard(&settings),
            settings,
        }
    }

    /// Replace the validator registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Validate one project.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidInput` for an empty id, an unregistered
    ///   validator, or a snapshot with malformed ranges.
    /// - `EngineError::Load` when the snapshot cannot be loaded.
    ///
    /// A rolled-back auto-fix is not an error: the report carries
    /// `fix_error` instead.
    pub async fn validate_project(
        &self,
        project_id: &str,
        selection: &ValidatorSelection,
        auto_fix: bool,
    ) -> Result<ValidationReport, EngineError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(EngineError::InvalidInput("projectId is required".into()));
        }
        if let Some(missing) = selection
            .kinds()
            .iter()
            .find(|k| self.registry.get(**k).is_none())
        {
            return Err(EngineError::InvalidInput(format!(
                "validator not registered: {missing}"
            )));
        }

        let snapshot =
            load_snapshot(&self.store, project_id)
                .await
                .map_err(|source| EngineError::Load {
                    project_id: project_id.to_string(),
                    source,
                })?;
        snapshot.check_bounds()?;

        let evaluation = self.evaluate(&snapshot, selection, auto_fix);
        let (results, fixes, fix_error) = if evaluation.fixes.is_empty() {
            (evaluation.results, Vec::new(), None)
        } else {
            match self.apply_fixes(project_id, &evaluation.fixes).await {
                Ok(()) => {
                    tracing::info!(
                        project_id,
                        fixes = evaluation.fixes.len(),
                        "auto-fix committed"
                    );
                    (evaluation.results, evaluation.fixes, None)
                }
                Err(error) => {
                    tracing::warn!(project_id, %error, "auto-fix rolled back");
                    let original = self.evaluate(&snapshot, selection, false);
                    (original.results, Vec::new(), Some(error.to_string()))
                }
            }
        };

        let validation = ValidationResult::combine(results);
        Ok(ValidationReport {
            project_id: snapshot.project.id.clone(),
            project_title: snapshot.project.title.clone(),
            validation_type: selection.label(),
            auto_fix,
            summary: validation.summary,
            validation,
            fixes,
            fix_error,
        })
    }

    /// Validate every active project. Per-project failures become entries
    /// with an `error`; the run always completes.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` only when the active project list itself
    /// cannot be read.
    pub async fn validate_all_active(
        &self,
        selection: &ValidatorSelection,
        auto_fix: bool,
    ) -> Result<BulkReport, EngineError> {
        let projects = self.store.get_active_projects().await?;
        let mut summary = BulkSummary::default();
        let mut entries = Vec::with_capacity(projects.len());

        for project in projects {
            summary.total_projects += 1;
            let entry = match self.validate_project(&project.id, selection, auto_fix).await {
                Ok(report) => {
                    summary.total_issues += report.summary.invalid_items;
                    if !report.fixes.is_empty() {
                        summary.projects_with_fixes += 1;
                        summary.total_fixed_issues +=
                            u32::try_from(report.fixes.len()).unwrap_or(u32::MAX);
                    }
                    BulkProjectEntry {
                        project_id: project.id,
                        project_title: project.title,
                        report: Some(report),
                        error: None,
                    }
                }
                Err(error) => {
                    tracing::warn!(project_id = %project.id, %error, "bulk validation failed for project");
                    summary.failed_projects += 1;
                    BulkProjectEntry {
                        project_id: project.id,
                        project_title: project.title,
                        report: None,
                        error: Some(error.to_string()),
                    }
                }
            };
            entries.push(entry);
        }

        Ok(BulkReport {
            validation_type: selection.label(),
            auto_fix,
            summary,
            projects: entries,
        })
    }

    /// One employee's participation across every project, optionally
    /// restricted to records overlapping `window`.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidInput` for an empty id or an inverted window.
    /// - `EngineError::Store` with `NotFound` when the employee has neither a
    ///   record nor any participation.
    pub async fn employee_summary(
        &self,
        employee_id: &str,
        window: Option<DateRange>,
    ) -> Result<EmployeeSummary, EngineError> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(EngineError::InvalidInput("employeeId is required".into()));
        }
        if let Some(w) = &window {
            if !w.is_well_formed() {
                return Err(EngineError::InvalidInput(format!(
                    "window starts {} after it ends {}",
                    w.start, w.end
                )));
            }
        }

        let employee = self.store.get_employee(employee_id).await?;
        let records = self.store.get_employee_members(employee_id).await?;
        if employee.is_none() && records.is_empty() {
            return Err(StoreError::NotFound {
                entity_type: EntityType::Employee,
                id: employee_id.to_string(),
            }
            .into());
        }

        Ok(summarize(
            employee_id,
            employee.as_ref(),
            &records,
            window,
            self.settings.participation_limit,
        ))
    }

    fn evaluate(
        &self,
        snapshot: &ProjectSnapshot,
        selection: &ValidatorSelection,
        auto_fix: bool,
    ) -> Evaluation {
        let mut projected = snapshot.clone();
        let mut results = Vec::with_capacity(selection.kinds().len());
        let mut fixes = Vec::new();

        for validator in selection.kinds().iter().filter_map(|k| self.registry.get(*k)) {
            let result = validator.evaluate(&projected);
            tracing::debug!(
                project_id = %snapshot.project.id,
                validator = %validator.kind(),
                is_valid = result.is_valid,
                "validator evaluated"
            );
            results.push(result);

            if auto_fix {
                let planned = validator.plan_fixes(&projected);
                if !planned.is_empty() {
                    projected = projected.with_fixes(&planned);
                    fixes.extend(planned);
                }
            }
        }

        Evaluation { results, fixes }
    }

    async fn apply_fixes(&self, project_id: &str, fixes: &[Fix]) -> Result<(), EngineError> {
        let fix_error = |source: StoreError| EngineError::Fix {
            project_id: project_id.to_string(),
            source,
        };

        let mut tx = self.store.begin(project_id).await.map_err(fix_error)?;
        for fix in fixes {
            if let Err(source) = apply_one(&mut tx, fix).await {
                if let Err(error) = tx.rollback().await {
                    tracing::warn!(project_id, %error, "rollback failed");
                }
                return Err(fix_error(source));
            }
        }
        tx.commit().await.map_err(fix_error)
    }
}

async fn apply_one<T: FixTransaction>(tx: &mut T, fix: &Fix) -> Result<(), StoreError> {
    match (fix.field, fix.new_value) {
        (FixField::ParticipationRate, FixValue::Rate(rate)) => {
            tx.set_participation_rate(&fix.scope, fix.expected_version, rate)
                .await
        }
        (FixField::PersonnelCost, FixValue::Amount(amount)) => {
            tx.set_period_personnel_cost(&fix.scope, fix.expected_version, amount)
                .await
        }
        (FixField::DeclaredTotalBudget, FixValue::Amount(amount)) => {
            tx.set_project_declared_total(&fix.scope, fix.expected_version, amount)
                .await
        }
        (field, _) => Err(StoreError::Backend(format!(
            "fix for {field} on {} carries a value of the wrong kind",
            fix.scope
        ))),
    }
}
