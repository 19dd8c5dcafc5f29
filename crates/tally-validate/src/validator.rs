//! The `Validator` capability and the registry the orchestrator dispatches
//! through.

use std::collections::BTreeMap;

use tally_config::ValidationSettings;
use tally_core::enums::ValidatorKind;
use tally_core::report::{Fix, ValidationResult};

use crate::error::EngineError;
use crate::snapshot::ProjectSnapshot;
use crate::validators::{
    BudgetConsistencyValidator, EmploymentPeriodValidator, ParticipationRateValidator,
    PersonnelCostValidator, UsageRateValidator,
};

/// One consistency check over a project snapshot.
///
/// Both methods are pure. `plan_fixes` returns the corrective writes that
/// would make `evaluate` pass; validators that only flag keep the default.
pub trait Validator: Send + Sync {
    fn kind(&self) -> ValidatorKind;

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult;

    fn plan_fixes(&self, _snapshot: &ProjectSnapshot) -> Vec<Fix> {
        Vec::new()
    }
}

/// Validators keyed by kind. Iteration follows `ValidatorKind` order.
pub struct ValidatorRegistry {
    validators: BTreeMap<ValidatorKind, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            validators: BTreeMap::new(),
        }
    }

    /// The five built-in validators configured from `settings`.
    #[must_use]
    pub fn standard(settings: &ValidationSettings) -> Self {
        let mut registry = Self::empty();
        registry.register(ParticipationRateValidator::new(settings.participation_limit));
        registry.register(EmploymentPeriodValidator);
        registry.register(PersonnelCostValidator::new(settings.personnel_tolerance));
        registry.register(BudgetConsistencyValidator);
        registry.register(UsageRateValidator::new(settings.max_usage_rate));
        registry
    }

    /// Add a validator, replacing any registered under the same kind.
    pub fn register(&mut self, validator: impl Validator + 'static) {
        self.validators.insert(validator.kind(), Box::new(validator));
    }

    #[must_use]
    pub fn get(&self, kind: ValidatorKind) -> Option<&dyn Validator> {
        self.validators.get(&kind).map(|v| &**v)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<ValidatorKind> {
        self.validators.keys().copied().collect()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::standard(&ValidationSettings::default())
    }
}

/// Which validators a run should execute. Always sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSelection {
    kinds: Vec<ValidatorKind>,
}

impl ValidatorSelection {
    #[must_use]
    pub fn all() -> Self {
        Self {
            kinds: ValidatorKind::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn one(kind: ValidatorKind) -> Self {
        Self { kinds: vec![kind] }
    }

    /// Parse `all` or a comma-separated list of validator names.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for an empty list or an unknown name.
    pub fn parse(input: &str) -> Result<Self, EngineError> {
        if input.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }
        let mut kinds = Vec::new();
        for name in input.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let kind = ValidatorKind::from_name(name)
                .ok_or_else(|| EngineError::InvalidInput(format!("unknown validator: {name}")))?;
            kinds.push(kind);
        }
        if kinds.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one validator is required".into(),
            ));
        }
        kinds.sort_unstable();
        kinds.dedup();
        Ok(Self { kinds })
    }

    #[must_use]
    pub fn kinds(&self) -> &[ValidatorKind] {
        &self.kinds
    }

    /// `validationType` label: `all`, one name, or a comma-joined list.
    #[must_use]
    pub fn label(&self) -> String {
        if self.kinds == ValidatorKind::ALL {
            return "all".to_string();
        }
        self.kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}
