//! Central schema registry for all Tally types.
//!
//! The `SchemaRegistry` builds JSON Schemas from tally-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in Tally.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or_default(),
        );
    };
}

impl SchemaRegistry {
    /// Build a registry containing every entity, report, trail, and response
    /// schema from tally-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entities (5) + import envelope ---
        register!(schemas, "project", tally_core::entities::Project);
        register!(schemas, "employee", tally_core::entities::Employee);
        register!(schemas, "budget_period", tally_core::entities::BudgetPeriod);
        register!(schemas, "member", tally_core::entities::Member);
        register!(schemas, "evidence_item", tally_core::entities::EvidenceItem);
        register!(schemas, "dataset", tally_core::dataset::Dataset);

        // --- Validation output ---
        register!(schemas, "fix", tally_core::report::Fix);
        register!(
            schemas,
            "validation_result",
            tally_core::report::ValidationResult
        );
        register!(
            schemas,
            "validation_report",
            tally_core::report::ValidationReport
        );
        register!(schemas, "bulk_report", tally_core::report::BulkReport);
        register!(
            schemas,
            "employee_summary",
            tally_core::report::EmployeeSummary
        );

        // --- Trail ---
        register!(schemas, "fix_trail_entry", tally_core::trail::FixTrailEntry);

        // --- CLI responses ---
        register!(
            schemas,
            "error_response",
            tally_core::responses::ErrorResponse
        );
        register!(
            schemas,
            "import_response",
            tally_core::responses::ImportResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tally_core::entities::Employee;
    use tally_core::enums::EmployeeStatus;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_schemas() {
        let reg = registry();
        assert_eq!(reg.schema_count(), 14);
        for name in [
            "project",
            "employee",
            "budget_period",
            "member",
            "evidence_item",
            "dataset",
            "validation_report",
            "bulk_report",
            "fix_trail_entry",
        ] {
            assert!(reg.get(name).is_some(), "Missing expected schema: {name}");
        }
    }

    #[test]
    fn list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn validate_valid_employee() {
        let employee = Employee {
            id: "emp-1".into(),
            name: "Park Minseo".into(),
            hire_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            termination_date: None,
            status: EmployeeStatus::Active,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(registry().validate("employee", &json).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_status() {
        let invalid = serde_json::json!({
            "id": "emp-1",
            "name": "Park Minseo",
            "hire_date": "2020-05-01",
            "termination_date": null,
            "status": "on_leave"
        });
        assert!(matches!(
            registry().validate("employee", &invalid),
            Err(SchemaError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn dataset_requires_member_fields() {
        let invalid = serde_json::json!({
            "members": [{ "id": "mem-1", "project_id": "prj-1" }]
        });
        let Err(SchemaError::ValidationFailed { errors }) =
            registry().validate("dataset", &invalid)
        else {
            panic!("expected ValidationFailed");
        };
        assert!(!errors.is_empty());
    }

    #[test]
    fn empty_dataset_is_valid() {
        assert!(
            registry()
                .validate("dataset", &serde_json::json!({}))
                .is_ok()
        );
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let result = registry().validate("bogus", &serde_json::json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
