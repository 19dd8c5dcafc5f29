//! Serde roundtrip and JsonSchema validation tests for entity and report types.

use chrono::NaiveDate;
use schemars::schema_for;
use tally_core::dataset::Dataset;
use tally_core::entities::*;
use tally_core::enums::*;
use tally_core::period::DateRange;
use tally_core::report::*;
use tally_core::responses::ErrorResponse;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_period() -> BudgetPeriod {
    BudgetPeriod {
        id: "bp-0001".into(),
        project_id: "prj-0001".into(),
        period_number: 1,
        start_date: date("2024-01-01"),
        end_date: date("2024-12-31"),
        personnel: CategoryAmount {
            cash: 60_000_000,
            in_kind: 12_000_000,
        },
        research_material: CategoryAmount {
            cash: 20_000_000,
            in_kind: 0,
        },
        research_activity: CategoryAmount {
            cash: 15_000_000,
            in_kind: 3_000_000,
        },
        indirect: CategoryAmount {
            cash: 8_000_000,
            in_kind: 0,
        },
        spent_amount: 41_500_000,
        version: 3,
    }
}

fn sample_member() -> Member {
    Member {
        id: "mem-0001".into(),
        project_id: "prj-0001".into(),
        employee_id: "emp-0001".into(),
        role: "principal_investigator".into(),
        participation_rate: 40.0,
        start_date: date("2024-01-01"),
        end_date: date("2024-12-31"),
        monthly_amount: 5_000_000,
        status: MemberStatus::Active,
        version: 0,
    }
}

roundtrip_and_validate!(
    project_roundtrip,
    Project,
    Project {
        id: "prj-0001".into(),
        title: "Battery degradation modelling".into(),
        declared_total_budget: 118_000_000,
        status: ProjectStatus::Active,
        start_date: date("2024-01-01"),
        end_date: date("2025-12-31"),
        version: 1,
    }
);

roundtrip_and_validate!(
    employee_roundtrip,
    Employee,
    Employee {
        id: "emp-0001".into(),
        name: "Kim Jiwoo".into(),
        hire_date: date("2019-03-01"),
        termination_date: None,
        status: EmployeeStatus::Active,
    }
);

roundtrip_and_validate!(budget_period_roundtrip, BudgetPeriod, sample_period());

roundtrip_and_validate!(member_roundtrip, Member, sample_member());

roundtrip_and_validate!(
    evidence_roundtrip,
    EvidenceItem,
    EvidenceItem {
        id: "evd-0001".into(),
        period_id: "bp-0001".into(),
        title: "March payroll".into(),
        category: CostCategory::Personnel,
        assignee_id: Some("emp-0001".into()),
        spent_amount: 2_000_000,
        due_date: date("2024-03-25"),
    }
);

roundtrip_and_validate!(
    dataset_roundtrip,
    Dataset,
    Dataset {
        budgets: vec![sample_period()],
        members: vec![sample_member()],
        ..Dataset::default()
    }
);

roundtrip_and_validate!(
    fix_roundtrip,
    Fix,
    Fix {
        validator: ValidatorKind::BudgetConsistency,
        entity_type: EntityType::Project,
        scope: "prj-0001".into(),
        field: FixField::DeclaredTotalBudget,
        old_value: FixValue::Amount(100),
        new_value: FixValue::Amount(118),
        expected_version: 1,
    }
);

roundtrip_and_validate!(
    participation_result_roundtrip,
    ValidationResult,
    ValidationResult {
        is_valid: false,
        message: "emp-0001 is at 110%".into(),
        summary: ItemSummary {
            total_items: 3,
            valid_items: 0,
            invalid_items: 3,
        },
        details: ValidationDetails::ParticipationRate(ParticipationDetails {
            limit: 100.0,
            window: Some(DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap()),
            employees: vec![EmployeeParticipation {
                employee_id: "emp-0001".into(),
                employee_name: Some("Kim Jiwoo".into()),
                total_rate: 110.5,
                status: ParticipationStatus::OverLimit,
                assignments: vec![AssignmentRate {
                    member_id: "mem-0001".into(),
                    project_id: "prj-0001".into(),
                    rate: 40.5,
                    range: DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap(),
                }],
            }],
        }),
    }
);

roundtrip_and_validate!(
    error_response_roundtrip,
    ErrorResponse,
    ErrorResponse::new("projectId is required")
);

#[test]
fn error_response_wire_shape() {
    let json = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
    assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
}
