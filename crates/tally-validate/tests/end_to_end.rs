//! The engine running against libSQL storage: import, validate, auto-fix,
//! and the fix trail.

use pretty_assertions::assert_eq;
use serde_json::json;
use tally_config::ValidationSettings;
use tally_core::enums::ValidatorKind;
use tally_db::service::TallyService;
use tally_validate::{Orchestrator, ValidatorSelection};

fn dataset() -> serde_json::Value {
    json!({
        "projects": [
            {
                "id": "prj-1", "title": "Battery degradation modelling",
                "declared_total_budget": 0, "status": "active",
                "start_date": "2024-01-01", "end_date": "2024-12-31", "version": 0
            },
            {
                "id": "prj-2", "title": "Grid storage pilot",
                "declared_total_budget": 300, "status": "active",
                "start_date": "2024-01-01", "end_date": "2024-12-31", "version": 0
            }
        ],
        "employees": [
            {
                "id": "emp-1", "name": "Kim Jiwoo", "hire_date": "2020-01-01",
                "termination_date": null, "status": "active"
            }
        ],
        "budgets": [
            {
                "id": "bp-1", "project_id": "prj-1", "period_number": 1,
                "start_date": "2024-01-01", "end_date": "2024-12-31",
                "personnel": {"cash": 0, "in_kind": 0},
                "research_material": {"cash": 500, "in_kind": 0},
                "research_activity": {"cash": 0, "in_kind": 0},
                "indirect": {"cash": 0, "in_kind": 0},
                "spent_amount": 0, "version": 0
            },
            {
                "id": "bp-9", "project_id": "prj-2", "period_number": 1,
                "start_date": "2024-01-01", "end_date": "2024-12-31",
                "personnel": {"cash": 0, "in_kind": 0},
                "research_material": {"cash": 300, "in_kind": 0},
                "research_activity": {"cash": 0, "in_kind": 0},
                "indirect": {"cash": 0, "in_kind": 0},
                "spent_amount": 0, "version": 0
            }
        ],
        "members": [
            {
                "id": "mem-1", "project_id": "prj-1", "employee_id": "emp-1",
                "role": "researcher", "participation_rate": 130.0,
                "start_date": "2024-01-01", "end_date": "2024-12-31",
                "monthly_amount": 1000, "status": "active", "version": 0
            }
        ],
        "evidence": []
    })
}

async fn seeded(trail_dir: Option<std::path::PathBuf>) -> Orchestrator<TallyService> {
    let service = TallyService::new_local(":memory:", trail_dir).await.unwrap();
    service.import_json(dataset()).await.unwrap();
    Orchestrator::new(service, ValidationSettings::default())
}

#[tokio::test]
async fn auto_fix_commits_and_second_run_is_clean() {
    let engine = seeded(None).await;
    let all = ValidatorSelection::all();

    let first = engine.validate_project("prj-1", &all, true).await.unwrap();
    assert!(!first.validation.is_valid);
    let fixed: Vec<ValidatorKind> = first.fixes.iter().map(|f| f.validator).collect();
    assert_eq!(
        fixed,
        vec![
            ValidatorKind::ParticipationRate,
            ValidatorKind::PersonnelCost,
            ValidatorKind::BudgetConsistency,
        ]
    );

    let project = engine.store().get_project("prj-1").await.unwrap();
    // 12 months at 1,000 x 100% plus 500 of research material
    assert_eq!(project.declared_total_budget, 12_500);
    assert_eq!(project.version, 1);

    let second = engine.validate_project("prj-1", &all, true).await.unwrap();
    assert!(second.fixes.is_empty());
    assert!(second.validation.is_valid, "{}", second.validation.message);
}

#[tokio::test]
async fn bulk_run_covers_every_active_project() {
    let engine = seeded(None).await;
    let bulk = engine
        .validate_all_active(&ValidatorSelection::all(), false)
        .await
        .unwrap();

    assert_eq!(bulk.summary.total_projects, 2);
    assert_eq!(bulk.summary.failed_projects, 0);
    let valid: Vec<(&str, bool)> = bulk
        .projects
        .iter()
        .map(|p| (p.project_id.as_str(), p.report.as_ref().unwrap().validation.is_valid))
        .collect();
    assert_eq!(valid, vec![("prj-1", false), ("prj-2", true)]);
}

#[tokio::test]
async fn committed_fixes_reach_the_trail() {
    let dir = tempfile::tempdir().unwrap();
    let engine = seeded(Some(dir.path().to_path_buf())).await;

    let report = engine
        .validate_project(
            "prj-1",
            &ValidatorSelection::one(ValidatorKind::BudgetConsistency),
            true,
        )
        .await
        .unwrap();
    assert_eq!(report.fixes.len(), 1);

    let trail = std::fs::read_to_string(dir.path().join("prj-1.jsonl")).unwrap();
    let entries: Vec<serde_json::Value> = trail
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "prj-1");
    assert_eq!(entries[0]["value"], 500);
    assert_eq!(entries[0]["version"], 1);
}

#[tokio::test]
async fn employee_summary_reads_storage() {
    let engine = seeded(None).await;
    let summary = engine.employee_summary("emp-1", None).await.unwrap();
    assert_eq!(summary.total_rate, 130.0);
    assert_eq!(summary.remaining_capacity, 0.0);
    assert_eq!(summary.employee_name.as_deref(), Some("Kim Jiwoo"));
}
