//! Shared test utilities for tally-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use tally_core::dataset::Dataset;
    use tally_core::entities::{
        BudgetPeriod, CategoryAmount, Employee, EvidenceItem, Member, Project,
    };
    use tally_core::enums::{CostCategory, EmployeeStatus, MemberStatus, ProjectStatus};

    use crate::TallyDb;
    use crate::service::TallyService;
    use crate::trail::writer::FixTrail;

    /// In-memory service with the fix trail disabled.
    pub async fn test_service() -> TallyService {
        let db = TallyDb::open_local(":memory:").await.unwrap();
        TallyService::from_db(db, FixTrail::disabled())
    }

    /// In-memory service with the fix trail writing to `trail_dir`.
    pub async fn test_service_with_trail(trail_dir: std::path::PathBuf) -> TallyService {
        let db = TallyDb::open_local(":memory:").await.unwrap();
        TallyService::from_db(db, FixTrail::new(trail_dir).unwrap())
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn project(id: &str, status: ProjectStatus) -> Project {
        Project {
            id: id.into(),
            title: format!("Project {id}"),
            declared_total_budget: 0,
            status,
            start_date: date("2024-01-01"),
            end_date: date("2025-12-31"),
            version: 0,
        }
    }

    pub fn employee(id: &str, hired: &str) -> Employee {
        Employee {
            id: id.into(),
            name: format!("Employee {id}"),
            hire_date: date(hired),
            termination_date: None,
            status: EmployeeStatus::Active,
        }
    }

    pub fn period(id: &str, project_id: &str, number: u32, start: &str, end: &str) -> BudgetPeriod {
        BudgetPeriod {
            id: id.into(),
            project_id: project_id.into(),
            period_number: number,
            start_date: date(start),
            end_date: date(end),
            personnel: CategoryAmount { cash: 100, in_kind: 20 },
            research_material: CategoryAmount { cash: 30, in_kind: 0 },
            research_activity: CategoryAmount { cash: 10, in_kind: 5 },
            indirect: CategoryAmount { cash: 7, in_kind: 0 },
            spent_amount: 50,
            version: 0,
        }
    }

    pub fn member(id: &str, project_id: &str, employee_id: &str, rate: f64) -> Member {
        Member {
            id: id.into(),
            project_id: project_id.into(),
            employee_id: employee_id.into(),
            role: "researcher".into(),
            participation_rate: rate,
            start_date: date("2024-01-01"),
            end_date: date("2024-12-31"),
            monthly_amount: 1_000,
            status: MemberStatus::Active,
            version: 0,
        }
    }

    pub fn evidence(
        id: &str,
        period_id: &str,
        category: CostCategory,
        assignee: Option<&str>,
    ) -> EvidenceItem {
        EvidenceItem {
            id: id.into(),
            period_id: period_id.into(),
            title: format!("Evidence {id}"),
            category,
            assignee_id: assignee.map(String::from),
            spent_amount: 10,
            due_date: date("2024-03-25"),
        }
    }

    /// One active project with two periods, two members, and one evidence item.
    pub fn sample_dataset() -> Dataset {
        Dataset {
            projects: vec![project("prj-1", ProjectStatus::Active)],
            employees: vec![employee("emp-1", "2020-01-01"), employee("emp-2", "2021-07-01")],
            budgets: vec![
                period("bp-1", "prj-1", 1, "2024-01-01", "2024-12-31"),
                period("bp-2", "prj-1", 2, "2025-01-01", "2025-12-31"),
            ],
            members: vec![
                member("mem-1", "prj-1", "emp-1", 40.0),
                member("mem-2", "prj-1", "emp-2", 30.0),
            ],
            evidence: vec![evidence("evd-1", "bp-1", CostCategory::Personnel, Some("emp-1"))],
        }
    }
}
