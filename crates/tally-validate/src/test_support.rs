//! Shared test utilities: snapshot fixtures and an in-memory store.

pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use tally_core::entities::{
        BudgetPeriod, CategoryAmount, Employee, EvidenceItem, Member, Project,
    };
    use tally_core::enums::{CostCategory, EmployeeStatus, MemberStatus, ProjectStatus};

    use crate::snapshot::ProjectSnapshot;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Active project running through 2024.
    pub fn project(id: &str) -> Project {
        Project {
            id: id.into(),
            title: format!("Project {id}"),
            declared_total_budget: 0,
            status: ProjectStatus::Active,
            start_date: date("2024-01-01"),
            end_date: date("2024-12-31"),
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

    /// Period of `prj-1` with every amount zero.
    pub fn period(id: &str, number: u32, start: &str, end: &str) -> BudgetPeriod {
        BudgetPeriod {
            id: id.into(),
            project_id: "prj-1".into(),
            period_number: number,
            start_date: date(start),
            end_date: date(end),
            personnel: CategoryAmount::default(),
            research_material: CategoryAmount::default(),
            research_activity: CategoryAmount::default(),
            indirect: CategoryAmount::default(),
            spent_amount: 0,
            version: 0,
        }
    }

    /// Active record on `prj-1` for all of 2024 at 1,000 a month.
    pub fn member(id: &str, employee_id: &str, rate: f64) -> Member {
        Member {
            id: id.into(),
            project_id: "prj-1".into(),
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
        due: &str,
    ) -> EvidenceItem {
        EvidenceItem {
            id: id.into(),
            period_id: period_id.into(),
            title: format!("Evidence {id}"),
            category,
            assignee_id: assignee.map(String::from),
            spent_amount: 0,
            due_date: date(due),
        }
    }

    /// Assemble a snapshot; cross-project assignments start as this
    /// project's own records.
    pub fn build(
        project: Project,
        periods: Vec<BudgetPeriod>,
        members: Vec<Member>,
        employees: Vec<Employee>,
        evidence: Vec<EvidenceItem>,
    ) -> ProjectSnapshot {
        let mut employee_assignments: BTreeMap<String, Vec<Member>> = BTreeMap::new();
        for m in &members {
            employee_assignments
                .entry(m.employee_id.clone())
                .or_default()
                .push(m.clone());
        }
        ProjectSnapshot {
            project,
            periods,
            members,
            employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
            employee_assignments,
            evidence,
        }
    }

    /// One 2024 period with 10 in-kind personnel, and `mem-1` (emp-1) at 120%.
    pub fn base_snapshot() -> ProjectSnapshot {
        let mut bp = period("bp-1", 1, "2024-01-01", "2024-12-31");
        bp.personnel = CategoryAmount { cash: 0, in_kind: 10 };
        build(
            project("prj-1"),
            vec![bp],
            vec![member("mem-1", "emp-1", 120.0)],
            vec![employee("emp-1", "2020-01-01")],
            vec![],
        )
    }
}

pub(crate) mod memory {
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    use tally_core::Money;
    use tally_core::dataset::Dataset;
    use tally_core::entities::{BudgetPeriod, Employee, EvidenceItem, Member, Project};
    use tally_core::enums::{CostCategory, EntityType, ProjectStatus};
    use tally_core::store::{FixTransaction, FixWriter, SnapshotLoader, StoreError};

    /// In-memory store implementing the collaborator traits, with failure
    /// injection on the load and write paths.
    #[derive(Default)]
    pub struct MemoryStore {
        data: Arc<Mutex<Dataset>>,
        failing_loads: Mutex<BTreeSet<String>>,
        failing_writes: Arc<Mutex<BTreeSet<String>>>,
        stale_on_begin: Mutex<Option<String>>,
    }

    impl MemoryStore {
        pub fn new(dataset: Dataset) -> Self {
            Self {
                data: Arc::new(Mutex::new(dataset)),
                ..Self::default()
            }
        }

        /// Make every load of this project fail with a backend error.
        pub fn fail_load(&self, project_id: &str) {
            self.failing_loads.lock().unwrap().insert(project_id.into());
        }

        /// Make any write to this entity id fail with a backend error.
        pub fn fail_write(&self, entity_id: &str) {
            self.failing_writes.lock().unwrap().insert(entity_id.into());
        }

        /// Bump this entity's version when the next fix transaction opens,
        /// as if another writer got in between load and write.
        pub fn stale_on_begin(&self, entity_id: &str) {
            *self.stale_on_begin.lock().unwrap() = Some(entity_id.into());
        }

        pub fn dataset(&self) -> Dataset {
            self.data.lock().unwrap().clone()
        }

        /// Mutate stored data directly, as a concurrent writer would.
        pub fn edit(&self, f: impl FnOnce(&mut Dataset)) {
            f(&mut self.data.lock().unwrap());
        }

        fn check_load(&self, project_id: &str) -> Result<(), StoreError> {
            if self.failing_loads.lock().unwrap().contains(project_id) {
                return Err(StoreError::Backend(format!("injected load failure for {project_id}")));
            }
            Ok(())
        }
    }

    impl SnapshotLoader for MemoryStore {
        async fn get_project(&self, project_id: &str) -> Result<Project, StoreError> {
            self.check_load(project_id)?;
            self.data
                .lock()
                .unwrap()
                .projects
                .iter()
                .find(|p| p.id == project_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound {
                    entity_type: EntityType::Project,
                    id: project_id.into(),
                })
        }

        async fn get_project_budgets(
            &self,
            project_id: &str,
        ) -> Result<Vec<BudgetPeriod>, StoreError> {
            let data = self.data.lock().unwrap();
            let mut periods: Vec<BudgetPeriod> = data
                .budgets
                .iter()
                .filter(|b| b.project_id == project_id)
                .cloned()
                .collect();
            periods.sort_by_key(|p| p.period_number);
            Ok(periods)
        }

        async fn get_project_members(&self, project_id: &str) -> Result<Vec<Member>, StoreError> {
            let data = self.data.lock().unwrap();
            Ok(data
                .members
                .iter()
                .filter(|m| m.project_id == project_id)
                .cloned()
                .collect())
        }

        async fn get_employee_members(&self, employee_id: &str) -> Result<Vec<Member>, StoreError> {
            let data = self.data.lock().unwrap();
            Ok(data
                .members
                .iter()
                .filter(|m| m.employee_id == employee_id)
                .cloned()
                .collect())
        }

        async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
            let data = self.data.lock().unwrap();
            Ok(data.employees.iter().find(|e| e.id == employee_id).cloned())
        }

        async fn get_evidence_items(
            &self,
            project_id: &str,
            category: Option<CostCategory>,
        ) -> Result<Vec<EvidenceItem>, StoreError> {
            let data = self.data.lock().unwrap();
            let periods: BTreeSet<&str> = data
                .budgets
                .iter()
                .filter(|b| b.project_id == project_id)
                .map(|b| b.id.as_str())
                .collect();
            Ok(data
                .evidence
                .iter()
                .filter(|e| periods.contains(e.period_id.as_str()))
                .filter(|e| category.is_none_or(|c| e.category == c))
                .cloned()
                .collect())
        }

        async fn get_active_projects(&self) -> Result<Vec<Project>, StoreError> {
            let data = self.data.lock().unwrap();
            Ok(data
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .cloned()
                .collect())
        }
    }

    impl FixWriter for MemoryStore {
        type Tx = MemoryTransaction;

        async fn begin(&self, _project_id: &str) -> Result<Self::Tx, StoreError> {
            if let Some(id) = self.stale_on_begin.lock().unwrap().take() {
                let mut data = self.data.lock().unwrap();
                data.members.iter_mut().filter(|m| m.id == id).for_each(|m| m.version += 1);
                data.budgets.iter_mut().filter(|b| b.id == id).for_each(|b| b.version += 1);
                data.projects.iter_mut().filter(|p| p.id == id).for_each(|p| p.version += 1);
            }
            let staged = self.data.lock().unwrap().clone();
            Ok(MemoryTransaction {
                target: Arc::clone(&self.data),
                staged,
                failing_writes: Arc::clone(&self.failing_writes),
            })
        }
    }

    /// Writes go to a staged copy; commit swaps it in.
    pub struct MemoryTransaction {
        target: Arc<Mutex<Dataset>>,
        staged: Dataset,
        failing_writes: Arc<Mutex<BTreeSet<String>>>,
    }

    impl MemoryTransaction {
        fn guard(
            &self,
            entity_type: EntityType,
            id: &str,
            found: Option<i64>,
            expected_version: i64,
        ) -> Result<(), StoreError> {
            if self.failing_writes.lock().unwrap().contains(id) {
                return Err(StoreError::Backend(format!("injected write failure for {id}")));
            }
            if found != Some(expected_version) {
                return Err(StoreError::Conflict {
                    entity_type,
                    id: id.into(),
                    expected_version,
                });
            }
            Ok(())
        }
    }

    impl FixTransaction for MemoryTransaction {
        async fn set_participation_rate(
            &mut self,
            member_id: &str,
            expected_version: i64,
            rate: f64,
        ) -> Result<(), StoreError> {
            let found = self.staged.members.iter().find(|m| m.id == member_id).map(|m| m.version);
            self.guard(EntityType::Member, member_id, found, expected_version)?;
            for m in self.staged.members.iter_mut().filter(|m| m.id == member_id) {
                m.participation_rate = rate;
                m.version += 1;
            }
            Ok(())
        }

        async fn set_period_personnel_cost(
            &mut self,
            period_id: &str,
            expected_version: i64,
            amount: Money,
        ) -> Result<(), StoreError> {
            let found = self.staged.budgets.iter().find(|b| b.id == period_id).map(|b| b.version);
            self.guard(EntityType::BudgetPeriod, period_id, found, expected_version)?;
            for b in self.staged.budgets.iter_mut().filter(|b| b.id == period_id) {
                b.personnel = b.split_personnel(amount);
                b.version += 1;
            }
            Ok(())
        }

        async fn set_project_declared_total(
            &mut self,
            project_id: &str,
            expected_version: i64,
            amount: Money,
        ) -> Result<(), StoreError> {
            let found = self.staged.projects.iter().find(|p| p.id == project_id).map(|p| p.version);
            self.guard(EntityType::Project, project_id, found, expected_version)?;
            for p in self.staged.projects.iter_mut().filter(|p| p.id == project_id) {
                p.declared_total_budget = amount;
                p.version += 1;
            }
            Ok(())
        }

        async fn commit(self) -> Result<(), StoreError> {
            *self.target.lock().unwrap() = self.staged;
            Ok(())
        }

        async fn rollback(self) -> Result<(), StoreError> {
            Ok(())
        }
    }
}
