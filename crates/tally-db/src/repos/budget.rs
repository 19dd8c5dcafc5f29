//! Budget period repository.

use tally_core::entities::{BudgetPeriod, CategoryAmount};

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_u32, parse_date};
use crate::service::TallyService;

const SELECT_COLS: &str = "id, project_id, period_number, start_date, end_date, \
     personnel_cash, personnel_in_kind, research_material_cash, research_material_in_kind, \
     research_activity_cash, research_activity_in_kind, indirect_cash, indirect_in_kind, \
     spent_amount, version";

fn amount(row: &libsql::Row, cash_idx: i32) -> Result<CategoryAmount, DatabaseError> {
    Ok(CategoryAmount {
        cash: row.get(cash_idx)?,
        in_kind: row.get(cash_idx + 1)?,
    })
}

fn row_to_period(row: &libsql::Row) -> Result<BudgetPeriod, DatabaseError> {
    Ok(BudgetPeriod {
        id: row.get(0)?,
        project_id: row.get(1)?,
        period_number: get_u32(row, 2)?,
        start_date: parse_date(&row.get::<String>(3)?)?,
        end_date: parse_date(&row.get::<String>(4)?)?,
        personnel: amount(row, 5)?,
        research_material: amount(row, 7)?,
        research_activity: amount(row, 9)?,
        indirect: amount(row, 11)?,
        spent_amount: row.get(13)?,
        version: row.get(14)?,
    })
}

pub(crate) async fn insert_period(
    conn: &libsql::Connection,
    period: &BudgetPeriod,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO project_budgets ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ),
        libsql::params![
            period.id.as_str(),
            period.project_id.as_str(),
            i64::from(period.period_number),
            format_date(period.start_date),
            format_date(period.end_date),
            period.personnel.cash,
            period.personnel.in_kind,
            period.research_material.cash,
            period.research_material.in_kind,
            period.research_activity.cash,
            period.research_activity.in_kind,
            period.indirect.cash,
            period.indirect.in_kind,
            period.spent_amount,
            period.version
        ],
    )
    .await?;
    Ok(())
}

impl TallyService {
    pub async fn create_budget_period(&self, period: &BudgetPeriod) -> Result<(), DatabaseError> {
        insert_period(self.db().conn(), period).await
    }

    /// All periods of a project, ordered by period number.
    pub async fn list_budget_periods(
        &self,
        project_id: &str,
    ) -> Result<Vec<BudgetPeriod>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_budgets
                     WHERE project_id = ?1 ORDER BY period_number"
                ),
                [project_id],
            )
            .await?;
        let mut periods = Vec::new();
        while let Some(row) = rows.next().await? {
            periods.push(row_to_period(&row)?);
        }
        Ok(periods)
    }

    pub async fn get_budget_period(&self, id: &str) -> Result<BudgetPeriod, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM project_budgets WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_period(&row)
    }
}
