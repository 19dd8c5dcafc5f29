//! Evidence item repository.

use tally_core::entities::EvidenceItem;
use tally_core::enums::CostCategory;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_date, parse_enum};
use crate::service::TallyService;

const SELECT_COLS: &str =
    "e.id, e.period_id, e.title, e.category, e.assignee_id, e.spent_amount, e.due_date";

fn row_to_evidence(row: &libsql::Row) -> Result<EvidenceItem, DatabaseError> {
    Ok(EvidenceItem {
        id: row.get(0)?,
        period_id: row.get(1)?,
        title: row.get(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        assignee_id: get_opt_string(row, 4)?,
        spent_amount: row.get(5)?,
        due_date: parse_date(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert_evidence(
    conn: &libsql::Connection,
    item: &EvidenceItem,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO evidence_items
             (id, period_id, title, category, assignee_id, spent_amount, due_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            item.id.as_str(),
            item.period_id.as_str(),
            item.title.as_str(),
            item.category.as_str(),
            item.assignee_id.as_deref(),
            item.spent_amount,
            format_date(item.due_date)
        ],
    )
    .await?;
    Ok(())
}

impl TallyService {
    pub async fn create_evidence(&self, item: &EvidenceItem) -> Result<(), DatabaseError> {
        insert_evidence(self.db().conn(), item).await
    }

    /// Evidence across all periods of a project, optionally one category only.
    pub async fn list_project_evidence(
        &self,
        project_id: &str,
        category: Option<CostCategory>,
    ) -> Result<Vec<EvidenceItem>, DatabaseError> {
        let base = format!(
            "SELECT {SELECT_COLS} FROM evidence_items e
             JOIN project_budgets b ON e.period_id = b.id
             WHERE b.project_id = ?1"
        );
        let mut rows = match category {
            Some(category) => {
                self.db()
                    .conn()
                    .query(
                        &format!("{base} AND e.category = ?2 ORDER BY e.due_date, e.id"),
                        [project_id, category.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(&format!("{base} ORDER BY e.due_date, e.id"), [project_id])
                    .await?
            }
        };
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_evidence(&row)?);
        }
        Ok(items)
    }
}
