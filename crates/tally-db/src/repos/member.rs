//! Participation record repository.

use tally_core::entities::Member;

use crate::error::DatabaseError;
use crate::helpers::{format_date, parse_date, parse_enum};
use crate::service::TallyService;

const SELECT_COLS: &str = "id, project_id, employee_id, role, participation_rate, \
     start_date, end_date, monthly_amount, status, version";

fn row_to_member(row: &libsql::Row) -> Result<Member, DatabaseError> {
    Ok(Member {
        id: row.get(0)?,
        project_id: row.get(1)?,
        employee_id: row.get(2)?,
        role: row.get(3)?,
        participation_rate: row.get(4)?,
        start_date: parse_date(&row.get::<String>(5)?)?,
        end_date: parse_date(&row.get::<String>(6)?)?,
        monthly_amount: row.get(7)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        version: row.get(9)?,
    })
}

pub(crate) async fn insert_member(
    conn: &libsql::Connection,
    member: &Member,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO project_members ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ),
        libsql::params![
            member.id.as_str(),
            member.project_id.as_str(),
            member.employee_id.as_str(),
            member.role.as_str(),
            member.participation_rate,
            format_date(member.start_date),
            format_date(member.end_date),
            member.monthly_amount,
            member.status.as_str(),
            member.version
        ],
    )
    .await?;
    Ok(())
}

impl TallyService {
    pub async fn create_member(&self, member: &Member) -> Result<(), DatabaseError> {
        insert_member(self.db().conn(), member).await
    }

    pub async fn get_member(&self, id: &str) -> Result<Member, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM project_members WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_member(&row)
    }

    /// All participation records of a project, ordered by start date then id.
    pub async fn list_project_members(&self, project_id: &str) -> Result<Vec<Member>, DatabaseError> {
        self.query_members("project_id", project_id).await
    }

    /// Every participation record of one employee, across all projects.
    pub async fn list_employee_members(
        &self,
        employee_id: &str,
    ) -> Result<Vec<Member>, DatabaseError> {
        self.query_members("employee_id", employee_id).await
    }

    async fn query_members(&self, column: &str, value: &str) -> Result<Vec<Member>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM project_members
                     WHERE {column} = ?1 ORDER BY start_date, id"
                ),
                [value],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }
}
