//! Project repository.

use tally_core::entities::Project;
use tally_core::enums::ProjectStatus;

use crate::error::DatabaseError;
use crate::helpers::{format_date, parse_date, parse_enum};
use crate::service::TallyService;

const SELECT_COLS: &str =
    "id, title, declared_total_budget, status, start_date, end_date, version";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        declared_total_budget: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        start_date: parse_date(&row.get::<String>(4)?)?,
        end_date: parse_date(&row.get::<String>(5)?)?,
        version: row.get(6)?,
    })
}

pub(crate) async fn insert_project(
    conn: &libsql::Connection,
    project: &Project,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO projects ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            project.id.as_str(),
            project.title.as_str(),
            project.declared_total_budget,
            project.status.as_str(),
            format_date(project.start_date),
            format_date(project.end_date),
            project.version
        ],
    )
    .await?;
    Ok(())
}

impl TallyService {
    pub async fn create_project(&self, project: &Project) -> Result<(), DatabaseError> {
        insert_project(self.db().conn(), project).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Projects with the given status, ordered by id.
    pub async fn list_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE status = ?1 ORDER BY id"),
                [status.as_str()],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }
}
