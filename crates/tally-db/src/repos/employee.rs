//! Employee repository.

use tally_core::entities::Employee;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_date, parse_enum, parse_optional_date};
use crate::service::TallyService;

const SELECT_COLS: &str = "id, name, hire_date, termination_date, status";

fn row_to_employee(row: &libsql::Row) -> Result<Employee, DatabaseError> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        hire_date: parse_date(&row.get::<String>(2)?)?,
        termination_date: parse_optional_date(get_opt_string(row, 3)?.as_deref())?,
        status: parse_enum(&row.get::<String>(4)?)?,
    })
}

pub(crate) async fn insert_employee(
    conn: &libsql::Connection,
    employee: &Employee,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO employees ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
        libsql::params![
            employee.id.as_str(),
            employee.name.as_str(),
            format_date(employee.hire_date),
            employee.termination_date.map(format_date),
            employee.status.as_str()
        ],
    )
    .await?;
    Ok(())
}

impl TallyService {
    pub async fn create_employee(&self, employee: &Employee) -> Result<(), DatabaseError> {
        insert_employee(self.db().conn(), employee).await
    }

    /// Look up one employee. `None` when no row matches.
    pub async fn find_employee(&self, id: &str) -> Result<Option<Employee>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM employees WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_employee(&row)?)),
            None => Ok(None),
        }
    }
}
