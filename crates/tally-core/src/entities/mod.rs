//! Entity structs for the project-finance records Tally validates.
//!
//! Each entity maps to a table owned by the surrounding CRUD layer. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema validation of imported datasets.

mod budget;
mod employee;
mod evidence;
mod member;
mod project;

pub use budget::{BudgetPeriod, CategoryAmount};
pub use employee::Employee;
pub use evidence::EvidenceItem;
pub use member::Member;
pub use project::Project;
