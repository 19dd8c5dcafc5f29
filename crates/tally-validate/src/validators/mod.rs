//! The five built-in validators.
//!
//! | validator | sub-check counted per | auto-fix |
//! |-----------|-----------------------|----------|
//! | participation rate | project participation record | clamp single over-limit record |
//! | employment period | member and personnel evidence item | none |
//! | personnel cost | budget period | overwrite declared personnel cost |
//! | budget consistency | project | overwrite declared total |
//! | usage rate | budget period | none |

mod budget;
mod employment;
mod participation;
mod personnel_cost;
mod usage;

pub use budget::BudgetConsistencyValidator;
pub use employment::EmploymentPeriodValidator;
pub use participation::{ParticipationRateValidator, classify, summarize};
pub use personnel_cost::{PersonnelCostValidator, record_cost};
pub use usage::{UsageRateValidator, usage_ratio};

/// Format a percentage for messages: `110`, `99.5`.
fn percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}
