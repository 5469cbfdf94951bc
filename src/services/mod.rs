pub mod batch;
pub mod calculator;
pub mod receipts;
pub mod rubrics;
pub mod taxes;

pub use batch::build_payroll;
pub use calculator::{calculate_payroll, derive_totals, validate_payroll, validate_period};
pub use taxes::auto_calculate_taxes;
