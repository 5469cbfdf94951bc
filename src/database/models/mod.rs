pub mod employee;
pub mod payroll;
pub mod receipt;
pub mod rubric;

// Re-export all models for easy importing
pub use employee::*;
pub use payroll::*;
pub use receipt::*;
pub use rubric::*;
