pub mod employee;
pub mod employee_rubric;
pub mod payroll;
pub mod receipt;
pub mod receipt_type;
pub mod rubric;

// Re-export all repositories for easy importing
pub use employee::EmployeeRepository;
pub use employee_rubric::EmployeeRubricRepository;
pub use payroll::PayrollRepository;
pub use receipt::ReceiptRepository;
pub use receipt_type::ReceiptTypeRepository;
pub use rubric::RubricRepository;
