pub mod employees;
pub mod payrolls;
pub mod receipts;
pub mod rubrics;
pub mod shared;
