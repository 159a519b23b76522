mod records;
mod tables;

pub use records::read_expense_csv;
