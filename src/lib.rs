pub mod input;
pub mod loan;
pub mod report;
pub mod session;
