//! Storage adapters for [`CustomerDao`](super::dao::CustomerDao).

pub mod sql;
pub mod seaorm;
