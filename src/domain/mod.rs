pub mod criteria;
pub mod notice;
pub mod query;
pub mod types;
