pub mod composition;
pub mod criteria;
pub mod list;
pub mod notice;
pub mod orchestrator;
pub mod result_view;

pub use list::NoticeListService;
pub use orchestrator::{ListEvent, PendingQuery, QueryOrchestrator, Reconciliation, Trigger};
