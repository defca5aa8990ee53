//! HTTP adapters - REST API implementations.

pub mod question;

pub use question::question_routes;
pub use question::QuestionHandlers;
