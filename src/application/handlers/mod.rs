//! Command and query handlers, one module per resource.

pub mod question;
