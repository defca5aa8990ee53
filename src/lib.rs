//! Pollbox - Poll-Taking Backend
//!
//! Questions with free-text bodies own ordered sets of choices carrying
//! vote tallies. Updating a question reconciles a submitted choice list
//! against stored state: entries matched by id update in place, unmatched
//! entries create, and stored choices absent from the submission are
//! deleted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
