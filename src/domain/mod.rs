//! Domain types shared by the notes services, repository and templates.

pub mod note;
pub mod query;
pub mod types;
