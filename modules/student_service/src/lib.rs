//! Student Service Module
//!
//! CRUD service for student records, class rosters and academic-year
//! metadata, plus a best-effort consolidated profile aggregated from
//! the schedule, violation and achievement peers.

// Public exports
pub mod contract;
pub use contract::{
    AcademicYear, Actor, Class, ConsolidatedProfile, Student, StudentsError,
};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
