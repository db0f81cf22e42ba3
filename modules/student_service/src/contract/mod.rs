//! Contract layer - public models and errors of the student service
//!
//! This layer contains transport-agnostic models shared by all other
//! layers. NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::StudentsError;
pub use model::{
    AcademicYear, Actor, BloodType, Class, ClassDetail, ClassFilter, ClassUpdate,
    ConsolidatedProfile, Gender, Monitoring, NewAcademicYear, NewClass, NewStudent, Page,
    PointEvent, PointsEntry, PointsKind, PointsSection, Religion, RosterEntry, ScheduleStatus,
    Student, StudentDetail, StudentFilter, StudentPage, StudentStatus, StudentUpdate, SyncSummary,
};
