//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs
//!
//! Operations that must touch two tables atomically (enroll, withdraw,
//! year activation) are modeled as single repository calls so that an
//! implementation can wrap them in one database transaction.

use crate::contract::{
    AcademicYear, Class, ClassFilter, ClassUpdate, Page, PointsEntry, RosterEntry, Student,
    StudentFilter, StudentPage, StudentUpdate,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for students
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a new student and increment the owning class's
    /// `current_total`, both in one transaction.
    async fn insert_enrolled(&self, student: &Student) -> Result<Student>;

    /// Find a live (non-deleted) student by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>>;

    /// Find a student by id including soft-deleted rows (audit access)
    async fn find_any_by_id(&self, id: Uuid) -> Result<Option<Student>>;

    /// List live students matching the filter, ordered by name ascending
    async fn list(&self, filter: &StudentFilter, page: Page) -> Result<StudentPage>;

    /// Partial update; returns None when the student is absent or deleted
    async fn update(
        &self,
        id: Uuid,
        update: &StudentUpdate,
        updated_by: &str,
    ) -> Result<Option<Student>>;

    /// Soft-delete the student and decrement the owning class's
    /// `current_total`, both in one transaction.
    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> Result<()>;

    /// Persist recomputed point totals
    async fn set_points(&self, id: Uuid, positive: i32, negative: i32, total: i32) -> Result<()>;

    /// Persist a recomputed class rank
    async fn set_rank(&self, id: Uuid, rank: i32) -> Result<()>;

    /// Count live, active classmates with strictly greater total points
    async fn count_outranking(&self, class_id: Uuid, total_points: i32) -> Result<u64>;

    /// Ids of every active, non-deleted student (batch sync sweep)
    async fn list_active_ids(&self) -> Result<Vec<Uuid>>;

    /// Brief roster of a class's live students
    async fn roster(&self, class_id: Uuid) -> Result<Vec<RosterEntry>>;

    /// Latest point-history entries for a student, newest first
    async fn latest_points_history(&self, student_id: Uuid, limit: u64)
        -> Result<Vec<PointsEntry>>;
}

/// Repository for classes
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Persist a new class
    async fn insert(&self, class: &Class) -> Result<Class>;

    /// Find a live (non-deleted) class by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>>;

    /// Find a live class by its compound natural key
    async fn find_by_code_and_year(&self, code: &str, academic_year: &str)
        -> Result<Option<Class>>;

    /// List live classes matching the filter, ordered by code ascending
    async fn list(&self, filter: &ClassFilter) -> Result<Vec<Class>>;

    /// Partial update; returns None when the class is absent or deleted
    async fn update(
        &self,
        id: Uuid,
        update: &ClassUpdate,
        updated_by: &str,
    ) -> Result<Option<Class>>;

    /// Soft-delete; returns false when the class is absent or already deleted
    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> Result<bool>;
}

/// Repository for academic years
#[async_trait]
pub trait AcademicYearRepository: Send + Sync {
    /// Persist a new academic year
    async fn insert(&self, year: &AcademicYear) -> Result<AcademicYear>;

    /// Find by the unique year string
    async fn find_by_year(&self, year: &str) -> Result<Option<AcademicYear>>;

    /// The single active year, when one exists
    async fn find_active(&self) -> Result<Option<AcademicYear>>;

    /// All years, newest first
    async fn list_all(&self) -> Result<Vec<AcademicYear>>;

    /// Deactivate every year and activate the target, in one
    /// transaction. Returns None (with nothing changed) when the target
    /// id does not exist.
    async fn set_active(&self, id: Uuid) -> Result<Option<AcademicYear>>;
}
