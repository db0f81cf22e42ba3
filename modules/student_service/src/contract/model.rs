//! Contract models for student service
//!
//! These models are transport-agnostic and used across the module layers.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Identity performing a mutating operation.
///
/// Authentication happens upstream; the gateway hands us an already
/// resolved user id. Operations without one are attributed to the
/// `SYSTEM` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// System-initiated change (batch jobs, seeds, unattributed requests)
    System,
    /// A resolved platform user
    User(Uuid),
}

impl Actor {
    /// Audit-field representation of the actor
    pub fn audit_id(&self) -> String {
        match self {
            Actor::System => "SYSTEM".to_string(),
            Actor::User(id) => id.to_string(),
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Actor::System
    }
}

/// Student gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Religion as registered in the national student registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Religion {
    Islam,
    Kristen,
    Katolik,
    Hindu,
    Buddha,
    Konghucu,
}

impl Religion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Religion::Islam => "ISLAM",
            Religion::Kristen => "KRISTEN",
            Religion::Katolik => "KATOLIK",
            Religion::Hindu => "HINDU",
            Religion::Buddha => "BUDDHA",
            Religion::Konghucu => "KONGHUCU",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ISLAM" => Some(Religion::Islam),
            "KRISTEN" => Some(Religion::Kristen),
            "KATOLIK" => Some(Religion::Katolik),
            "HINDU" => Some(Religion::Hindu),
            "BUDDHA" => Some(Religion::Buddha),
            "KONGHUCU" => Some(Religion::Konghucu),
            _ => None,
        }
    }
}

/// Blood type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodType {
    A,
    B,
    Ab,
    O,
}

impl BloodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::A => "A",
            BloodType::B => "B",
            BloodType::Ab => "AB",
            BloodType::O => "O",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(BloodType::A),
            "B" => Some(BloodType::B),
            "AB" => Some(BloodType::Ab),
            "O" => Some(BloodType::O),
            _ => None,
        }
    }
}

/// Student lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Transferred,
    DroppedOut,
    Suspended,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
            StudentStatus::Graduated => "GRADUATED",
            StudentStatus::Transferred => "TRANSFERRED",
            StudentStatus::DroppedOut => "DROPPED_OUT",
            StudentStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(StudentStatus::Active),
            "INACTIVE" => Some(StudentStatus::Inactive),
            "GRADUATED" => Some(StudentStatus::Graduated),
            "TRANSFERRED" => Some(StudentStatus::Transferred),
            "DROPPED_OUT" => Some(StudentStatus::DroppedOut),
            "SUSPENDED" => Some(StudentStatus::Suspended),
            _ => None,
        }
    }
}

/// Student record
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: Uuid,
    /// Platform user backing this student
    pub user_id: Uuid,
    /// 10-digit national student id
    pub nisn: String,
    /// Institution-local student id
    pub nis: Option<String>,
    pub name: String,
    pub nickname: Option<String>,
    /// Enrolled class
    pub class_id: Uuid,
    /// Class snapshot captured at enrollment time; not kept live-synced
    pub class_name: String,
    pub class_level: String,
    pub class_major: Option<String>,
    pub gender: Gender,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub religion: Religion,
    pub blood_type: Option<BloodType>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub parent_id: Option<Uuid>,
    pub homeroom_teacher_id: Option<Uuid>,
    /// Academic year of enrollment ("YYYY/YYYY")
    pub academic_year: String,
    /// Year of entry ("YYYY")
    pub entry_year: String,
    pub entry_date: NaiveDate,
    pub status: StudentStatus,
    pub positive_points: i32,
    pub negative_points: i32,
    pub total_points: i32,
    /// 1-based rank within the class by total points; tied totals share a rank
    pub current_rank: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: Option<String>,
}

/// Validated input for enrolling a new student
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub user_id: Uuid,
    pub nisn: String,
    pub nis: Option<String>,
    pub name: String,
    pub nickname: Option<String>,
    pub class_id: Uuid,
    pub gender: Gender,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub religion: Religion,
    pub blood_type: Option<BloodType>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub parent_id: Option<Uuid>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub academic_year: String,
    pub entry_year: String,
    pub entry_date: NaiveDate,
}

/// Partial update for a student; `None` fields are left untouched.
///
/// Changing `class_id` does NOT refresh the denormalized class snapshot;
/// the snapshot reflects the class at enrollment time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub class_id: Option<Uuid>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub status: Option<StudentStatus>,
}

/// Listing filter for students
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFilter {
    /// Case-insensitive substring match over name / nisn / nis
    pub search: Option<String>,
    pub class_id: Option<Uuid>,
    pub status: Option<StudentStatus>,
}

/// Offset/limit page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: 25 }
    }
}

/// One page of students plus the unpaged total
#[derive(Debug, Clone, PartialEq)]
pub struct StudentPage {
    pub items: Vec<Student>,
    pub total: u64,
}

/// Student with its class and recent point history, for the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDetail {
    pub student: Student,
    pub class: Option<Class>,
    /// Latest point-affecting events, newest first
    pub points_history: Vec<PointsEntry>,
}

/// Class roster record
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Uuid,
    /// Human code, e.g. "X-IPA-1"; unique together with `academic_year`
    pub code: String,
    pub name: String,
    /// Grade level: "10", "11" or "12"
    pub level: String,
    pub major: Option<String>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub capacity: i32,
    /// Live count of active enrolled students
    pub current_total: i32,
    pub academic_year: String,
    pub room_number: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: Option<String>,
}

/// Validated input for creating a class
#[derive(Debug, Clone, PartialEq)]
pub struct NewClass {
    pub code: String,
    pub name: String,
    pub level: String,
    pub major: Option<String>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub capacity: i32,
    pub academic_year: String,
    pub room_number: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
}

/// Partial update for a class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassUpdate {
    pub name: Option<String>,
    pub major: Option<String>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub room_number: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
}

/// Listing filter for classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassFilter {
    pub academic_year: Option<String>,
    pub level: Option<String>,
}

/// Roster line in the class detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: Uuid,
    pub nisn: String,
    pub name: String,
    pub total_points: i32,
}

/// Class with the brief roster of its active students
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDetail {
    pub class: Class,
    pub students: Vec<RosterEntry>,
}

/// Academic year record
#[derive(Debug, Clone, PartialEq)]
pub struct AcademicYear {
    pub id: Uuid,
    /// Unique year string, "YYYY/YYYY"
    pub year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester1_start: NaiveDate,
    pub semester1_end: NaiveDate,
    pub semester2_start: NaiveDate,
    pub semester2_end: NaiveDate,
    /// At most one year is active at any time
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an academic year
#[derive(Debug, Clone, PartialEq)]
pub struct NewAcademicYear {
    pub year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester1_start: NaiveDate,
    pub semester1_end: NaiveDate,
    pub semester2_start: NaiveDate,
    pub semester2_end: NaiveDate,
    pub is_active: bool,
}

/// Kind of a point-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsKind {
    Violation,
    Achievement,
}

impl PointsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointsKind::Violation => "VIOLATION",
            PointsKind::Achievement => "ACHIEVEMENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VIOLATION" => Some(PointsKind::Violation),
            "ACHIEVEMENT" => Some(PointsKind::Achievement),
            _ => None,
        }
    }
}

/// One entry of the per-student point log (read-only here)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsEntry {
    pub id: Uuid,
    pub student_id: Uuid,
    pub points: i32,
    pub kind: PointsKind,
    pub description: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub recorded_by: String,
}

/// Outcome of a batch points sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Students whose points and rank were recomputed
    pub synced: u32,
    /// Students skipped after a per-student failure
    pub failed: u32,
}

// ===== Peer views (consolidated profile) =====

/// Live schedule status of a class, as reported by the schedule peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStatus {
    pub status: String,
    pub lesson: Option<String>,
}

/// Point event reported by the violation/achievement peers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointEvent {
    pub id: Option<Uuid>,
    /// Magnitude of the event; summed during points sync
    pub points: i32,
    pub description: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Class-status section of the consolidated profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitoring {
    pub current_class_status: String,
    pub active_lesson: Option<String>,
}

impl Default for Monitoring {
    fn default() -> Self {
        Self {
            current_class_status: "UNKNOWN".to_string(),
            active_lesson: None,
        }
    }
}

/// Violations/achievements section of the consolidated profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsSection {
    pub total_points: i32,
    /// Latest events (at most 5), empty when the peer was unreachable
    pub latest: Vec<PointEvent>,
}

/// Best-effort aggregate view over the student's own record and the
/// schedule/violation/achievement peers
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedProfile {
    pub profile: Student,
    pub class: Option<Class>,
    pub monitoring: Monitoring,
    pub violations: PointsSection,
    pub achievements: PointsSection,
}
