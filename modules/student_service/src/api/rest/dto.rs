//! REST DTOs with serde derives for HTTP API
//!
//! Wire names are camelCase to match the platform's API conventions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Student DTOs =====

/// Student response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 10-digit national student id
    #[schema(example = "0051234567")]
    pub nisn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nis: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub class_id: Uuid,
    pub class_name: String,
    pub class_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_major: Option<String>,
    #[schema(example = "MALE")]
    pub gender: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    #[schema(example = "ISLAM")]
    pub religion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeroom_teacher_id: Option<Uuid>,
    #[schema(example = "2024/2025")]
    pub academic_year: String,
    pub entry_year: String,
    pub entry_date: NaiveDate,
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub positive_points: i32,
    pub negative_points: i32,
    pub total_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_rank: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Student creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub user_id: Uuid,
    pub nisn: String,
    pub nis: Option<String>,
    pub name: String,
    pub nickname: Option<String>,
    pub class_id: Uuid,
    /// MALE or FEMALE
    pub gender: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub religion: String,
    pub blood_type: Option<String>,
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

/// Partial student update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub class_id: Option<Uuid>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub status: Option<String>,
}

/// Pagination block of list responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Paged list of students
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    pub items: Vec<StudentDto>,
    pub pagination: PaginationDto,
}

/// Point history entry DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsEntryDto {
    pub id: Uuid,
    pub student_id: Uuid,
    pub points: i32,
    #[schema(example = "VIOLATION")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub recorded_by: String,
}

/// Student detail: the record plus its class and recent point history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub student: StudentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassDto>,
    pub points_history: Vec<PointsEntryDto>,
}

// ===== Class DTOs =====

/// Class response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
    pub id: Uuid,
    #[schema(example = "X-IPA-1")]
    pub code: String,
    pub name: String,
    #[schema(example = "10")]
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeroom_teacher_id: Option<Uuid>,
    pub capacity: i32,
    pub current_total: i32,
    #[schema(example = "2024/2025")]
    pub academic_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

fn default_capacity() -> i32 {
    36
}

/// Class creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub code: String,
    pub name: String,
    pub level: String,
    pub major: Option<String>,
    pub homeroom_teacher_id: Option<Uuid>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    pub academic_year: String,
    pub room_number: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
}

/// Partial class update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub major: Option<String>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub room_number: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
}

/// Brief roster line of the class detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryDto {
    pub id: Uuid,
    pub nisn: String,
    pub name: String,
    pub total_points: i32,
}

/// Class detail: the record plus its active roster
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    pub class: ClassDto,
    pub students: Vec<RosterEntryDto>,
}

// ===== Academic Year DTOs =====

/// Academic year response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearDto {
    pub id: Uuid,
    #[schema(example = "2024/2025")]
    pub year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester1_start: NaiveDate,
    pub semester1_end: NaiveDate,
    pub semester2_start: NaiveDate,
    pub semester2_end: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Academic year creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAcademicYearRequest {
    pub year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester1_start: NaiveDate,
    pub semester1_end: NaiveDate,
    pub semester2_start: NaiveDate,
    pub semester2_end: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

// ===== Points Sync DTOs =====

/// Batch sweep outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummaryDto {
    pub synced: u32,
    pub failed: u32,
}

// ===== Consolidated Profile DTOs =====

/// Class-status section of the consolidated profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringDto {
    #[schema(example = "IN_CLASS")]
    pub current_class_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_lesson: Option<String>,
}

/// Peer point event in the consolidated profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointEventDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Violations/achievements section of the consolidated profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsSectionDto {
    pub total_points: i32,
    pub latest: Vec<PointEventDto>,
}

/// Best-effort consolidated profile response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedProfileResponse {
    pub profile: StudentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassDto>,
    pub monitoring: MonitoringDto,
    pub violations: PointsSectionDto,
    pub achievements: PointsSectionDto,
}
