//! Mapper implementations for converting between DTOs and contract models
//!
//! Response conversions are infallible; request conversions validate
//! the enum-like string fields and fail with the first violated rule.

use super::dto::*;
use crate::contract::{self, StudentsError};

fn invalid(message: impl Into<String>) -> StudentsError {
    StudentsError::Validation {
        message: message.into(),
    }
}

// ===== Student conversions =====

impl From<contract::Student> for StudentDto {
    fn from(student: contract::Student) -> Self {
        Self {
            id: student.id,
            user_id: student.user_id,
            nisn: student.nisn,
            nis: student.nis,
            name: student.name,
            nickname: student.nickname,
            class_id: student.class_id,
            class_name: student.class_name,
            class_level: student.class_level,
            class_major: student.class_major,
            gender: student.gender.as_str().to_string(),
            birth_place: student.birth_place,
            birth_date: student.birth_date,
            religion: student.religion.as_str().to_string(),
            blood_type: student.blood_type.map(|b| b.as_str().to_string()),
            address: student.address,
            city: student.city,
            province: student.province,
            phone: student.phone,
            email: student.email,
            photo_url: student.photo_url,
            parent_id: student.parent_id,
            homeroom_teacher_id: student.homeroom_teacher_id,
            academic_year: student.academic_year,
            entry_year: student.entry_year,
            entry_date: student.entry_date,
            status: student.status.as_str().to_string(),
            positive_points: student.positive_points,
            negative_points: student.negative_points,
            total_points: student.total_points,
            current_rank: student.current_rank,
            is_active: student.is_active,
            created_at: student.created_at,
            updated_at: student.updated_at,
            created_by: student.created_by,
            updated_by: student.updated_by,
        }
    }
}

impl TryFrom<CreateStudentRequest> for contract::NewStudent {
    type Error = StudentsError;

    fn try_from(req: CreateStudentRequest) -> Result<Self, Self::Error> {
        let gender = contract::Gender::parse(&req.gender)
            .ok_or_else(|| invalid("gender must be one of MALE, FEMALE"))?;
        let religion = contract::Religion::parse(&req.religion).ok_or_else(|| {
            invalid("religion must be one of ISLAM, KRISTEN, KATOLIK, HINDU, BUDDHA, KONGHUCU")
        })?;
        let blood_type = match req.blood_type.as_deref() {
            Some(value) => Some(
                contract::BloodType::parse(value)
                    .ok_or_else(|| invalid("bloodType must be one of A, B, AB, O"))?,
            ),
            None => None,
        };

        Ok(Self {
            user_id: req.user_id,
            nisn: req.nisn,
            nis: req.nis,
            name: req.name,
            nickname: req.nickname,
            class_id: req.class_id,
            gender,
            birth_place: req.birth_place,
            birth_date: req.birth_date,
            religion,
            blood_type,
            address: req.address,
            city: req.city,
            province: req.province,
            phone: req.phone,
            email: req.email,
            parent_id: req.parent_id,
            homeroom_teacher_id: req.homeroom_teacher_id,
            academic_year: req.academic_year,
            entry_year: req.entry_year,
            entry_date: req.entry_date,
        })
    }
}

impl TryFrom<UpdateStudentRequest> for contract::StudentUpdate {
    type Error = StudentsError;

    fn try_from(req: UpdateStudentRequest) -> Result<Self, Self::Error> {
        let status = match req.status.as_deref() {
            Some(value) => Some(contract::StudentStatus::parse(value).ok_or_else(|| {
                invalid(
                    "status must be one of ACTIVE, INACTIVE, GRADUATED, TRANSFERRED, \
                     DROPPED_OUT, SUSPENDED",
                )
            })?),
            None => None,
        };

        Ok(Self {
            name: req.name,
            nickname: req.nickname,
            class_id: req.class_id,
            phone: req.phone,
            email: req.email,
            address: req.address,
            photo_url: req.photo_url,
            status,
        })
    }
}

impl From<contract::PointsEntry> for PointsEntryDto {
    fn from(entry: contract::PointsEntry) -> Self {
        Self {
            id: entry.id,
            student_id: entry.student_id,
            points: entry.points,
            kind: entry.kind.as_str().to_string(),
            description: entry.description,
            recorded_at: entry.recorded_at,
            recorded_by: entry.recorded_by,
        }
    }
}

impl From<contract::StudentDetail> for StudentDetailResponse {
    fn from(detail: contract::StudentDetail) -> Self {
        Self {
            student: detail.student.into(),
            class: detail.class.map(Into::into),
            points_history: detail.points_history.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Class conversions =====

impl From<contract::Class> for ClassDto {
    fn from(class: contract::Class) -> Self {
        Self {
            id: class.id,
            code: class.code,
            name: class.name,
            level: class.level,
            major: class.major,
            homeroom_teacher_id: class.homeroom_teacher_id,
            capacity: class.capacity,
            current_total: class.current_total,
            academic_year: class.academic_year,
            room_number: class.room_number,
            floor: class.floor,
            building: class.building,
            is_active: class.is_active,
            created_at: class.created_at,
            updated_at: class.updated_at,
            created_by: class.created_by,
            updated_by: class.updated_by,
        }
    }
}

impl From<CreateClassRequest> for contract::NewClass {
    fn from(req: CreateClassRequest) -> Self {
        Self {
            // Codes are case-insensitive natural keys; store them uppercased
            code: req.code.trim().to_uppercase(),
            name: req.name,
            level: req.level,
            major: req.major,
            homeroom_teacher_id: req.homeroom_teacher_id,
            capacity: req.capacity,
            academic_year: req.academic_year,
            room_number: req.room_number,
            floor: req.floor,
            building: req.building,
        }
    }
}

impl From<UpdateClassRequest> for contract::ClassUpdate {
    fn from(req: UpdateClassRequest) -> Self {
        Self {
            name: req.name,
            major: req.major,
            homeroom_teacher_id: req.homeroom_teacher_id,
            capacity: req.capacity,
            room_number: req.room_number,
            floor: req.floor,
            building: req.building,
        }
    }
}

impl From<contract::RosterEntry> for RosterEntryDto {
    fn from(entry: contract::RosterEntry) -> Self {
        Self {
            id: entry.id,
            nisn: entry.nisn,
            name: entry.name,
            total_points: entry.total_points,
        }
    }
}

impl From<contract::ClassDetail> for ClassDetailResponse {
    fn from(detail: contract::ClassDetail) -> Self {
        Self {
            class: detail.class.into(),
            students: detail.students.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Academic year conversions =====

impl From<contract::AcademicYear> for AcademicYearDto {
    fn from(year: contract::AcademicYear) -> Self {
        Self {
            id: year.id,
            year: year.year,
            start_date: year.start_date,
            end_date: year.end_date,
            semester1_start: year.semester1_start,
            semester1_end: year.semester1_end,
            semester2_start: year.semester2_start,
            semester2_end: year.semester2_end,
            is_active: year.is_active,
            created_at: year.created_at,
            updated_at: year.updated_at,
        }
    }
}

impl From<CreateAcademicYearRequest> for contract::NewAcademicYear {
    fn from(req: CreateAcademicYearRequest) -> Self {
        Self {
            year: req.year,
            start_date: req.start_date,
            end_date: req.end_date,
            semester1_start: req.semester1_start,
            semester1_end: req.semester1_end,
            semester2_start: req.semester2_start,
            semester2_end: req.semester2_end,
            is_active: req.is_active,
        }
    }
}

// ===== Points sync conversions =====

impl From<contract::SyncSummary> for SyncSummaryDto {
    fn from(summary: contract::SyncSummary) -> Self {
        Self {
            synced: summary.synced,
            failed: summary.failed,
        }
    }
}

// ===== Consolidated profile conversions =====

impl From<contract::Monitoring> for MonitoringDto {
    fn from(monitoring: contract::Monitoring) -> Self {
        Self {
            current_class_status: monitoring.current_class_status,
            active_lesson: monitoring.active_lesson,
        }
    }
}

impl From<contract::PointEvent> for PointEventDto {
    fn from(event: contract::PointEvent) -> Self {
        Self {
            id: event.id,
            points: event.points,
            description: event.description,
            recorded_at: event.recorded_at,
        }
    }
}

impl From<contract::PointsSection> for PointsSectionDto {
    fn from(section: contract::PointsSection) -> Self {
        Self {
            total_points: section.total_points,
            latest: section.latest.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::ConsolidatedProfile> for ConsolidatedProfileResponse {
    fn from(profile: contract::ConsolidatedProfile) -> Self {
        Self {
            profile: profile.profile.into(),
            class: profile.class.map(Into::into),
            monitoring: profile.monitoring.into(),
            violations: profile.violations.into(),
            achievements: profile.achievements.into(),
        }
    }
}
