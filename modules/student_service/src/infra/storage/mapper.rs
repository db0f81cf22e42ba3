//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Enum-like
//! columns are stored as their wire strings; a row with an unknown
//! value fails the conversion instead of being silently coerced.

use crate::contract::{
    AcademicYear, BloodType, Class, Gender, PointsEntry, PointsKind, Religion, Student,
    StudentStatus,
};
use super::entity;
use sea_orm::ActiveValue::Set;

// ===== Student Conversions =====

impl TryFrom<entity::Model> for Student {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&entity.gender)
            .ok_or_else(|| anyhow::anyhow!("unknown gender value: {}", entity.gender))?;
        let religion = Religion::parse(&entity.religion)
            .ok_or_else(|| anyhow::anyhow!("unknown religion value: {}", entity.religion))?;
        let blood_type = match &entity.blood_type {
            Some(value) => Some(
                BloodType::parse(value)
                    .ok_or_else(|| anyhow::anyhow!("unknown blood type value: {}", value))?,
            ),
            None => None,
        };
        let status = StudentStatus::parse(&entity.status)
            .ok_or_else(|| anyhow::anyhow!("unknown student status value: {}", entity.status))?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            nisn: entity.nisn,
            nis: entity.nis,
            name: entity.name,
            nickname: entity.nickname,
            class_id: entity.class_id,
            class_name: entity.class_name,
            class_level: entity.class_level,
            class_major: entity.class_major,
            gender,
            birth_place: entity.birth_place,
            birth_date: entity.birth_date,
            religion,
            blood_type,
            address: entity.address,
            city: entity.city,
            province: entity.province,
            phone: entity.phone,
            email: entity.email,
            photo_url: entity.photo_url,
            parent_id: entity.parent_id,
            homeroom_teacher_id: entity.homeroom_teacher_id,
            academic_year: entity.academic_year,
            entry_year: entity.entry_year,
            entry_date: entity.entry_date,
            status,
            positive_points: entity.positive_points,
            negative_points: entity.negative_points,
            total_points: entity.total_points,
            current_rank: entity.current_rank,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
            created_by: entity.created_by,
            updated_by: entity.updated_by,
        })
    }
}

impl From<&Student> for entity::ActiveModel {
    fn from(model: &Student) -> Self {
        Self {
            id: Set(model.id),
            user_id: Set(model.user_id),
            nisn: Set(model.nisn.clone()),
            nis: Set(model.nis.clone()),
            name: Set(model.name.clone()),
            nickname: Set(model.nickname.clone()),
            class_id: Set(model.class_id),
            class_name: Set(model.class_name.clone()),
            class_level: Set(model.class_level.clone()),
            class_major: Set(model.class_major.clone()),
            gender: Set(model.gender.as_str().to_string()),
            birth_place: Set(model.birth_place.clone()),
            birth_date: Set(model.birth_date),
            religion: Set(model.religion.as_str().to_string()),
            blood_type: Set(model.blood_type.map(|b| b.as_str().to_string())),
            address: Set(model.address.clone()),
            city: Set(model.city.clone()),
            province: Set(model.province.clone()),
            phone: Set(model.phone.clone()),
            email: Set(model.email.clone()),
            photo_url: Set(model.photo_url.clone()),
            parent_id: Set(model.parent_id),
            homeroom_teacher_id: Set(model.homeroom_teacher_id),
            academic_year: Set(model.academic_year.clone()),
            entry_year: Set(model.entry_year.clone()),
            entry_date: Set(model.entry_date),
            status: Set(model.status.as_str().to_string()),
            positive_points: Set(model.positive_points),
            negative_points: Set(model.negative_points),
            total_points: Set(model.total_points),
            current_rank: Set(model.current_rank),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
            deleted_at: Set(model.deleted_at),
            created_by: Set(model.created_by.clone()),
            updated_by: Set(model.updated_by.clone()),
        }
    }
}

// ===== Class Conversions =====

impl From<entity::class::Model> for Class {
    fn from(entity: entity::class::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            level: entity.level,
            major: entity.major,
            homeroom_teacher_id: entity.homeroom_teacher_id,
            capacity: entity.capacity,
            current_total: entity.current_total,
            academic_year: entity.academic_year,
            room_number: entity.room_number,
            floor: entity.floor,
            building: entity.building,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
            created_by: entity.created_by,
            updated_by: entity.updated_by,
        }
    }
}

impl From<&Class> for entity::class::ActiveModel {
    fn from(model: &Class) -> Self {
        Self {
            id: Set(model.id),
            code: Set(model.code.clone()),
            name: Set(model.name.clone()),
            level: Set(model.level.clone()),
            major: Set(model.major.clone()),
            homeroom_teacher_id: Set(model.homeroom_teacher_id),
            capacity: Set(model.capacity),
            current_total: Set(model.current_total),
            academic_year: Set(model.academic_year.clone()),
            room_number: Set(model.room_number.clone()),
            floor: Set(model.floor.clone()),
            building: Set(model.building.clone()),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
            deleted_at: Set(model.deleted_at),
            created_by: Set(model.created_by.clone()),
            updated_by: Set(model.updated_by.clone()),
        }
    }
}

// ===== Academic Year Conversions =====

impl From<entity::academic_year::Model> for AcademicYear {
    fn from(entity: entity::academic_year::Model) -> Self {
        Self {
            id: entity.id,
            year: entity.year,
            start_date: entity.start_date,
            end_date: entity.end_date,
            semester1_start: entity.semester1_start,
            semester1_end: entity.semester1_end,
            semester2_start: entity.semester2_start,
            semester2_end: entity.semester2_end,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&AcademicYear> for entity::academic_year::ActiveModel {
    fn from(model: &AcademicYear) -> Self {
        Self {
            id: Set(model.id),
            year: Set(model.year.clone()),
            start_date: Set(model.start_date),
            end_date: Set(model.end_date),
            semester1_start: Set(model.semester1_start),
            semester1_end: Set(model.semester1_end),
            semester2_start: Set(model.semester2_start),
            semester2_end: Set(model.semester2_end),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Points History Conversions =====

impl TryFrom<entity::points_history::Model> for PointsEntry {
    type Error = anyhow::Error;

    fn try_from(entity: entity::points_history::Model) -> Result<Self, Self::Error> {
        let kind = PointsKind::parse(&entity.kind)
            .ok_or_else(|| anyhow::anyhow!("unknown points kind value: {}", entity.kind))?;

        Ok(Self {
            id: entity.id,
            student_id: entity.student_id,
            points: entity.points,
            kind,
            description: entity.description,
            recorded_at: entity.recorded_at,
            recorded_by: entity.recorded_by,
        })
    }
}
