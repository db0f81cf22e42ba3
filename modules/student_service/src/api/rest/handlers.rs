//! HTTP request handlers - thin layer that delegates to domain service

use crate::contract::{Actor, ClassFilter, Page, StudentFilter, StudentStatus};
use crate::domain::Service;
use super::{dto::*, error::{map_domain_error, Problem}};
use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Paging request headers left by the upstream gateway
const HEADER_PAGING_OFFSET: &str = "x-paging-offset";
const HEADER_PAGING_LIMIT: &str = "x-paging-limit";
const HEADER_PAGING_SEARCH: &str = "x-paging-search";

/// Resolved actor identity header; absent on system-internal calls
const HEADER_ACTOR_ID: &str = "x-actor-id";

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

fn paging(headers: &HeaderMap) -> Page {
    let default = Page::default();
    Page {
        offset: header_u64(headers, HEADER_PAGING_OFFSET).unwrap_or(default.offset),
        limit: header_u64(headers, HEADER_PAGING_LIMIT)
            .unwrap_or(default.limit)
            .max(1),
    }
}

fn search_term(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(HEADER_PAGING_SEARCH)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn actor(headers: &HeaderMap) -> Actor {
    headers
        .get(HEADER_ACTOR_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .map(Actor::User)
        .unwrap_or(Actor::System)
}

// ===== Student Handlers =====

/// Query parameters for listing students
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsQuery {
    /// Filter by enrolled class
    pub class_id: Option<Uuid>,
    /// Filter by lifecycle status
    pub status: Option<String>,
}

/// List students with paging headers and optional filters
pub async fn list_students(
    service: Arc<Service>,
    headers: HeaderMap,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<StudentListResponse>, Problem> {
    let status = match query.status.as_deref() {
        Some(value) => Some(StudentStatus::parse(value).ok_or_else(|| {
            map_domain_error(crate::contract::StudentsError::Validation {
                message: format!("unknown status filter: {value}"),
            })
        })?),
        None => None,
    };

    let page = paging(&headers);
    let filter = StudentFilter {
        search: search_term(&headers),
        class_id: query.class_id,
        status,
    };

    let result = service
        .list_students(filter, page)
        .await
        .map_err(map_domain_error)?;

    let pagination = PaginationDto {
        offset: page.offset,
        limit: page.limit,
        total: result.total,
        total_pages: result.total.div_ceil(page.limit),
    };

    Ok(Json(StudentListResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

/// Student detail with class and recent point history
pub async fn get_student(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentDetailResponse>, Problem> {
    let detail = service.get_student(id).await.map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

/// Enroll a new student
pub async fn create_student(
    service: Arc<Service>,
    headers: HeaderMap,
    Json(req): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentDto>), Problem> {
    let input = req.try_into().map_err(map_domain_error)?;

    let student = service
        .enroll(input, &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Partial student update
pub async fn update_student(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<StudentDto>, Problem> {
    let update = req.try_into().map_err(map_domain_error)?;

    let student = service
        .update_student(id, update, &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(student.into()))
}

/// Withdraw (soft-delete) a student
pub async fn delete_student(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Problem> {
    service
        .withdraw(id, &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::OK)
}

/// Best-effort consolidated profile
pub async fn get_consolidated_profile(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConsolidatedProfileResponse>, Problem> {
    let profile = service
        .consolidated_profile(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(profile.into()))
}

/// Recompute one student's points and rank (no-op on unknown id)
pub async fn sync_student_points(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .sync_student_points(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::OK)
}

/// Batch points sweep over every active student
pub async fn sync_all_students(
    service: Arc<Service>,
) -> Result<Json<SyncSummaryDto>, Problem> {
    let summary = service
        .sync_all_students()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(summary.into()))
}

// ===== Class Handlers =====

/// Query parameters for listing classes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClassesQuery {
    /// Filter by academic year ("YYYY/YYYY")
    pub academic_year: Option<String>,
    /// Filter by grade level
    pub level: Option<String>,
}

/// List classes with optional filters
pub async fn list_classes(
    service: Arc<Service>,
    Query(query): Query<ListClassesQuery>,
) -> Result<Json<Vec<ClassDto>>, Problem> {
    let filter = ClassFilter {
        academic_year: query.academic_year,
        level: query.level,
    };

    let classes = service.list_classes(filter).await.map_err(map_domain_error)?;

    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

/// Class detail with its active roster
pub async fn get_class(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassDetailResponse>, Problem> {
    let detail = service.get_class(id).await.map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

/// Create a class
pub async fn create_class(
    service: Arc<Service>,
    headers: HeaderMap,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassDto>), Problem> {
    let class = service
        .create_class(req.into(), &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(class.into())))
}

/// Partial class update
pub async fn update_class(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Json<ClassDto>, Problem> {
    let class = service
        .update_class(id, req.into(), &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(class.into()))
}

/// Soft-delete a class
pub async fn delete_class(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Problem> {
    service
        .delete_class(id, &actor(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::OK)
}

// ===== Academic Year Handlers =====

/// List all academic years, newest first
pub async fn list_academic_years(
    service: Arc<Service>,
) -> Result<Json<Vec<AcademicYearDto>>, Problem> {
    let years = service
        .list_academic_years()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(years.into_iter().map(Into::into).collect()))
}

/// Create an academic year
pub async fn create_academic_year(
    service: Arc<Service>,
    Json(req): Json<CreateAcademicYearRequest>,
) -> Result<(StatusCode, Json<AcademicYearDto>), Problem> {
    let year = service
        .create_academic_year(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(year.into())))
}

/// Activate one academic year, deactivating every other
pub async fn set_active_academic_year(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicYearDto>, Problem> {
    let year = service
        .set_active_academic_year(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(year.into()))
}

/// The single active academic year
pub async fn get_current_academic_year(
    service: Arc<Service>,
) -> Result<Json<AcademicYearDto>, Problem> {
    let year = service
        .current_academic_year()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(year.into()))
}
