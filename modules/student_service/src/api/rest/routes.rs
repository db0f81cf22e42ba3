//! Route registration for the student service REST API

use crate::domain::Service;
use super::{dto::*, handlers};
use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/health", get(|| async { "ok" }))
        // Student endpoints
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .route("/students/sync-points", post(sync_all_students_handler))
        .route(
            "/students/{id}",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler),
        )
        .route(
            "/students/{id}/consolidated",
            get(get_consolidated_profile_handler),
        )
        .route(
            "/students/{id}/sync-points",
            post(sync_student_points_handler),
        )
        // Class endpoints
        .route(
            "/classes",
            get(list_classes_handler).post(create_class_handler),
        )
        .route(
            "/classes/{id}",
            get(get_class_handler)
                .put(update_class_handler)
                .delete(delete_class_handler),
        )
        // Academic year endpoints
        .route(
            "/academic-years",
            get(list_academic_years_handler).post(create_academic_year_handler),
        )
        .route(
            "/academic-years/current",
            get(get_current_academic_year_handler),
        )
        .route(
            "/academic-years/{id}/set-active",
            put(set_active_academic_year_handler),
        )
        // Add service as extension for handlers
        .layer(Extension(service))
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_students_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    query: Query<handlers::ListStudentsQuery>,
) -> Result<Json<StudentListResponse>, super::error::Problem> {
    handlers::list_students(service, headers, query).await
}

async fn get_student_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<StudentDetailResponse>, super::error::Problem> {
    handlers::get_student(service, path).await
}

async fn create_student_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    json: Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentDto>), super::error::Problem> {
    handlers::create_student(service, headers, json).await
}

async fn update_student_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    headers: HeaderMap,
    json: Json<UpdateStudentRequest>,
) -> Result<Json<StudentDto>, super::error::Problem> {
    handlers::update_student(service, path, headers, json).await
}

async fn delete_student_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, super::error::Problem> {
    handlers::delete_student(service, path, headers).await
}

async fn get_consolidated_profile_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<ConsolidatedProfileResponse>, super::error::Problem> {
    handlers::get_consolidated_profile(service, path).await
}

async fn sync_student_points_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, super::error::Problem> {
    handlers::sync_student_points(service, path).await
}

async fn sync_all_students_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<SyncSummaryDto>, super::error::Problem> {
    handlers::sync_all_students(service).await
}

async fn list_classes_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::ListClassesQuery>,
) -> Result<Json<Vec<ClassDto>>, super::error::Problem> {
    handlers::list_classes(service, query).await
}

async fn get_class_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<ClassDetailResponse>, super::error::Problem> {
    handlers::get_class(service, path).await
}

async fn create_class_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    json: Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassDto>), super::error::Problem> {
    handlers::create_class(service, headers, json).await
}

async fn update_class_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    headers: HeaderMap,
    json: Json<UpdateClassRequest>,
) -> Result<Json<ClassDto>, super::error::Problem> {
    handlers::update_class(service, path, headers, json).await
}

async fn delete_class_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, super::error::Problem> {
    handlers::delete_class(service, path, headers).await
}

async fn list_academic_years_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<Vec<AcademicYearDto>>, super::error::Problem> {
    handlers::list_academic_years(service).await
}

async fn create_academic_year_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateAcademicYearRequest>,
) -> Result<(StatusCode, Json<AcademicYearDto>), super::error::Problem> {
    handlers::create_academic_year(service, json).await
}

async fn set_active_academic_year_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<AcademicYearDto>, super::error::Problem> {
    handlers::set_active_academic_year(service, path).await
}

async fn get_current_academic_year_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<AcademicYearDto>, super::error::Problem> {
    handlers::get_current_academic_year(service).await
}
