//! Domain service - business logic orchestration

use crate::contract::{
    AcademicYear, Actor, Class, ClassDetail, ClassFilter, ClassUpdate, ConsolidatedProfile,
    Monitoring, NewAcademicYear, NewClass, NewStudent, Page, PointsSection, Student,
    StudentDetail, StudentFilter, StudentPage, StudentStatus, StudentsError, StudentUpdate,
    SyncSummary,
};
use super::events::{EventPublisher, StudentEvent};
use super::peers::PeerGateway;
use super::repository::{AcademicYearRepository, ClassRepository, StudentRepository};
use super::validation;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Latest-events window in the consolidated profile
const CONSOLIDATED_LATEST_LIMIT: u32 = 5;

/// Point-history window in the student detail view
const DETAIL_HISTORY_LIMIT: u64 = 10;

/// Domain service for students, class rosters and academic years
pub struct Service {
    students: Arc<dyn StudentRepository>,
    classes: Arc<dyn ClassRepository>,
    academic_years: Arc<dyn AcademicYearRepository>,
    peers: Arc<dyn PeerGateway>,
    events: Arc<dyn EventPublisher>,
    /// Single-flight guard: overlapping batch sweeps serialize instead
    /// of interleaving rank writes
    sync_guard: tokio::sync::Mutex<()>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        students: Arc<dyn StudentRepository>,
        classes: Arc<dyn ClassRepository>,
        academic_years: Arc<dyn AcademicYearRepository>,
        peers: Arc<dyn PeerGateway>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            students,
            classes,
            academic_years,
            peers,
            events,
            sync_guard: tokio::sync::Mutex::new(()),
        }
    }

    async fn publish(&self, event: StudentEvent) {
        if let Err(error) = self.events.publish(event).await {
            tracing::warn!(%error, "failed to publish roster event");
        }
    }

    // ===== Student Operations =====

    /// Enroll a new student into a live class.
    ///
    /// Snapshots the class name/level/major onto the student record and
    /// bumps the class `current_total`; the insert and the counter
    /// update commit in one transaction.
    pub async fn enroll(
        &self,
        input: NewStudent,
        actor: &Actor,
    ) -> Result<Student, StudentsError> {
        validation::validate_new_student(&input)?;

        let class = self
            .classes
            .find_by_id(input.class_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StudentsError::InvalidReference {
                field: "classId".to_string(),
                id: input.class_id.to_string(),
            })?;

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            nisn: input.nisn,
            nis: input.nis,
            name: input.name,
            nickname: input.nickname,
            class_id: class.id,
            class_name: class.name.clone(),
            class_level: class.level.clone(),
            class_major: class.major.clone(),
            gender: input.gender,
            birth_place: input.birth_place,
            birth_date: input.birth_date,
            religion: input.religion,
            blood_type: input.blood_type,
            address: input.address,
            city: input.city,
            province: input.province,
            phone: input.phone,
            email: input.email,
            photo_url: None,
            parent_id: input.parent_id,
            homeroom_teacher_id: input.homeroom_teacher_id,
            academic_year: input.academic_year,
            entry_year: input.entry_year,
            entry_date: input.entry_date,
            status: StudentStatus::Active,
            positive_points: 0,
            negative_points: 0,
            total_points: 0,
            current_rank: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: actor.audit_id(),
            updated_by: None,
        };

        let created = self
            .students
            .insert_enrolled(&student)
            .await
            .map_err(internal)?;

        self.publish(StudentEvent::enrolled(&created, actor.audit_id()))
            .await;

        Ok(created)
    }

    /// Withdraw (soft-delete) a student.
    ///
    /// The deletion stamp and the class counter decrement commit in one
    /// transaction. Withdrawing an unknown or already-withdrawn id
    /// fails with NotFound.
    pub async fn withdraw(&self, id: Uuid, actor: &Actor) -> Result<(), StudentsError> {
        let student = self
            .students
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("student", id))?;

        self.students
            .soft_delete(id, &actor.audit_id())
            .await
            .map_err(internal)?;

        self.publish(StudentEvent::withdrawn(&student, actor.audit_id()))
            .await;

        Ok(())
    }

    /// Partial student update.
    ///
    /// Changing `class_id` keeps the denormalized class snapshot as
    /// captured at enrollment time.
    pub async fn update_student(
        &self,
        id: Uuid,
        update: StudentUpdate,
        actor: &Actor,
    ) -> Result<Student, StudentsError> {
        validation::validate_student_update(&update)?;

        self.students
            .update(id, &update, &actor.audit_id())
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("student", id))
    }

    /// Student detail with class and recent point history.
    ///
    /// Soft-deleted students stay addressable by direct id for audit;
    /// only listings and the consolidated view hide them.
    pub async fn get_student(&self, id: Uuid) -> Result<StudentDetail, StudentsError> {
        let student = self
            .students
            .find_any_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("student", id))?;

        let class = self
            .classes
            .find_by_id(student.class_id)
            .await
            .map_err(internal)?;

        let points_history = self
            .students
            .latest_points_history(id, DETAIL_HISTORY_LIMIT)
            .await
            .map_err(internal)?;

        Ok(StudentDetail {
            student,
            class,
            points_history,
        })
    }

    /// Page of live students matching the filter
    pub async fn list_students(
        &self,
        filter: StudentFilter,
        page: Page,
    ) -> Result<StudentPage, StudentsError> {
        self.students
            .list(&filter, page)
            .await
            .map_err(internal)
    }

    // ===== Class Operations =====

    /// Create a class; `(code, academic_year)` must be unique
    pub async fn create_class(
        &self,
        input: NewClass,
        actor: &Actor,
    ) -> Result<Class, StudentsError> {
        validation::validate_new_class(&input)?;

        let existing = self
            .classes
            .find_by_code_and_year(&input.code, &input.academic_year)
            .await
            .map_err(internal)?;
        if existing.is_some() {
            return Err(StudentsError::Conflict {
                reason: "Class code already exists for this academic year".to_string(),
            });
        }

        let now = Utc::now();
        let class = Class {
            id: Uuid::new_v4(),
            code: input.code,
            name: input.name,
            level: input.level,
            major: input.major,
            homeroom_teacher_id: input.homeroom_teacher_id,
            capacity: input.capacity,
            current_total: 0,
            academic_year: input.academic_year,
            room_number: input.room_number,
            floor: input.floor,
            building: input.building,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: actor.audit_id(),
            updated_by: None,
        };

        self.classes.insert(&class).await.map_err(internal)
    }

    /// Class detail with the brief roster of its live students
    pub async fn get_class(&self, id: Uuid) -> Result<ClassDetail, StudentsError> {
        let class = self
            .classes
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("class", id))?;

        let students = self.students.roster(id).await.map_err(internal)?;

        Ok(ClassDetail { class, students })
    }

    /// Live classes matching the filter, ordered by code
    pub async fn list_classes(&self, filter: ClassFilter) -> Result<Vec<Class>, StudentsError> {
        self.classes.list(&filter).await.map_err(internal)
    }

    /// Partial class update
    pub async fn update_class(
        &self,
        id: Uuid,
        update: ClassUpdate,
        actor: &Actor,
    ) -> Result<Class, StudentsError> {
        if let Some(capacity) = update.capacity {
            if !(1..=50).contains(&capacity) {
                return Err(StudentsError::Validation {
                    message: "capacity must be between 1 and 50".to_string(),
                });
            }
        }

        self.classes
            .update(id, &update, &actor.audit_id())
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("class", id))
    }

    /// Soft-delete a class
    pub async fn delete_class(&self, id: Uuid, actor: &Actor) -> Result<(), StudentsError> {
        let deleted = self
            .classes
            .soft_delete(id, &actor.audit_id())
            .await
            .map_err(internal)?;
        if !deleted {
            return Err(not_found("class", id));
        }
        Ok(())
    }

    // ===== Academic Year Operations =====

    /// Create an academic year; the year string is unique
    pub async fn create_academic_year(
        &self,
        input: NewAcademicYear,
    ) -> Result<AcademicYear, StudentsError> {
        validation::validate_new_academic_year(&input)?;

        let existing = self
            .academic_years
            .find_by_year(&input.year)
            .await
            .map_err(internal)?;
        if existing.is_some() {
            return Err(StudentsError::Conflict {
                reason: format!("Academic year {} already exists", input.year),
            });
        }

        let now = Utc::now();
        let year = AcademicYear {
            id: Uuid::new_v4(),
            year: input.year,
            start_date: input.start_date,
            end_date: input.end_date,
            semester1_start: input.semester1_start,
            semester1_end: input.semester1_end,
            semester2_start: input.semester2_start,
            semester2_end: input.semester2_end,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };

        self.academic_years.insert(&year).await.map_err(internal)
    }

    /// All academic years, newest first
    pub async fn list_academic_years(&self) -> Result<Vec<AcademicYear>, StudentsError> {
        self.academic_years.list_all().await.map_err(internal)
    }

    /// Activate one academic year and deactivate every other, in one
    /// transaction. An unknown id fails with NotFound and leaves the
    /// previously active year untouched.
    pub async fn set_active_academic_year(
        &self,
        id: Uuid,
    ) -> Result<AcademicYear, StudentsError> {
        self.academic_years
            .set_active(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("academic_year", id))
    }

    /// The single active academic year
    pub async fn current_academic_year(&self) -> Result<AcademicYear, StudentsError> {
        self.academic_years
            .find_active()
            .await
            .map_err(internal)?
            .ok_or(StudentsError::NotFound {
                resource: "academic_year".to_string(),
                id: "active".to_string(),
            })
    }

    // ===== Points Sync =====

    /// Recompute one student's point totals from the violation and
    /// achievement peers, then their class rank.
    ///
    /// Silently no-ops when the student does not exist. Rank is
    /// 1 + count of live classmates with strictly greater totals, so
    /// tied totals share a rank.
    pub async fn sync_student_points(&self, id: Uuid) -> Result<(), StudentsError> {
        let student = match self.students.find_by_id(id).await.map_err(internal)? {
            Some(student) => student,
            None => return Ok(()),
        };

        let violations = self
            .peers
            .student_violations(id, None)
            .await
            .map_err(internal)?;
        let achievements = self
            .peers
            .student_achievements(id, None)
            .await
            .map_err(internal)?;

        let negative_points = sum_magnitudes(violations.iter().map(|e| e.points));
        let positive_points = sum_magnitudes(achievements.iter().map(|e| e.points));
        let total_points = positive_points - negative_points;

        self.students
            .set_points(id, positive_points, negative_points, total_points)
            .await
            .map_err(internal)?;

        let outranking = self
            .students
            .count_outranking(student.class_id, total_points)
            .await
            .map_err(internal)?;
        let rank = i32::try_from(outranking).unwrap_or(i32::MAX - 1) + 1;

        self.students.set_rank(id, rank).await.map_err(internal)?;

        self.publish(StudentEvent::points_synced(id, total_points, rank))
            .await;

        Ok(())
    }

    /// Batch sweep over every active, non-deleted student.
    ///
    /// Sweeps serialize through a single-flight guard. A failure in one
    /// student's sync is logged and does not abort the sweep.
    pub async fn sync_all_students(&self) -> Result<SyncSummary, StudentsError> {
        let _flight = self.sync_guard.lock().await;

        let ids = self.students.list_active_ids().await.map_err(internal)?;
        let mut summary = SyncSummary::default();

        for id in ids {
            match self.sync_student_points(id).await {
                Ok(()) => summary.synced += 1,
                Err(error) => {
                    tracing::warn!(student_id = %id, %error, "points sync failed, continuing sweep");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(synced = summary.synced, failed = summary.failed, "points sweep finished");
        Ok(summary)
    }

    // ===== Consolidated Profile =====

    /// Best-effort aggregate view of a student.
    ///
    /// The three peer calls run concurrently; each failure is logged
    /// and leaves its section at the placeholder default. Peer
    /// unavailability never fails the operation.
    pub async fn consolidated_profile(
        &self,
        id: Uuid,
    ) -> Result<ConsolidatedProfile, StudentsError> {
        let student = self
            .students
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found("student", id))?;

        let class = self
            .classes
            .find_by_id(student.class_id)
            .await
            .map_err(internal)?;

        let mut profile = ConsolidatedProfile {
            monitoring: Monitoring::default(),
            violations: PointsSection {
                total_points: student.negative_points,
                latest: Vec::new(),
            },
            achievements: PointsSection {
                total_points: student.positive_points,
                latest: Vec::new(),
            },
            class,
            profile: student,
        };

        let (schedule, violations, achievements) = futures::join!(
            self.peers.class_schedule_status(profile.profile.class_id),
            self.peers
                .student_violations(profile.profile.id, Some(CONSOLIDATED_LATEST_LIMIT)),
            self.peers
                .student_achievements(profile.profile.id, Some(CONSOLIDATED_LATEST_LIMIT)),
        );

        match schedule {
            Ok(status) => {
                profile.monitoring.current_class_status = status.status;
                profile.monitoring.active_lesson = status.lesson;
            }
            Err(error) => {
                tracing::warn!(student_id = %id, %error, "schedule peer unavailable");
            }
        }

        match violations {
            Ok(mut latest) => {
                latest.truncate(CONSOLIDATED_LATEST_LIMIT as usize);
                profile.violations.latest = latest;
            }
            Err(error) => {
                tracing::warn!(student_id = %id, %error, "violation peer unavailable");
            }
        }

        match achievements {
            Ok(mut latest) => {
                latest.truncate(CONSOLIDATED_LATEST_LIMIT as usize);
                profile.achievements.latest = latest;
            }
            Err(error) => {
                tracing::warn!(student_id = %id, %error, "achievement peer unavailable");
            }
        }

        Ok(profile)
    }
}

fn not_found(resource: &str, id: Uuid) -> StudentsError {
    StudentsError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

fn internal(error: anyhow::Error) -> StudentsError {
    tracing::error!(%error, "student service internal error");
    StudentsError::Internal
}

/// Saturating sum of non-negative event magnitudes
fn sum_magnitudes(points: impl Iterator<Item = i32>) -> i32 {
    points.fold(0i32, |acc, p| acc.saturating_add(p.max(0)))
}
