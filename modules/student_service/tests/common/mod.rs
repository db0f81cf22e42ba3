//! Common test utilities: in-memory repositories, a mock peer gateway
//! and roster fixtures shared by the integration test files.

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use student_service::contract::*;
use student_service::domain::peers::PeerGateway;
use student_service::domain::repository::{
    AcademicYearRepository, ClassRepository, StudentRepository,
};
use student_service::domain::{NoOpEventPublisher, Service};

/// Shared in-memory tables; the student and class mocks operate on the
/// same store so cross-entity writes stay observable
#[derive(Default)]
pub struct MockStore {
    pub students: RwLock<HashMap<Uuid, Student>>,
    pub classes: RwLock<HashMap<Uuid, Class>>,
    pub years: RwLock<HashMap<Uuid, AcademicYear>>,
    pub points_history: RwLock<HashMap<Uuid, Vec<PointsEntry>>>,
}

impl MockStore {
    pub fn class_total(&self, class_id: Uuid) -> i32 {
        self.classes
            .read()
            .get(&class_id)
            .map(|c| c.current_total)
            .unwrap_or(-1)
    }

    pub fn student(&self, id: Uuid) -> Option<Student> {
        self.students.read().get(&id).cloned()
    }
}

// ===== Student repository mock =====

#[derive(Clone)]
pub struct MockStudentRepo {
    store: Arc<MockStore>,
}

impl MockStudentRepo {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl StudentRepository for MockStudentRepo {
    async fn insert_enrolled(&self, student: &Student) -> anyhow::Result<Student> {
        self.store
            .students
            .write()
            .insert(student.id, student.clone());
        let mut classes = self.store.classes.write();
        let class = classes
            .get_mut(&student.class_id)
            .ok_or_else(|| anyhow::anyhow!("class not found: {}", student.class_id))?;
        class.current_total += 1;
        Ok(student.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Student>> {
        Ok(self
            .store
            .students
            .read()
            .get(&id)
            .filter(|s| s.deleted_at.is_none())
            .cloned())
    }

    async fn find_any_by_id(&self, id: Uuid) -> anyhow::Result<Option<Student>> {
        Ok(self.store.students.read().get(&id).cloned())
    }

    async fn list(&self, filter: &StudentFilter, page: Page) -> anyhow::Result<StudentPage> {
        let students = self.store.students.read();
        let mut matching: Vec<Student> = students
            .values()
            .filter(|s| s.deleted_at.is_none())
            .filter(|s| filter.class_id.map_or(true, |c| s.class_id == c))
            .filter(|s| filter.status.map_or(true, |st| s.status == st))
            .filter(|s| {
                filter.search.as_ref().map_or(true, |term| {
                    let term = term.to_lowercase();
                    s.name.to_lowercase().contains(&term)
                        || s.nisn.to_lowercase().contains(&term)
                        || s.nis
                            .as_ref()
                            .map_or(false, |nis| nis.to_lowercase().contains(&term))
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();

        Ok(StudentPage { items, total })
    }

    async fn update(
        &self,
        id: Uuid,
        update: &StudentUpdate,
        updated_by: &str,
    ) -> anyhow::Result<Option<Student>> {
        let mut students = self.store.students.write();
        let Some(student) = students.get_mut(&id).filter(|s| s.deleted_at.is_none()) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            student.name = name.clone();
        }
        if let Some(nickname) = &update.nickname {
            student.nickname = Some(nickname.clone());
        }
        if let Some(class_id) = update.class_id {
            student.class_id = class_id;
        }
        if let Some(phone) = &update.phone {
            student.phone = Some(phone.clone());
        }
        if let Some(email) = &update.email {
            student.email = Some(email.clone());
        }
        if let Some(address) = &update.address {
            student.address = address.clone();
        }
        if let Some(photo_url) = &update.photo_url {
            student.photo_url = Some(photo_url.clone());
        }
        if let Some(status) = update.status {
            student.status = status;
        }
        student.updated_by = Some(updated_by.to_string());
        student.updated_at = Utc::now();

        Ok(Some(student.clone()))
    }

    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> anyhow::Result<()> {
        let mut students = self.store.students.write();
        let Some(student) = students.get_mut(&id).filter(|s| s.deleted_at.is_none()) else {
            anyhow::bail!("student not found: {id}");
        };
        student.deleted_at = Some(Utc::now());
        student.is_active = false;
        student.updated_by = Some(updated_by.to_string());

        let class_id = student.class_id;
        drop(students);

        let mut classes = self.store.classes.write();
        if let Some(class) = classes.get_mut(&class_id) {
            class.current_total -= 1;
        }
        Ok(())
    }

    async fn set_points(
        &self,
        id: Uuid,
        positive: i32,
        negative: i32,
        total: i32,
    ) -> anyhow::Result<()> {
        if let Some(student) = self.store.students.write().get_mut(&id) {
            student.positive_points = positive;
            student.negative_points = negative;
            student.total_points = total;
        }
        Ok(())
    }

    async fn set_rank(&self, id: Uuid, rank: i32) -> anyhow::Result<()> {
        if let Some(student) = self.store.students.write().get_mut(&id) {
            student.current_rank = Some(rank);
        }
        Ok(())
    }

    async fn count_outranking(&self, class_id: Uuid, total_points: i32) -> anyhow::Result<u64> {
        Ok(self
            .store
            .students
            .read()
            .values()
            .filter(|s| {
                s.class_id == class_id
                    && s.deleted_at.is_none()
                    && s.is_active
                    && s.total_points > total_points
            })
            .count() as u64)
    }

    async fn list_active_ids(&self) -> anyhow::Result<Vec<Uuid>> {
        let students = self.store.students.read();
        let mut active: Vec<&Student> = students
            .values()
            .filter(|s| s.is_active && s.deleted_at.is_none())
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active.into_iter().map(|s| s.id).collect())
    }

    async fn roster(&self, class_id: Uuid) -> anyhow::Result<Vec<RosterEntry>> {
        let students = self.store.students.read();
        let mut entries: Vec<RosterEntry> = students
            .values()
            .filter(|s| s.class_id == class_id && s.deleted_at.is_none())
            .map(|s| RosterEntry {
                id: s.id,
                nisn: s.nisn.clone(),
                name: s.name.clone(),
                total_points: s.total_points,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn latest_points_history(
        &self,
        student_id: Uuid,
        limit: u64,
    ) -> anyhow::Result<Vec<PointsEntry>> {
        let history = self.store.points_history.read();
        let mut entries = history.get(&student_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

// ===== Class repository mock =====

#[derive(Clone)]
pub struct MockClassRepo {
    store: Arc<MockStore>,
}

impl MockClassRepo {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ClassRepository for MockClassRepo {
    async fn insert(&self, class: &Class) -> anyhow::Result<Class> {
        self.store.classes.write().insert(class.id, class.clone());
        Ok(class.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Class>> {
        Ok(self
            .store
            .classes
            .read()
            .get(&id)
            .filter(|c| c.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_code_and_year(
        &self,
        code: &str,
        academic_year: &str,
    ) -> anyhow::Result<Option<Class>> {
        Ok(self
            .store
            .classes
            .read()
            .values()
            .find(|c| c.code == code && c.academic_year == academic_year && c.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, filter: &ClassFilter) -> anyhow::Result<Vec<Class>> {
        let classes = self.store.classes.read();
        let mut matching: Vec<Class> = classes
            .values()
            .filter(|c| c.deleted_at.is_none())
            .filter(|c| {
                filter
                    .academic_year
                    .as_ref()
                    .map_or(true, |y| &c.academic_year == y)
            })
            .filter(|c| filter.level.as_ref().map_or(true, |l| &c.level == l))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(matching)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &ClassUpdate,
        updated_by: &str,
    ) -> anyhow::Result<Option<Class>> {
        let mut classes = self.store.classes.write();
        let Some(class) = classes.get_mut(&id).filter(|c| c.deleted_at.is_none()) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            class.name = name.clone();
        }
        if let Some(major) = &update.major {
            class.major = Some(major.clone());
        }
        if let Some(homeroom_teacher_id) = update.homeroom_teacher_id {
            class.homeroom_teacher_id = Some(homeroom_teacher_id);
        }
        if let Some(capacity) = update.capacity {
            class.capacity = capacity;
        }
        if let Some(room_number) = &update.room_number {
            class.room_number = Some(room_number.clone());
        }
        if let Some(floor) = &update.floor {
            class.floor = Some(floor.clone());
        }
        if let Some(building) = &update.building {
            class.building = Some(building.clone());
        }
        class.updated_by = Some(updated_by.to_string());
        class.updated_at = Utc::now();

        Ok(Some(class.clone()))
    }

    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> anyhow::Result<bool> {
        let mut classes = self.store.classes.write();
        let Some(class) = classes.get_mut(&id).filter(|c| c.deleted_at.is_none()) else {
            return Ok(false);
        };
        class.deleted_at = Some(Utc::now());
        class.is_active = false;
        class.updated_by = Some(updated_by.to_string());
        Ok(true)
    }
}

// ===== Academic year repository mock =====

#[derive(Clone)]
pub struct MockAcademicYearRepo {
    store: Arc<MockStore>,
}

impl MockAcademicYearRepo {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AcademicYearRepository for MockAcademicYearRepo {
    async fn insert(&self, year: &AcademicYear) -> anyhow::Result<AcademicYear> {
        self.store.years.write().insert(year.id, year.clone());
        Ok(year.clone())
    }

    async fn find_by_year(&self, year: &str) -> anyhow::Result<Option<AcademicYear>> {
        Ok(self
            .store
            .years
            .read()
            .values()
            .find(|y| y.year == year)
            .cloned())
    }

    async fn find_active(&self) -> anyhow::Result<Option<AcademicYear>> {
        Ok(self
            .store
            .years
            .read()
            .values()
            .find(|y| y.is_active)
            .cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<AcademicYear>> {
        let years = self.store.years.read();
        let mut all: Vec<AcademicYear> = years.values().cloned().collect();
        all.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(all)
    }

    async fn set_active(&self, id: Uuid) -> anyhow::Result<Option<AcademicYear>> {
        let mut years = self.store.years.write();
        if !years.contains_key(&id) {
            // Nothing changed: the real implementation rolls back
            return Ok(None);
        }
        for year in years.values_mut() {
            year.is_active = false;
        }
        let year = years
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("academic year not found: {id}"))?;
        year.is_active = true;
        year.updated_at = Utc::now();
        Ok(Some(year.clone()))
    }
}

// ===== Peer gateway mock =====

/// Configurable peer gateway: sections can be primed per student and
/// whole peers or single students can be marked unreachable
#[derive(Default)]
pub struct MockPeerGateway {
    pub schedule: RwLock<Option<ScheduleStatus>>,
    pub violations: RwLock<HashMap<Uuid, Vec<PointEvent>>>,
    pub achievements: RwLock<HashMap<Uuid, Vec<PointEvent>>>,
    pub schedule_down: RwLock<bool>,
    pub violations_down: RwLock<bool>,
    pub achievements_down: RwLock<bool>,
    /// Students whose violation/achievement fetches fail
    pub failing_students: RwLock<HashSet<Uuid>>,
}

impl MockPeerGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_schedule(&self, status: &str, lesson: Option<&str>) {
        *self.schedule.write() = Some(ScheduleStatus {
            status: status.to_string(),
            lesson: lesson.map(|l| l.to_string()),
        });
    }

    pub fn set_violations(&self, student_id: Uuid, points: &[i32]) {
        self.violations
            .write()
            .insert(student_id, events_from_points(points));
    }

    pub fn set_achievements(&self, student_id: Uuid, points: &[i32]) {
        self.achievements
            .write()
            .insert(student_id, events_from_points(points));
    }

    pub fn fail_student(&self, student_id: Uuid) {
        self.failing_students.write().insert(student_id);
    }

    pub fn all_peers_down(&self) {
        *self.schedule_down.write() = true;
        *self.violations_down.write() = true;
        *self.achievements_down.write() = true;
    }
}

fn events_from_points(points: &[i32]) -> Vec<PointEvent> {
    points
        .iter()
        .map(|&p| PointEvent {
            id: Some(Uuid::new_v4()),
            points: p,
            description: None,
            recorded_at: Some(Utc::now()),
        })
        .collect()
}

fn limited(events: Vec<PointEvent>, limit: Option<u32>) -> Vec<PointEvent> {
    match limit {
        Some(limit) => events.into_iter().take(limit as usize).collect(),
        None => events,
    }
}

#[async_trait::async_trait]
impl PeerGateway for MockPeerGateway {
    async fn class_schedule_status(&self, _class_id: Uuid) -> anyhow::Result<ScheduleStatus> {
        if *self.schedule_down.read() {
            anyhow::bail!("schedule peer unreachable");
        }
        self.schedule
            .read()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("schedule peer unreachable"))
    }

    async fn student_violations(
        &self,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<PointEvent>> {
        if *self.violations_down.read() || self.failing_students.read().contains(&student_id) {
            anyhow::bail!("violation peer unreachable");
        }
        let events = self
            .violations
            .read()
            .get(&student_id)
            .cloned()
            .unwrap_or_default();
        Ok(limited(events, limit))
    }

    async fn student_achievements(
        &self,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<PointEvent>> {
        if *self.achievements_down.read() || self.failing_students.read().contains(&student_id) {
            anyhow::bail!("achievement peer unreachable");
        }
        let events = self
            .achievements
            .read()
            .get(&student_id)
            .cloned()
            .unwrap_or_default();
        Ok(limited(events, limit))
    }
}

// ===== Fixtures =====

/// One school: the 2024/2025 year and two classes ready for enrollment
pub struct TestSchool {
    pub store: Arc<MockStore>,
    pub peers: Arc<MockPeerGateway>,
    pub service: Service,
    pub year: AcademicYear,
    pub class_a: Class,
    pub class_b: Class,
}

impl TestSchool {
    pub fn new() -> Self {
        let store = Arc::new(MockStore::default());
        let peers = Arc::new(MockPeerGateway::new());

        let service = Service::new(
            Arc::new(MockStudentRepo::new(store.clone())),
            Arc::new(MockClassRepo::new(store.clone())),
            Arc::new(MockAcademicYearRepo::new(store.clone())),
            peers.clone(),
            Arc::new(NoOpEventPublisher),
        );

        let year = sample_year("2024/2025", true);
        let class_a = sample_class("X-IPA-1", "10 IPA 1", "10", Some("IPA"), "2024/2025");
        let class_b = sample_class("X-IPS-1", "10 IPS 1", "10", Some("IPS"), "2024/2025");

        store.years.write().insert(year.id, year.clone());
        store.classes.write().insert(class_a.id, class_a.clone());
        store.classes.write().insert(class_b.id, class_b.clone());

        Self {
            store,
            peers,
            service,
            year,
            class_a,
            class_b,
        }
    }

    /// Enroll a student through the service, panicking on failure
    pub async fn enroll(&self, name: &str, nisn: &str, class_id: Uuid) -> Student {
        self.service
            .enroll(sample_new_student(name, nisn, class_id), &Actor::System)
            .await
            .unwrap_or_else(|e| panic!("enroll {name} failed: {e}"))
    }
}

impl Default for TestSchool {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sample_year(year: &str, is_active: bool) -> AcademicYear {
    let now = Utc::now();
    AcademicYear {
        id: Uuid::new_v4(),
        year: year.to_string(),
        start_date: date(2024, 7, 15),
        end_date: date(2025, 6, 20),
        semester1_start: date(2024, 7, 15),
        semester1_end: date(2024, 12, 20),
        semester2_start: date(2025, 1, 6),
        semester2_end: date(2025, 6, 20),
        is_active,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_class(
    code: &str,
    name: &str,
    level: &str,
    major: Option<&str>,
    academic_year: &str,
) -> Class {
    let now = Utc::now();
    Class {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: name.to_string(),
        level: level.to_string(),
        major: major.map(|m| m.to_string()),
        homeroom_teacher_id: None,
        capacity: 36,
        current_total: 0,
        academic_year: academic_year.to_string(),
        room_number: None,
        floor: None,
        building: None,
        is_active: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
        created_by: "SYSTEM".to_string(),
        updated_by: None,
    }
}

pub fn sample_new_student(name: &str, nisn: &str, class_id: Uuid) -> NewStudent {
    NewStudent {
        user_id: Uuid::new_v4(),
        nisn: nisn.to_string(),
        nis: Some(format!("NIS-{nisn}")),
        name: name.to_string(),
        nickname: None,
        class_id,
        gender: Gender::Male,
        birth_place: "Bandung".to_string(),
        birth_date: date(2008, 3, 14),
        religion: Religion::Islam,
        blood_type: Some(BloodType::O),
        address: "Jl. Merdeka No. 1".to_string(),
        city: "Bandung".to_string(),
        province: "Jawa Barat".to_string(),
        phone: Some("0812345678".to_string()),
        email: None,
        parent_id: None,
        homeroom_teacher_id: None,
        academic_year: "2024/2025".to_string(),
        entry_year: "2024".to_string(),
        entry_date: date(2024, 7, 15),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
