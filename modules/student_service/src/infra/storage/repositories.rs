//! SeaORM repository implementations

use crate::contract::{
    AcademicYear, Class, ClassFilter, ClassUpdate, Page, PointsEntry, RosterEntry, Student,
    StudentFilter, StudentPage, StudentUpdate,
};
use crate::domain::repository::{AcademicYearRepository, ClassRepository, StudentRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{ExprTrait as _, Func};
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition,
    DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

fn lowered_like(column: entity::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

// ===== Student Repository =====

pub struct SeaOrmStudentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStudentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn insert_enrolled(&self, student: &Student) -> Result<Student> {
        let txn = self.db.begin().await?;

        let active: entity::ActiveModel = student.into();
        let created = entity::Entity::insert(active)
            .exec_with_returning(&txn)
            .await?;

        entity::class::Entity::update_many()
            .col_expr(
                entity::class::Column::CurrentTotal,
                Expr::col(entity::class::Column::CurrentTotal).add(1),
            )
            .col_expr(entity::class::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::class::Column::Id.eq(student.class_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        created.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        let result = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn find_any_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        let result = entity::Entity::find_by_id(id).one(&*self.db).await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn list(&self, filter: &StudentFilter, page: Page) -> Result<StudentPage> {
        let mut condition = Condition::all().add(entity::Column::DeletedAt.is_null());

        if let Some(class_id) = filter.class_id {
            condition = condition.add(entity::Column::ClassId.eq(class_id));
        }
        if let Some(status) = filter.status {
            condition = condition.add(entity::Column::Status.eq(status.as_str()));
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search.to_lowercase());
            condition = condition.add(
                Condition::any()
                    .add(lowered_like(entity::Column::Name, &pattern))
                    .add(lowered_like(entity::Column::Nisn, &pattern))
                    .add(lowered_like(entity::Column::Nis, &pattern)),
            );
        }

        let query = entity::Entity::find().filter(condition);
        let total = query.clone().count(&*self.db).await?;

        let rows = query
            .order_by_asc(entity::Column::Name)
            .offset(page.offset)
            .limit(page.limit)
            .all(&*self.db)
            .await?;

        let items = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()?;

        Ok(StudentPage { items, total })
    }

    async fn update(
        &self,
        id: Uuid,
        update: &StudentUpdate,
        updated_by: &str,
    ) -> Result<Option<Student>> {
        let existing = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(name) = &update.name {
            active.name = Set(name.clone());
        }
        if let Some(nickname) = &update.nickname {
            active.nickname = Set(Some(nickname.clone()));
        }
        if let Some(class_id) = update.class_id {
            // The denormalized class snapshot intentionally stays as-is
            active.class_id = Set(class_id);
        }
        if let Some(phone) = &update.phone {
            active.phone = Set(Some(phone.clone()));
        }
        if let Some(email) = &update.email {
            active.email = Set(Some(email.clone()));
        }
        if let Some(address) = &update.address {
            active.address = Set(address.clone());
        }
        if let Some(photo_url) = &update.photo_url {
            active.photo_url = Set(Some(photo_url.clone()));
        }
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_by = Set(Some(updated_by.to_string()));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated.try_into()?))
    }

    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .one(&txn)
            .await?;

        let Some(model) = existing else {
            anyhow::bail!("student not found: {id}");
        };

        let class_id = model.class_id;
        let mut active = model.into_active_model();
        active.deleted_at = Set(Some(Utc::now()));
        active.is_active = Set(false);
        active.updated_by = Set(Some(updated_by.to_string()));
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        entity::class::Entity::update_many()
            .col_expr(
                entity::class::Column::CurrentTotal,
                Expr::col(entity::class::Column::CurrentTotal).sub(1),
            )
            .col_expr(entity::class::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::class::Column::Id.eq(class_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn set_points(&self, id: Uuid, positive: i32, negative: i32, total: i32) -> Result<()> {
        entity::Entity::update_many()
            .col_expr(entity::Column::PositivePoints, Expr::value(positive))
            .col_expr(entity::Column::NegativePoints, Expr::value(negative))
            .col_expr(entity::Column::TotalPoints, Expr::value(total))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn set_rank(&self, id: Uuid, rank: i32) -> Result<()> {
        entity::Entity::update_many()
            .col_expr(entity::Column::CurrentRank, Expr::value(rank))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn count_outranking(&self, class_id: Uuid, total_points: i32) -> Result<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::ClassId.eq(class_id))
            .filter(entity::Column::TotalPoints.gt(total_points))
            .filter(entity::Column::IsActive.eq(true))
            .filter(entity::Column::DeletedAt.is_null())
            .count(&*self.db)
            .await?;
        Ok(count)
    }

    async fn list_active_ids(&self) -> Result<Vec<Uuid>> {
        let ids = entity::Entity::find()
            .select_only()
            .column(entity::Column::Id)
            .filter(entity::Column::IsActive.eq(true))
            .filter(entity::Column::DeletedAt.is_null())
            .order_by_asc(entity::Column::Name)
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await?;
        Ok(ids)
    }

    async fn roster(&self, class_id: Uuid) -> Result<Vec<RosterEntry>> {
        let rows = entity::Entity::find()
            .select_only()
            .column(entity::Column::Id)
            .column(entity::Column::Nisn)
            .column(entity::Column::Name)
            .column(entity::Column::TotalPoints)
            .filter(entity::Column::ClassId.eq(class_id))
            .filter(entity::Column::DeletedAt.is_null())
            .order_by_asc(entity::Column::Name)
            .into_tuple::<(Uuid, String, String, i32)>()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, nisn, name, total_points)| RosterEntry {
                id,
                nisn,
                name,
                total_points,
            })
            .collect())
    }

    async fn latest_points_history(
        &self,
        student_id: Uuid,
        limit: u64,
    ) -> Result<Vec<PointsEntry>> {
        let rows = entity::points_history::Entity::find()
            .filter(entity::points_history::Column::StudentId.eq(student_id))
            .order_by_desc(entity::points_history::Column::RecordedAt)
            .limit(limit)
            .all(&*self.db)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

// ===== Class Repository =====

pub struct SeaOrmClassRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmClassRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassRepository for SeaOrmClassRepository {
    async fn insert(&self, class: &Class) -> Result<Class> {
        let active: entity::class::ActiveModel = class.into();
        let created = entity::class::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(created.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>> {
        let result = entity::class::Entity::find()
            .filter(entity::class::Column::Id.eq(id))
            .filter(entity::class::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_code_and_year(
        &self,
        code: &str,
        academic_year: &str,
    ) -> Result<Option<Class>> {
        let result = entity::class::Entity::find()
            .filter(entity::class::Column::Code.eq(code))
            .filter(entity::class::Column::AcademicYear.eq(academic_year))
            .filter(entity::class::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, filter: &ClassFilter) -> Result<Vec<Class>> {
        let mut query = entity::class::Entity::find()
            .filter(entity::class::Column::DeletedAt.is_null());

        if let Some(academic_year) = &filter.academic_year {
            query = query.filter(entity::class::Column::AcademicYear.eq(academic_year));
        }
        if let Some(level) = &filter.level {
            query = query.filter(entity::class::Column::Level.eq(level));
        }

        let rows = query
            .order_by_asc(entity::class::Column::Code)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &ClassUpdate,
        updated_by: &str,
    ) -> Result<Option<Class>> {
        let existing = entity::class::Entity::find()
            .filter(entity::class::Column::Id.eq(id))
            .filter(entity::class::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(name) = &update.name {
            active.name = Set(name.clone());
        }
        if let Some(major) = &update.major {
            active.major = Set(Some(major.clone()));
        }
        if let Some(homeroom_teacher_id) = update.homeroom_teacher_id {
            active.homeroom_teacher_id = Set(Some(homeroom_teacher_id));
        }
        if let Some(capacity) = update.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(room_number) = &update.room_number {
            active.room_number = Set(Some(room_number.clone()));
        }
        if let Some(floor) = &update.floor {
            active.floor = Set(Some(floor.clone()));
        }
        if let Some(building) = &update.building {
            active.building = Set(Some(building.clone()));
        }
        active.updated_by = Set(Some(updated_by.to_string()));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn soft_delete(&self, id: Uuid, updated_by: &str) -> Result<bool> {
        let existing = entity::class::Entity::find()
            .filter(entity::class::Column::Id.eq(id))
            .filter(entity::class::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;

        let Some(model) = existing else {
            return Ok(false);
        };

        let mut active = model.into_active_model();
        active.deleted_at = Set(Some(Utc::now()));
        active.is_active = Set(false);
        active.updated_by = Set(Some(updated_by.to_string()));
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        Ok(true)
    }
}

// ===== Academic Year Repository =====

pub struct SeaOrmAcademicYearRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAcademicYearRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AcademicYearRepository for SeaOrmAcademicYearRepository {
    async fn insert(&self, year: &AcademicYear) -> Result<AcademicYear> {
        let active: entity::academic_year::ActiveModel = year.into();
        let created = entity::academic_year::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(created.into())
    }

    async fn find_by_year(&self, year: &str) -> Result<Option<AcademicYear>> {
        let result = entity::academic_year::Entity::find()
            .filter(entity::academic_year::Column::Year.eq(year))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_active(&self) -> Result<Option<AcademicYear>> {
        let result = entity::academic_year::Entity::find()
            .filter(entity::academic_year::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<AcademicYear>> {
        let rows = entity::academic_year::Entity::find()
            .order_by_desc(entity::academic_year::Column::Year)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_active(&self, id: Uuid) -> Result<Option<AcademicYear>> {
        let txn = self.db.begin().await?;

        let Some(target) = entity::academic_year::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        entity::academic_year::Entity::update_many()
            .col_expr(entity::academic_year::Column::IsActive, Expr::value(false))
            .exec(&txn)
            .await?;

        let mut active = target.into_active_model();
        active.is_active = Set(true);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(updated.into()))
    }
}
