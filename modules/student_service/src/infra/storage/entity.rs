//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Students table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Platform user backing this student
    pub user_id: Uuid,

    /// 10-digit national student id
    #[sea_orm(unique)]
    pub nisn: String,

    /// Institution-local student id
    pub nis: Option<String>,

    pub name: String,
    pub nickname: Option<String>,

    /// Enrolled class
    pub class_id: Uuid,

    /// Class snapshot captured at enrollment time
    pub class_name: String,
    pub class_level: String,
    pub class_major: Option<String>,

    pub gender: String,
    pub birth_place: String,
    pub birth_date: Date,
    pub religion: String,
    pub blood_type: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub parent_id: Option<Uuid>,
    pub homeroom_teacher_id: Option<Uuid>,
    pub academic_year: String,
    pub entry_year: String,
    pub entry_date: Date,

    /// Lifecycle status
    pub status: String,

    pub positive_points: i32,
    pub negative_points: i32,
    pub total_points: i32,
    pub current_rank: Option<i32>,
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,

    /// Soft delete timestamp
    pub deleted_at: Option<DateTimeUtc>,

    pub created_by: String,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Foreign key to classes
    #[sea_orm(
        belongs_to = "class::Entity",
        from = "Column::ClassId",
        to = "class::Column::Id"
    )]
    Class,
    /// One-to-many point log
    #[sea_orm(has_many = "points_history::Entity")]
    PointsHistory,
}

impl Related<class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<points_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PointsHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Classes table module
pub mod class {
    use sea_orm::entity::prelude::*;

    /// Classes table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "classes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Human code; unique together with academic_year
        pub code: String,

        pub name: String,
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

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,

        /// Soft delete timestamp
        pub deleted_at: Option<DateTimeUtc>,

        pub created_by: String,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with students
        #[sea_orm(has_many = "super::Entity")]
        Students,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Students.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Academic years table module
pub mod academic_year {
    use sea_orm::entity::prelude::*;

    /// Academic years table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "academic_years")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Unique year string, "YYYY/YYYY"
        #[sea_orm(unique)]
        pub year: String,

        pub start_date: Date,
        pub end_date: Date,
        pub semester1_start: Date,
        pub semester1_end: Date,
        pub semester2_start: Date,
        pub semester2_end: Date,

        /// At most one row is active
        pub is_active: bool,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Points history table module (read-only from this service)
pub mod points_history {
    use sea_orm::entity::prelude::*;

    /// Points history table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "points_history")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub student_id: Uuid,

        /// Signed magnitude of the event
        pub points: i32,

        /// VIOLATION or ACHIEVEMENT
        pub kind: String,

        pub description: Option<String>,
        pub recorded_at: DateTimeUtc,
        pub recorded_by: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to students
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::StudentId",
            to = "super::Column::Id"
        )]
        Student,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Student.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
