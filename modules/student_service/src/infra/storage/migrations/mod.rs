//! Database migrations for student service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_000001_create_classes::Migration),
            Box::new(m20250612_000002_create_students::Migration),
            Box::new(m20250612_000003_create_academic_years::Migration),
            Box::new(m20250612_000004_create_points_history::Migration),
        ]
    }
}

mod m20250612_000001_create_classes {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Classes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Classes::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Classes::Code).string().not_null())
                        .col(ColumnDef::new(Classes::Name).string().not_null())
                        .col(ColumnDef::new(Classes::Level).string().not_null())
                        .col(ColumnDef::new(Classes::Major).string())
                        .col(ColumnDef::new(Classes::HomeroomTeacherId).uuid())
                        .col(
                            ColumnDef::new(Classes::Capacity)
                                .integer()
                                .not_null()
                                .default(36),
                        )
                        .col(
                            ColumnDef::new(Classes::CurrentTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Classes::AcademicYear).string().not_null())
                        .col(ColumnDef::new(Classes::RoomNumber).string())
                        .col(ColumnDef::new(Classes::Floor).string())
                        .col(ColumnDef::new(Classes::Building).string())
                        .col(
                            ColumnDef::new(Classes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Classes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Classes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Classes::DeletedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(Classes::CreatedBy).string().not_null())
                        .col(ColumnDef::new(Classes::UpdatedBy).string())
                        .to_owned(),
                )
                .await?;

            // Compound natural key: code is only unique within a year
            manager
                .create_index(
                    Index::create()
                        .name("uq_classes_code_academic_year")
                        .table(Classes::Table)
                        .col(Classes::Code)
                        .col(Classes::AcademicYear)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Classes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Classes {
        Table,
        Id,
        Code,
        Name,
        Level,
        Major,
        HomeroomTeacherId,
        Capacity,
        CurrentTotal,
        AcademicYear,
        RoomNumber,
        Floor,
        Building,
        IsActive,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
        CreatedBy,
        UpdatedBy,
    }
}

mod m20250612_000002_create_students {
    use super::*;
    use super::m20250612_000001_create_classes::Classes;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Students::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Students::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(Students::Nisn)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Students::Nis).string())
                        .col(ColumnDef::new(Students::Name).string().not_null())
                        .col(ColumnDef::new(Students::Nickname).string())
                        .col(ColumnDef::new(Students::ClassId).uuid().not_null())
                        .col(ColumnDef::new(Students::ClassName).string().not_null())
                        .col(ColumnDef::new(Students::ClassLevel).string().not_null())
                        .col(ColumnDef::new(Students::ClassMajor).string())
                        .col(ColumnDef::new(Students::Gender).string().not_null())
                        .col(ColumnDef::new(Students::BirthPlace).string().not_null())
                        .col(ColumnDef::new(Students::BirthDate).date().not_null())
                        .col(ColumnDef::new(Students::Religion).string().not_null())
                        .col(ColumnDef::new(Students::BloodType).string())
                        .col(ColumnDef::new(Students::Address).string().not_null())
                        .col(ColumnDef::new(Students::City).string().not_null())
                        .col(ColumnDef::new(Students::Province).string().not_null())
                        .col(ColumnDef::new(Students::Phone).string())
                        .col(ColumnDef::new(Students::Email).string())
                        .col(ColumnDef::new(Students::PhotoUrl).string())
                        .col(ColumnDef::new(Students::ParentId).uuid())
                        .col(ColumnDef::new(Students::HomeroomTeacherId).uuid())
                        .col(ColumnDef::new(Students::AcademicYear).string().not_null())
                        .col(ColumnDef::new(Students::EntryYear).string().not_null())
                        .col(ColumnDef::new(Students::EntryDate).date().not_null())
                        .col(
                            ColumnDef::new(Students::Status)
                                .string()
                                .not_null()
                                .default("ACTIVE"),
                        )
                        .col(
                            ColumnDef::new(Students::PositivePoints)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Students::NegativePoints)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Students::TotalPoints)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Students::CurrentRank).integer())
                        .col(
                            ColumnDef::new(Students::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Students::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Students::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Students::DeletedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(Students::CreatedBy).string().not_null())
                        .col(ColumnDef::new(Students::UpdatedBy).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_students_class")
                                .from(Students::Table, Students::ClassId)
                                .to(Classes::Table, Classes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_students_class_id")
                        .table(Students::Table)
                        .col(Students::ClassId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Students::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Students {
        Table,
        Id,
        UserId,
        Nisn,
        Nis,
        Name,
        Nickname,
        ClassId,
        ClassName,
        ClassLevel,
        ClassMajor,
        Gender,
        BirthPlace,
        BirthDate,
        Religion,
        BloodType,
        Address,
        City,
        Province,
        Phone,
        Email,
        PhotoUrl,
        ParentId,
        HomeroomTeacherId,
        AcademicYear,
        EntryYear,
        EntryDate,
        Status,
        PositivePoints,
        NegativePoints,
        TotalPoints,
        CurrentRank,
        IsActive,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
        CreatedBy,
        UpdatedBy,
    }
}

mod m20250612_000003_create_academic_years {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AcademicYears::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AcademicYears::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(AcademicYears::Year)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(AcademicYears::StartDate).date().not_null())
                        .col(ColumnDef::new(AcademicYears::EndDate).date().not_null())
                        .col(
                            ColumnDef::new(AcademicYears::Semester1Start)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AcademicYears::Semester1End).date().not_null())
                        .col(
                            ColumnDef::new(AcademicYears::Semester2Start)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AcademicYears::Semester2End).date().not_null())
                        .col(
                            ColumnDef::new(AcademicYears::IsActive)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(AcademicYears::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(AcademicYears::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AcademicYears {
        Table,
        Id,
        Year,
        StartDate,
        EndDate,
        Semester1Start,
        Semester1End,
        Semester2Start,
        Semester2End,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250612_000004_create_points_history {
    use super::*;
    use super::m20250612_000002_create_students::Students;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PointsHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PointsHistory::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PointsHistory::StudentId).uuid().not_null())
                        .col(ColumnDef::new(PointsHistory::Points).integer().not_null())
                        .col(ColumnDef::new(PointsHistory::Kind).string().not_null())
                        .col(ColumnDef::new(PointsHistory::Description).string())
                        .col(
                            ColumnDef::new(PointsHistory::RecordedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(PointsHistory::RecordedBy).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_points_history_student")
                                .from(PointsHistory::Table, PointsHistory::StudentId)
                                .to(Students::Table, Students::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_points_history_student_id")
                        .table(PointsHistory::Table)
                        .col(PointsHistory::StudentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PointsHistory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PointsHistory {
        Table,
        Id,
        StudentId,
        Points,
        Kind,
        Description,
        RecordedAt,
        RecordedBy,
    }
}
