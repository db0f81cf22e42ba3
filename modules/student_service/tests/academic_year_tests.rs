//! Academic year activation tests: the at-most-one-active invariant.

use student_service::contract::*;
use uuid::Uuid;

mod common;
use common::{sample_year, TestSchool};

fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

async fn active_years(school: &TestSchool) -> Vec<AcademicYear> {
    school
        .service
        .list_academic_years()
        .await
        .unwrap()
        .into_iter()
        .filter(|y| y.is_active)
        .collect()
}

#[tokio::test]
async fn set_active_keeps_at_most_one_year_active() {
    print_test_header(
        "set_active_keeps_at_most_one_year_active",
        &["After any sequence of activations exactly one year is active"],
    );

    let school = TestSchool::new();
    let older = sample_year("2023/2024", false);
    let newer = sample_year("2025/2026", false);
    school.store.years.write().insert(older.id, older.clone());
    school.store.years.write().insert(newer.id, newer.clone());

    let activated = school
        .service
        .set_active_academic_year(newer.id)
        .await
        .unwrap();
    assert!(activated.is_active);

    let active = active_years(&school).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, newer.id);

    // Flip again: still exactly one
    school
        .service
        .set_active_academic_year(older.id)
        .await
        .unwrap();
    let active = active_years(&school).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, older.id);

    let current = school.service.current_academic_year().await.unwrap();
    assert_eq!(current.id, older.id);
}

#[tokio::test]
async fn set_active_with_unknown_id_fails_and_preserves_state() {
    print_test_header(
        "set_active_with_unknown_id_fails_and_preserves_state",
        &[
            "Activating a nonexistent id reports NotFound",
            "and must not leave the system with zero active years",
        ],
    );

    let school = TestSchool::new();

    let result = school
        .service
        .set_active_academic_year(Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(StudentsError::NotFound { .. })));

    // The previously active year is untouched
    let current = school.service.current_academic_year().await.unwrap();
    assert_eq!(current.id, school.year.id);
    assert_eq!(active_years(&school).await.len(), 1);
}

#[tokio::test]
async fn current_year_without_any_active_is_not_found() {
    let school = TestSchool::new();
    if let Some(year) = school.store.years.write().get_mut(&school.year.id) {
        year.is_active = false;
    }

    let result = school.service.current_academic_year().await;

    match result {
        Err(StudentsError::NotFound { resource, .. }) => {
            assert_eq!(resource, "academic_year");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn create_rejects_duplicate_year_string() {
    let school = TestSchool::new();

    let input = NewAcademicYear {
        year: "2024/2025".to_string(),
        start_date: common::date(2024, 7, 15),
        end_date: common::date(2025, 6, 20),
        semester1_start: common::date(2024, 7, 15),
        semester1_end: common::date(2024, 12, 20),
        semester2_start: common::date(2025, 1, 6),
        semester2_end: common::date(2025, 6, 20),
        is_active: false,
    };
    let result = school.service.create_academic_year(input.clone()).await;
    assert!(matches!(result, Err(StudentsError::Conflict { .. })));

    // A fresh year string is accepted and listed newest first
    let created = school
        .service
        .create_academic_year(NewAcademicYear {
            year: "2025/2026".to_string(),
            ..input
        })
        .await
        .unwrap();
    assert!(!created.is_active);

    let years = school.service.list_academic_years().await.unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].year, "2025/2026");
    assert_eq!(years[1].year, "2024/2025");
}

#[tokio::test]
async fn create_rejects_malformed_year_pattern() {
    let school = TestSchool::new();

    let input = NewAcademicYear {
        year: "2026".to_string(),
        start_date: common::date(2026, 7, 15),
        end_date: common::date(2027, 6, 20),
        semester1_start: common::date(2026, 7, 15),
        semester1_end: common::date(2026, 12, 20),
        semester2_start: common::date(2027, 1, 6),
        semester2_end: common::date(2027, 6, 20),
        is_active: false,
    };

    let result = school.service.create_academic_year(input).await;

    match result {
        Err(StudentsError::Validation { message }) => {
            assert_eq!(message, "year must match YYYY/YYYY");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
