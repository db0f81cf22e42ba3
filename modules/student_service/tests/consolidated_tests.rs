//! Consolidated profile tests: concurrent peer fan-out with per-source
//! failure isolation and placeholder defaults.

use student_service::contract::*;
use uuid::Uuid;

mod common;
use common::TestSchool;

fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Seed a student with stored point totals so the profile echo is visible
async fn enrolled_with_points(school: &TestSchool) -> Student {
    let student = school
        .enroll("Andi Pratama", "0051234567", school.class_a.id)
        .await;
    school.peers.set_violations(student.id, &[5, 10]);
    school.peers.set_achievements(student.id, &[20]);
    school
        .service
        .sync_student_points(student.id)
        .await
        .unwrap();
    student
}

#[tokio::test]
async fn all_peers_up_fills_every_section() {
    print_test_header(
        "all_peers_up_fills_every_section",
        &[
            "Monitoring reflects the schedule peer",
            "Violation/achievement sections carry at most 5 latest events",
        ],
    );

    let school = TestSchool::new();
    let student = enrolled_with_points(&school).await;

    school.peers.set_schedule("IN_CLASS", Some("Matematika"));
    // Seven events on the wire, only five may surface
    school
        .peers
        .set_violations(student.id, &[1, 2, 3, 4, 5, 6, 7]);

    let profile = school
        .service
        .consolidated_profile(student.id)
        .await
        .unwrap();

    assert_eq!(profile.profile.id, student.id);
    assert_eq!(profile.monitoring.current_class_status, "IN_CLASS");
    assert_eq!(
        profile.monitoring.active_lesson,
        Some("Matematika".to_string())
    );
    assert_eq!(profile.violations.latest.len(), 5);
    assert_eq!(profile.achievements.latest.len(), 1);
    // Totals echo the student's stored points, not the fetched window
    assert_eq!(profile.violations.total_points, 15);
    assert_eq!(profile.achievements.total_points, 20);
    assert!(profile.class.is_some());
}

#[tokio::test]
async fn all_peers_down_still_returns_the_base_profile() {
    print_test_header(
        "all_peers_down_still_returns_the_base_profile",
        &[
            "Peer unavailability never fails the aggregation",
            "Unpopulated sections keep their placeholder defaults",
        ],
    );

    let school = TestSchool::new();
    let student = enrolled_with_points(&school).await;
    school.peers.all_peers_down();

    let profile = school
        .service
        .consolidated_profile(student.id)
        .await
        .unwrap();

    // Placeholders throughout
    assert_eq!(profile.monitoring.current_class_status, "UNKNOWN");
    assert!(profile.monitoring.active_lesson.is_none());
    assert!(profile.violations.latest.is_empty());
    assert!(profile.achievements.latest.is_empty());

    // The student's own record is intact
    assert_eq!(profile.profile.id, student.id);
    assert_eq!(profile.profile.name, "Andi Pratama");
    assert_eq!(profile.violations.total_points, 15);
    assert_eq!(profile.achievements.total_points, 20);
    assert_eq!(profile.profile.total_points, 5);
}

#[tokio::test]
async fn single_peer_failure_only_degrades_its_section() {
    let school = TestSchool::new();
    let student = enrolled_with_points(&school).await;

    // Schedule down, the other two healthy
    *school.peers.schedule_down.write() = true;

    let profile = school
        .service
        .consolidated_profile(student.id)
        .await
        .unwrap();

    assert_eq!(profile.monitoring.current_class_status, "UNKNOWN");
    assert_eq!(profile.violations.latest.len(), 2);
    assert_eq!(profile.achievements.latest.len(), 1);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let school = TestSchool::new();
    school.peers.set_schedule("IN_CLASS", None);

    let result = school.service.consolidated_profile(Uuid::new_v4()).await;

    assert!(matches!(result, Err(StudentsError::NotFound { .. })));
}

#[tokio::test]
async fn withdrawn_student_is_not_found() {
    let school = TestSchool::new();
    let student = enrolled_with_points(&school).await;
    school
        .service
        .withdraw(student.id, &Actor::System)
        .await
        .unwrap();

    let result = school.service.consolidated_profile(student.id).await;

    assert!(matches!(result, Err(StudentsError::NotFound { .. })));
}
