//! Points/ranking sync tests: peer aggregation, dense-rank ties,
//! idempotency and per-student failure isolation of the batch sweep.

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

fn points_of(school: &TestSchool, id: Uuid) -> (i32, i32, i32, Option<i32>) {
    let student = school.store.student(id).unwrap_or_else(|| {
        panic!("student {id} missing from store");
    });
    (
        student.positive_points,
        student.negative_points,
        student.total_points,
        student.current_rank,
    )
}

#[tokio::test]
async fn sync_one_aggregates_peer_events_and_ranks() {
    print_test_header(
        "sync_one_aggregates_peer_events_and_ranks",
        &[
            "positive/negative points are the sums of peer event magnitudes",
            "totalPoints = positive - negative; rank is 1 for a lone student",
        ],
    );

    let school = TestSchool::new();
    let student = school
        .enroll("Andi Pratama", "0051234567", school.class_a.id)
        .await;

    school.peers.set_violations(student.id, &[5, 10]);
    school.peers.set_achievements(student.id, &[20, 5]);

    school
        .service
        .sync_student_points(student.id)
        .await
        .unwrap();

    let (positive, negative, total, rank) = points_of(&school, student.id);
    assert_eq!(positive, 25);
    assert_eq!(negative, 15);
    assert_eq!(total, 10);
    assert_eq!(rank, Some(1));
}

#[tokio::test]
async fn rank_orders_by_total_points_with_shared_ranks_for_ties() {
    print_test_header(
        "rank_orders_by_total_points_with_shared_ranks_for_ties",
        &[
            "Strictly greater totals rank strictly better",
            "Equal totals share a rank (count-based, not sequential)",
        ],
    );

    let school = TestSchool::new();
    let a = school
        .enroll("Agus Salim", "0051110001", school.class_a.id)
        .await;
    let b = school
        .enroll("Bambang Tri", "0051110002", school.class_a.id)
        .await;
    let c = school
        .enroll("Cahya Ningrum", "0051110003", school.class_a.id)
        .await;
    let d = school
        .enroll("Dian Lestari", "0051110004", school.class_a.id)
        .await;
    // Another class must not influence ranking
    let other = school
        .enroll("Eka Putri", "0051110005", school.class_b.id)
        .await;

    school.peers.set_achievements(a.id, &[30]);
    school.peers.set_achievements(b.id, &[20]);
    school.peers.set_achievements(c.id, &[20]);
    school.peers.set_achievements(d.id, &[10]);
    school.peers.set_achievements(other.id, &[100]);

    let summary = school.service.sync_all_students().await.unwrap();
    assert_eq!(summary.synced, 5);
    assert_eq!(summary.failed, 0);

    assert_eq!(points_of(&school, a.id).3, Some(1));
    assert_eq!(points_of(&school, b.id).3, Some(2));
    assert_eq!(points_of(&school, c.id).3, Some(2));
    assert_eq!(points_of(&school, d.id).3, Some(4));
    // Alone in its class, regardless of the bigger total
    assert_eq!(points_of(&school, other.id).3, Some(1));
}

#[tokio::test]
async fn sync_all_is_idempotent_on_a_stable_event_source() {
    print_test_header(
        "sync_all_is_idempotent_on_a_stable_event_source",
        &["Two consecutive sweeps with no new events yield identical state"],
    );

    let school = TestSchool::new();
    let a = school
        .enroll("Fajar Nugraha", "0051110006", school.class_a.id)
        .await;
    let b = school
        .enroll("Gita Permata", "0051110007", school.class_a.id)
        .await;

    school.peers.set_violations(a.id, &[5]);
    school.peers.set_achievements(a.id, &[15]);
    school.peers.set_achievements(b.id, &[25]);

    // First sweep brings totals from their initial zeros to steady state
    school.service.sync_all_students().await.unwrap();

    school.service.sync_all_students().await.unwrap();
    let first = (points_of(&school, a.id), points_of(&school, b.id));

    school.service.sync_all_students().await.unwrap();
    let second = (points_of(&school, a.id), points_of(&school, b.id));

    assert_eq!(first, second);
    assert_eq!(points_of(&school, a.id).2, 10);
    assert_eq!(points_of(&school, b.id).2, 25);
    assert_eq!(points_of(&school, b.id).3, Some(1));
    assert_eq!(points_of(&school, a.id).3, Some(2));
}

#[tokio::test]
async fn sync_all_isolates_per_student_failures() {
    print_test_header(
        "sync_all_isolates_per_student_failures",
        &["One unreachable student's sync is logged and skipped, the sweep continues"],
    );

    let school = TestSchool::new();
    let ok1 = school
        .enroll("Hadi Wijaya", "0051110008", school.class_a.id)
        .await;
    let broken = school
        .enroll("Indra Kusuma", "0051110009", school.class_a.id)
        .await;
    let ok2 = school
        .enroll("Joko Susilo", "0051110010", school.class_a.id)
        .await;

    school.peers.set_achievements(ok1.id, &[10]);
    school.peers.set_achievements(ok2.id, &[5]);
    school.peers.fail_student(broken.id);

    let summary = school.service.sync_all_students().await.unwrap();

    assert_eq!(summary.synced, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(points_of(&school, ok1.id).2, 10);
    assert_eq!(points_of(&school, ok2.id).2, 5);
    // The failed student keeps its pre-sweep state
    assert_eq!(points_of(&school, broken.id).2, 0);
    assert_eq!(points_of(&school, broken.id).3, None);
}

#[tokio::test]
async fn sync_one_is_a_silent_noop_for_unknown_students() {
    let school = TestSchool::new();

    let result = school.service.sync_student_points(Uuid::new_v4()).await;

    assert!(result.is_ok());
    assert!(school.store.students.read().is_empty());
}

#[tokio::test]
async fn withdrawn_classmates_do_not_outrank() {
    print_test_header(
        "withdrawn_classmates_do_not_outrank",
        &["Rank counts only active, non-deleted classmates"],
    );

    let school = TestSchool::new();
    let survivor = school
        .enroll("Kartika Sari", "0051110011", school.class_a.id)
        .await;
    let withdrawn = school
        .enroll("Lukman Hakim", "0051110012", school.class_a.id)
        .await;

    school.peers.set_achievements(survivor.id, &[5]);
    school.peers.set_achievements(withdrawn.id, &[50]);
    school
        .service
        .sync_student_points(withdrawn.id)
        .await
        .unwrap();
    school
        .service
        .sync_student_points(survivor.id)
        .await
        .unwrap();
    assert_eq!(points_of(&school, survivor.id).3, Some(2));

    school
        .service
        .withdraw(withdrawn.id, &Actor::System)
        .await
        .unwrap();
    school
        .service
        .sync_student_points(survivor.id)
        .await
        .unwrap();

    assert_eq!(points_of(&school, survivor.id).3, Some(1));
}
