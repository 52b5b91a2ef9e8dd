//! Integration tests for registry commands against a real data directory.

use check_my_grade::core::models::{Course, LoginUser, Professor, Role, Student};
use check_my_grade::core::registry::{SortKey, SortOrder};
use check_my_grade::core::sample::{self, SAMPLE_PASSWORD};
use check_my_grade::core::storage::DataStore;
use check_my_grade::{Registry, RegistryError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::TempDir;

fn sample_registry(count: usize) -> (TempDir, Registry) {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = Registry::new(DataStore::new(dir.path()));
    let data = sample::generate(count, &mut StdRng::seed_from_u64(42));
    assert_eq!(registry.import(data).unwrap(), count);
    (dir, registry)
}

#[test]
fn search_by_unique_email_finds_one_student() {
    let (_dir, registry) = sample_registry(1000);
    let target = registry.students()[517].email_address.clone();

    let hits = registry.search_students(&target.to_uppercase());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email_address, target);
}

#[test]
fn sorting_thousand_students_by_average_descending() {
    let (_dir, mut registry) = sample_registry(1000);
    registry.sort_students(SortKey::AverageMarks, SortOrder::Descending);

    let averages: Vec<f64> = registry.students().iter().map(Student::average_marks).collect();
    assert_eq!(averages.len(), 1000);
    assert!(averages.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn sorting_by_email_ascending() {
    let (_dir, mut registry) = sample_registry(200);
    registry.sort_students(SortKey::Email, SortOrder::Ascending);
    let emails: Vec<&str> = registry
        .students()
        .iter()
        .map(|s| s.email_address.as_str())
        .collect();
    assert!(emails.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn imported_data_reloads_from_disk() {
    let (dir, registry) = sample_registry(100);
    let reloaded = Registry::load(DataStore::new(dir.path()));

    assert_eq!(reloaded.students(), registry.students());
    assert_eq!(reloaded.courses(), registry.courses());
    assert_eq!(reloaded.users().len(), 100);
}

#[test]
fn sample_logins_work_after_reload() {
    let (dir, registry) = sample_registry(5);
    let email = registry.students()[0].email_address.clone();

    let mut reloaded = Registry::load(DataStore::new(dir.path()));
    let user = reloaded.login(&email, SAMPLE_PASSWORD).unwrap();
    assert_eq!(user.role, Role::Student);
}

#[test]
fn reimport_skips_existing_students() {
    let (_dir, mut registry) = sample_registry(10);
    let again = sample::generate(10, &mut StdRng::seed_from_u64(42));
    assert_eq!(registry.import(again).unwrap(), 0);
    assert_eq!(registry.students().len(), 10);
}

#[test]
fn every_mutation_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = Registry::new(DataStore::new(dir.path()));

    registry
        .add_course(Course::new("DATA200".into(), "Python".into(), 3, String::new()).unwrap())
        .unwrap();
    registry
        .add_student(
            Student::new("sam@x.edu".into(), "Sam".into(), "Carter".into()).unwrap(),
            "pw",
        )
        .unwrap();
    registry.enroll_student("sam@x.edu", "DATA200", 96).unwrap();
    registry
        .add_professor(
            Professor::new(
                "micheal@x.edu".into(),
                "Micheal John".into(),
                "mj@x.edu".into(),
                "Senior Professor".into(),
                vec!["DATA200".into()],
            )
            .unwrap(),
            "prof",
        )
        .unwrap();
    registry
        .add_user(LoginUser::new("admin@x.edu".into(), "root", Role::Admin).unwrap())
        .unwrap();

    let reloaded = Registry::load(DataStore::new(dir.path()));
    let sam = reloaded.find_student("sam@x.edu").unwrap();
    assert_eq!(sam.enrollment("DATA200").unwrap().marks, 96);
    assert_eq!(reloaded.find_professor("micheal@x.edu").unwrap().course_ids(), ["DATA200"]);
    assert_eq!(reloaded.users().len(), 3);
    assert_eq!(reloaded.find_user("mj@x.edu").unwrap().role, Role::Professor);

    let login = fs::read_to_string(dir.path().join("login.csv")).unwrap();
    assert!(!login.contains("root"));
}

#[test]
fn reports_reflect_registry_contents() {
    let (_dir, registry) = sample_registry(50);
    let report = registry.course_report("DATA200").unwrap();
    let enrolled = registry
        .students()
        .iter()
        .filter(|s| s.is_enrolled("DATA200"))
        .count();
    assert_eq!(report.entries.len(), enrolled);

    assert!(matches!(
        registry.course_report("NOPE"),
        Err(RegistryError::CourseNotFound(_))
    ));
    let stats = registry.statistics().unwrap();
    assert!(stats.min >= 60 && stats.max <= 100);
}
