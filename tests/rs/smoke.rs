//! Integration smoke tests for `check_my_grade`

use check_my_grade::core::models::Student;
use check_my_grade::core::storage::DataStore;
use check_my_grade::{get_version, Registry};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn fresh_directory_loads_empty_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::load(DataStore::new(dir.path().join("data")));
    assert!(registry.students().is_empty());
    assert!(registry.courses().is_empty());
    assert!(registry.professors().is_empty());
    assert!(registry.users().is_empty());
}

#[test]
fn first_mutation_creates_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let mut registry = Registry::load(DataStore::new(&data));
    let student = Student::new("a@b.c".into(), "A".into(), "B".into()).unwrap();
    registry.add_student(student, "pw").unwrap();

    for file in ["students.csv", "courses.csv", "professors.csv", "login.csv"] {
        assert!(data.join(file).exists(), "{file} missing");
    }
}
