//! Integration tests for the CSV tables.

use check_my_grade::core::models::{
    Course, Grade, LoginUser, Professor, Role, Student, DEFAULT_CREDITS,
};
use check_my_grade::core::storage::DataStore;
use check_my_grade::StorageError;
use std::fs;

fn student(email: &str, courses: &[(&str, i32)]) -> Student {
    let mut s = Student::new(email.to_string(), "First".to_string(), "Last".to_string()).unwrap();
    for (code, marks) in courses {
        s.add_course((*code).to_string(), *marks);
    }
    s
}

#[test]
fn students_round_trip_including_empty_enrollments() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    let mut students: Vec<Student> = (0..50)
        .map(|i| student(&format!("s{i}@x.edu"), &[("DATA200", 40 + i), ("CS146", 95 - i)]))
        .collect();
    students.push(student("none@x.edu", &[]));
    let mut quoted = student("q@x.edu", &[("MATH161", 88)]);
    quoted.rename("Anne, Marie".to_string(), "O\"Neil".to_string());
    students.push(quoted);

    store.save_all(&students).unwrap();
    let loaded: Vec<Student> = store.load_all();

    assert_eq!(loaded, students);
    let none = loaded.iter().find(|s| s.email_address == "none@x.edu").unwrap();
    assert!(none.enrollments().is_empty());
    assert!((none.average_marks() - 0.0).abs() < f64::EPSILON);
}

#[test]
fn grades_column_holds_letters() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    store.save_all(&[student("a@x.edu", &[("A1", 91), ("B1", 59)])]).unwrap();

    let text = fs::read_to_string(dir.path().join("students.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("email_address,first_name,last_name,courses,grades,marks")
    );
    assert_eq!(lines.next(), Some("a@x.edu,First,Last,\"A1,B1\",\"A,F\",\"91,59\""));
}

#[test]
fn bad_row_keeps_rows_before_it() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("students.csv"),
        "email_address,first_name,last_name,courses,grades,marks\n\
         a@x.edu,A,One,DATA200,A,95\n\
         b@x.edu,B,Two,DATA200,B,eighty\n\
         c@x.edu,C,Three,,,\n",
    )
    .unwrap();

    let load = store.read::<Student>();
    assert_eq!(load.records.len(), 1);
    assert!(matches!(load.error, Some(StorageError::InvalidField { row: 2, .. })));
    assert_eq!(store.load_all::<Student>().len(), 1);
}

#[test]
fn handwritten_grades_survive_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("students.csv"),
        "email_address,first_name,last_name,courses,grades,marks\n\
         a@x.edu,A,One,\"X1, X2\",\"A+,\",\"75,82\"\n",
    )
    .unwrap();

    let loaded: Vec<Student> = store.load_all();
    let e = loaded[0].enrollments();
    assert_eq!(e[0].course_code, "X1");
    assert_eq!(e[0].grade, Grade::Other("A+".to_string()));
    assert_eq!(e[1].course_code, "X2");
    assert_eq!(e[1].grade, Grade::B);
}

#[test]
fn courses_professors_and_users_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path().join("nested"));

    let courses = vec![
        Course::new("DATA200".into(), "Python".into(), 3, "Intro, with commas".into()).unwrap(),
        Course::new("PHYS50".into(), "Physics".into(), 4, String::new()).unwrap(),
    ];
    let professors = vec![Professor::new(
        "p@x.edu".into(),
        "Pat".into(),
        "pat@x.edu".into(),
        "Professor".into(),
        vec!["DATA200".into(), "PHYS50".into()],
    )
    .unwrap()];
    let users = vec![
        LoginUser::new("a@x.edu".into(), "secret", Role::Admin).unwrap(),
        LoginUser::new("pat@x.edu".into(), "other", Role::Professor).unwrap(),
    ];

    store.save_all(&courses).unwrap();
    store.save_all(&professors).unwrap();
    store.save_all(&users).unwrap();

    assert_eq!(store.load_all::<Course>(), courses);
    assert_eq!(store.load_all::<Professor>(), professors);
    let loaded_users: Vec<LoginUser> = store.load_all();
    assert_eq!(loaded_users.len(), 2);
    assert_eq!(loaded_users[0].password_digest(), users[0].password_digest());
    assert_eq!(loaded_users[1].role, Role::Professor);
}

#[test]
fn login_state_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    let mut user = LoginUser::new("a@x.edu".into(), "pw", Role::Student).unwrap();
    assert!(user.login("pw"));
    store.save_all(&[user]).unwrap();

    let loaded: Vec<LoginUser> = store.load_all();
    assert!(!loaded[0].is_logged_in());
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    store
        .save_all(&[student("a@x.edu", &[]), student("b@x.edu", &[])])
        .unwrap();
    store.save_all(&[student("c@x.edu", &[])]).unwrap();

    let loaded: Vec<Student> = store.load_all();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].email_address, "c@x.edu");
}

#[test]
fn blank_grade_token_keeps_later_grades_aligned() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("students.csv"),
        "email_address,first_name,last_name,courses,grades,marks\n\
         a@x.edu,A,One,\"X,Y,Z\",\"A,,C\",\"95,85,75\"\n",
    )
    .unwrap();

    let loaded: Vec<Student> = store.load_all();
    let e = loaded[0].enrollments();
    assert_eq!(e.len(), 3);
    assert_eq!((e[0].course_code.as_str(), e[0].grade.clone()), ("X", Grade::A));
    assert_eq!((e[1].course_code.as_str(), e[1].grade.clone()), ("Y", Grade::B));
    assert_eq!((e[2].course_code.as_str(), e[2].grade.clone()), ("Z", Grade::C));
}

#[test]
fn comma_in_course_code_never_reaches_disk() {
    assert!(Course::new("CS,146".into(), "DSA".into(), 3, String::new()).is_err());

    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("courses.csv"),
        "course_id,course_name,credits,description\n CS146 ,DSA,3,\n",
    )
    .unwrap();
    let loaded: Vec<Course> = store.load_all();
    assert_eq!(loaded[0].course_id, "CS146");
}

#[test]
fn unparsable_or_blank_credits_load_as_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("courses.csv"),
        "course_id,course_name,credits,description\n\
         A,a,abc,d\n\
         B,b,,\n\
         C,c,4,\n",
    )
    .unwrap();

    let load = store.read::<Course>();
    assert!(load.error.is_none());
    let credits: Vec<(&str, u32)> = load
        .records
        .iter()
        .map(|c| (c.course_id.as_str(), c.credits))
        .collect();
    assert_eq!(credits, [("A", DEFAULT_CREDITS), ("B", DEFAULT_CREDITS), ("C", 4)]);
    assert_eq!(load.records[0].description, "d");
    assert_eq!(load.records[1].description, "");
}

#[test]
fn optional_columns_may_be_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());
    fs::write(
        dir.path().join("courses.csv"),
        "course_id,course_name,description\nA,a,first\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("login.csv"),
        "email_id,password\nu@x.edu,c29tZWRpZ2VzdA==\n",
    )
    .unwrap();

    let courses: Vec<Course> = store.load_all();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].credits, DEFAULT_CREDITS);
    assert_eq!(courses[0].description, "first");

    let users: Vec<LoginUser> = store.load_all();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Student);
}
