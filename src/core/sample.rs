//! Random sample data for trying out the menus and timing search/sort

use crate::core::models::{Course, LoginUser, Role, Student};
use crate::core::stats;
use rand::seq::SliceRandom;
use rand::Rng;

/// Password given to every generated login
pub const SAMPLE_PASSWORD: &str = "password123";

/// Students generated when no count is given
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Barbara", "David", "Elizabeth", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Lisa", "Matthew", "Betty", "Anthony", "Margaret", "Mark",
    "Sandra", "Steven", "Emily", "Andrew", "Donna", "Kevin", "Carol", "Brian", "Amanda", "Eric",
    "Anna", "Scott", "Helen",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Lopez", "Wilson", "Anderson", "Taylor", "Moore", "Jackson", "Martin", "Lee",
    "Perez", "White", "Harris", "Clark", "Lewis", "Walker", "Young", "Allen", "King", "Wright",
    "Nguyen", "Hill", "Green", "Adams", "Baker", "Hall", "Carter", "Evans", "Turner", "Parker",
    "Cook", "Kim",
];

/// Catalogue the generated students enroll in: (code, name, credits)
const CATALOGUE: &[(&str, &str, u32)] = &[
    ("DATA200", "Python for Data Analytics", 3),
    ("CS146", "Data Structures and Algorithms", 3),
    ("CS149", "Operating Systems", 3),
    ("MATH161", "Applied Probability and Statistics", 3),
    ("PHYS50", "General Physics", 4),
    ("ENGL1A", "First-Year Writing", 3),
];

/// Generated records, not yet added to a registry
#[derive(Debug, Clone, Default)]
pub struct SampleData {
    /// Fixed course catalogue
    pub courses: Vec<Course>,
    /// Random students
    pub students: Vec<Student>,
    /// One `student` login per generated student
    pub users: Vec<LoginUser>,
}

impl SampleData {
    /// Total enrollments across all students
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.students.iter().map(|s| s.enrollments().len()).sum()
    }

    /// Mean of every generated mark
    #[must_use]
    pub fn mean_marks(&self) -> Option<f64> {
        let pool: Vec<i32> = self
            .students
            .iter()
            .flat_map(|s| s.enrollments().iter().map(|e| e.marks))
            .collect();
        stats::mean(&pool)
    }
}

/// Generate `count` students using `rng`
///
/// Emails are `first.last{i}@mycsu.edu`, so they are unique within one batch.
/// Each student takes 1 to 5 distinct catalogue courses with marks from 60 to 100.
#[must_use]
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> SampleData {
    let courses = CATALOGUE
        .iter()
        .filter_map(|(code, name, credits)| {
            Course::new((*code).to_string(), (*name).to_string(), *credits, String::new()).ok()
        })
        .collect();

    let mut students = Vec::with_capacity(count);
    let mut users = Vec::with_capacity(count);
    for i in 0..count {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Sample");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Student");
        let email = format!("{}.{}{i}@mycsu.edu", first.to_lowercase(), last.to_lowercase());

        let Ok(mut student) = Student::new(email.clone(), first.to_string(), last.to_string())
        else {
            continue;
        };
        let taken = rng.gen_range(1..=5);
        for (code, _, _) in CATALOGUE.choose_multiple(rng, taken) {
            student.add_course((*code).to_string(), rng.gen_range(60..=100));
        }
        if let Ok(user) = LoginUser::new(email, SAMPLE_PASSWORD, Role::Student) {
            users.push(user);
        }
        students.push(student);
    }

    SampleData {
        courses,
        students,
        users,
    }
}
