//! Student model

use super::Grade;
use crate::core::error::ModelError;
use std::fmt::{self, Write};

/// A student's standing in one course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Course code (e.g., "DATA200")
    pub course_code: String,
    /// Numeric marks; not range checked
    pub marks: i32,
    /// Letter grade, normally derived from `marks`
    pub grade: Grade,
}

impl Enrollment {
    /// Create an enrollment with the grade derived from `marks`
    #[must_use]
    pub fn new(course_code: String, marks: i32) -> Self {
        Self {
            course_code,
            marks,
            grade: Grade::from_marks(marks),
        }
    }
}

/// Represents a student, identified by email address
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Email address (unique identifier)
    pub email_address: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Enrollments in insertion order, at most one per course code
    enrollments: Vec<Enrollment>,
}

impl Student {
    /// Create a student with no enrollments
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyField`] if the email address is empty
    pub fn new(
        email_address: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, ModelError> {
        if email_address.trim().is_empty() {
            return Err(ModelError::EmptyField("Email address"));
        }
        Ok(Self {
            email_address,
            first_name,
            last_name,
            enrollments: Vec::new(),
        })
    }

    /// Full display name
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Enrollments in insertion order
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Look up the enrollment for a course
    #[must_use]
    pub fn enrollment(&self, course_code: &str) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.course_code == course_code)
    }

    /// Whether the student is enrolled in a course
    #[must_use]
    pub fn is_enrolled(&self, course_code: &str) -> bool {
        self.enrollment(course_code).is_some()
    }

    /// Enroll in a course with the given marks
    ///
    /// # Returns
    /// `false` (and no change) if already enrolled
    pub fn add_course(&mut self, course_code: String, marks: i32) -> bool {
        self.push_enrollment(Enrollment::new(course_code, marks))
    }

    /// Enroll in a course with zero marks (grade F)
    pub fn enroll(&mut self, course_code: String) -> bool {
        self.add_course(course_code, 0)
    }

    /// Append a fully formed enrollment, keeping its stored grade
    ///
    /// Used when loading persisted rows whose grade letters must survive untouched.
    ///
    /// # Returns
    /// `false` (and no change) if the course is already present
    pub fn push_enrollment(&mut self, enrollment: Enrollment) -> bool {
        if self.is_enrolled(&enrollment.course_code) {
            return false;
        }
        self.enrollments.push(enrollment);
        true
    }

    /// Drop the enrollment for a course
    ///
    /// # Returns
    /// `false` if the student was not enrolled
    pub fn remove_course(&mut self, course_code: &str) -> bool {
        match self.position(course_code) {
            Some(idx) => {
                self.enrollments.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Overwrite the marks for a course and recompute its grade
    ///
    /// # Returns
    /// `false` if the student was not enrolled
    pub fn update_marks(&mut self, course_code: &str, new_marks: i32) -> bool {
        let Some(idx) = self.position(course_code) else {
            return false;
        };
        let enrollment = &mut self.enrollments[idx];
        enrollment.marks = new_marks;
        enrollment.grade = Grade::from_marks(new_marks);
        true
    }

    /// Change the display name
    pub fn rename(&mut self, first_name: String, last_name: String) {
        self.first_name = first_name;
        self.last_name = last_name;
    }

    /// Arithmetic mean of all marks, 0 with no enrollments
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_marks(&self) -> f64 {
        if self.enrollments.is_empty() {
            return 0.0;
        }
        let total: i64 = self.enrollments.iter().map(|e| i64::from(e.marks)).sum();
        total as f64 / self.enrollments.len() as f64
    }

    /// Mean grade points over all enrollments, 0.0 with no enrollments
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gpa(&self) -> f64 {
        if self.enrollments.is_empty() {
            return 0.0;
        }
        let total: f64 = self.enrollments.iter().map(|e| e.grade.points()).sum();
        total / self.enrollments.len() as f64
    }

    /// Per-course grade listing
    #[must_use]
    pub fn grades_summary(&self) -> String {
        self.listing("Grades", |e| e.grade.to_string())
    }

    /// Per-course marks listing
    #[must_use]
    pub fn marks_summary(&self) -> String {
        self.listing("Marks", |e| e.marks.to_string())
    }

    fn listing(&self, title: &str, value: impl Fn(&Enrollment) -> String) -> String {
        let mut out = format!("{title} for {}:\n", self.full_name());
        if self.enrollments.is_empty() {
            out.push_str("  No courses enrolled\n");
        }
        for e in &self.enrollments {
            let _ = writeln!(out, "  {}: {}", e.course_code, value(e));
        }
        out
    }

    fn position(&self, course_code: &str) -> Option<usize> {
        self.enrollments
            .iter()
            .position(|e| e.course_code == course_code)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "Student Email: {}", self.email_address)?;
        writeln!(f, "Name: {}", self.full_name())?;
        writeln!(f, "Courses Enrolled: {}", self.enrollments.len())?;
        for e in &self.enrollments {
            writeln!(f, "  {}: Grade {}, Marks {}", e.course_code, e.grade, e.marks)?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new(
            "test@test.com".to_string(),
            "Test".to_string(),
            "User".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_student_creation() {
        let s = student();
        assert_eq!(s.email_address, "test@test.com");
        assert_eq!(s.full_name(), "Test User");
        assert!(s.enrollments().is_empty());
    }

    #[test]
    fn test_empty_email_rejected() {
        let err = Student::new(String::new(), "A".to_string(), "B".to_string()).unwrap_err();
        assert_eq!(err, ModelError::EmptyField("Email address"));
        assert!(Student::new("  ".to_string(), String::new(), String::new()).is_err());
    }

    #[test]
    fn test_add_course_computes_grade() {
        let mut s = student();
        assert!(s.add_course("DATA200".to_string(), 85));
        let e = s.enrollment("DATA200").unwrap();
        assert_eq!(e.marks, 85);
        assert_eq!(e.grade, Grade::B);
    }

    #[test]
    fn test_add_course_twice_is_noop() {
        let mut s = student();
        assert!(s.add_course("DATA200".to_string(), 85));
        assert!(!s.add_course("DATA200".to_string(), 40));
        assert_eq!(s.enrollments().len(), 1);
        assert_eq!(s.enrollment("DATA200").unwrap().marks, 85);
    }

    #[test]
    fn test_enroll_defaults_to_zero() {
        let mut s = student();
        assert!(s.enroll("CS146".to_string()));
        let e = s.enrollment("CS146").unwrap();
        assert_eq!(e.marks, 0);
        assert_eq!(e.grade, Grade::F);
    }

    #[test]
    fn test_add_then_remove_restores_record() {
        let mut s = student();
        s.add_course("CS146".to_string(), 72);
        let before = s.clone();

        s.add_course("DATA200".to_string(), 91);
        assert!(s.remove_course("DATA200"));
        assert_eq!(s, before);
        assert!(!s.remove_course("DATA200"));
    }

    #[test]
    fn test_update_marks_keeps_order() {
        let mut s = student();
        s.add_course("A1".to_string(), 50);
        s.add_course("B2".to_string(), 60);
        s.add_course("C3".to_string(), 70);

        assert!(s.update_marks("B2", 95));
        let codes: Vec<&str> = s.enrollments().iter().map(|e| e.course_code.as_str()).collect();
        assert_eq!(codes, ["A1", "B2", "C3"]);
        assert_eq!(s.enrollment("B2").unwrap().grade, Grade::A);
        assert_eq!(s.enrollment("A1").unwrap().marks, 50);
        assert!(!s.update_marks("Z9", 10));
    }

    #[test]
    fn test_average_and_gpa() {
        let mut s = student();
        assert!(s.average_marks().abs() < f64::EPSILON);
        assert!(s.gpa().abs() < f64::EPSILON);

        s.add_course("DATA200".to_string(), 90);
        s.add_course("CS146".to_string(), 80);
        assert!((s.average_marks() - 85.0).abs() < f64::EPSILON);
        assert!((s.gpa() - 3.5).abs() < f64::EPSILON);

        s.add_course("CS149".to_string(), 70);
        assert!((s.average_marks() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_grade_counts_zero() {
        let mut s = student();
        s.push_enrollment(Enrollment {
            course_code: "X".to_string(),
            marks: 95,
            grade: Grade::Other("P".to_string()),
        });
        s.add_course("Y".to_string(), 95);
        assert!((s.gpa() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summaries() {
        let mut s = student();
        assert!(s.grades_summary().contains("No courses enrolled"));
        s.add_course("DATA200".to_string(), 65);
        assert!(s.grades_summary().contains("DATA200: D"));
        assert!(s.marks_summary().contains("DATA200: 65"));
        assert!(s.to_string().contains("DATA200: Grade D, Marks 65"));
    }
}
