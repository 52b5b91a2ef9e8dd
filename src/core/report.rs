//! Course-, professor- and student-wise reports
//!
//! Reports borrow from the registry's collections and render through `Display`.

use crate::core::models::{Course, Enrollment, Professor, Student};
use crate::core::stats::{self, MarkStatistics};
use std::fmt;

/// Every enrollment in one course, in student collection order
#[derive(Debug, Clone)]
pub struct CourseReport<'a> {
    /// Course being reported
    pub course: &'a Course,
    /// Enrolled students with their enrollment for this course
    pub entries: Vec<(&'a Student, &'a Enrollment)>,
}

impl<'a> CourseReport<'a> {
    /// Collect the enrollments for `course` across `students`
    #[must_use]
    pub fn new(course: &'a Course, students: &'a [Student]) -> Self {
        let entries = students
            .iter()
            .filter_map(|s| s.enrollment(&course.course_id).map(|e| (s, e)))
            .collect();
        Self { course, entries }
    }

    /// Marks of every enrolled student
    #[must_use]
    pub fn marks(&self) -> Vec<i32> {
        self.entries.iter().map(|(_, e)| e.marks).collect()
    }

    /// Mean course marks, `None` with nobody enrolled
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        stats::mean(&self.marks())
    }

    /// Median course marks, `None` with nobody enrolled
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        stats::median(&self.marks())
    }
}

impl fmt::Display for CourseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.course)?;
        writeln!(f, "\nStudents enrolled: {}", self.entries.len())?;
        for (student, e) in &self.entries {
            writeln!(
                f,
                "  {}: Marks {}, Grade {}",
                student.full_name(),
                e.marks,
                e.grade
            )?;
        }
        if let (Some(mean), Some(median)) = (self.mean(), self.median()) {
            writeln!(f, "\nCourse Statistics:")?;
            writeln!(f, "  Average Marks: {mean:.2}")?;
            writeln!(f, "  Median Marks: {median:.2}")?;
        }
        Ok(())
    }
}

/// A professor with each taught course looked up in the catalogue
#[derive(Debug, Clone)]
pub struct ProfessorReport<'a> {
    /// Professor being reported
    pub professor: &'a Professor,
    /// Taught course codes and the matching catalogue entry, if any
    pub courses: Vec<(&'a str, Option<&'a Course>)>,
}

impl<'a> ProfessorReport<'a> {
    /// Cross-reference the professor's courses against `catalogue`
    #[must_use]
    pub fn new(professor: &'a Professor, catalogue: &'a [Course]) -> Self {
        let courses = professor
            .course_ids()
            .iter()
            .map(|id| {
                let course = catalogue.iter().find(|c| &c.course_id == id);
                (id.as_str(), course)
            })
            .collect();
        Self { professor, courses }
    }
}

impl fmt::Display for ProfessorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.professor)?;
        writeln!(f, "\nCourse details:")?;
        if self.courses.is_empty() {
            writeln!(f, "  No courses assigned")?;
        }
        for (id, course) in &self.courses {
            match course {
                Some(c) => writeln!(f, "  {id}: {} ({} credits)", c.course_name, c.credits)?,
                None => writeln!(f, "  {id}: not in course catalogue")?,
            }
        }
        Ok(())
    }
}

/// A student's full record with derived averages
#[derive(Debug, Clone, Copy)]
pub struct StudentReport<'a> {
    /// Student being reported
    pub student: &'a Student,
    /// Mean marks
    pub average: f64,
    /// Grade point average
    pub gpa: f64,
}

impl<'a> StudentReport<'a> {
    /// Build the report for `student`
    #[must_use]
    pub fn new(student: &'a Student) -> Self {
        Self {
            student,
            average: student.average_marks(),
            gpa: student.gpa(),
        }
    }
}

impl fmt::Display for StudentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.student)?;
        writeln!(f, "\nAverage Marks: {:.2}", self.average)?;
        writeln!(f, "GPA: {:.2}", self.gpa)
    }
}

impl fmt::Display for MarkStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Marks recorded: {}", self.count)?;
        writeln!(f, "Average Marks (All Courses): {:.2}", self.mean)?;
        writeln!(f, "Median Marks (All Courses): {:.2}", self.median)?;
        writeln!(f, "Highest Marks: {}", self.max)?;
        writeln!(f, "Lowest Marks: {}", self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(email: &str, first: &str, courses: &[(&str, i32)]) -> Student {
        let mut s = Student::new(email.to_string(), first.to_string(), "X".to_string()).unwrap();
        for (code, marks) in courses {
            s.add_course((*code).to_string(), *marks);
        }
        s
    }

    fn course(id: &str) -> Course {
        Course::new(id.to_string(), format!("{id} name"), 3, String::new()).unwrap()
    }

    #[test]
    fn course_report_collects_enrolled_students_in_order() {
        let students = vec![
            student("a@x", "Ann", &[("DATA200", 90)]),
            student("b@x", "Bob", &[("CS146", 40)]),
            student("c@x", "Cy", &[("CS146", 70), ("DATA200", 60)]),
        ];
        let data = course("DATA200");
        let report = CourseReport::new(&data, &students);

        let names: Vec<&str> = report.entries.iter().map(|(s, _)| s.first_name.as_str()).collect();
        assert_eq!(names, ["Ann", "Cy"]);
        assert_eq!(report.mean(), Some(75.0));
        assert_eq!(report.median(), Some(75.0));
        assert!(report.to_string().contains("Cy X: Marks 60, Grade D"));
    }

    #[test]
    fn course_report_without_students_has_no_statistics() {
        let data = course("DATA200");
        let report = CourseReport::new(&data, &[]);
        assert!(report.mean().is_none());
        assert!(!report.to_string().contains("Course Statistics"));
    }

    #[test]
    fn professor_report_marks_unknown_courses() {
        let prof = Professor::new(
            "p@x".to_string(),
            "P".to_string(),
            "p@x".to_string(),
            "Professor".to_string(),
            vec!["DATA200".to_string(), "GONE1".to_string()],
        )
        .unwrap();
        let catalogue = vec![course("DATA200")];
        let report = ProfessorReport::new(&prof, &catalogue);

        assert!(report.courses[0].1.is_some());
        assert!(report.courses[1].1.is_none());
        let shown = report.to_string();
        assert!(shown.contains("DATA200: DATA200 name (3 credits)"));
        assert!(shown.contains("GONE1: not in course catalogue"));
    }

    #[test]
    fn student_report_includes_average_and_gpa() {
        let s = student("a@x", "Ann", &[("A", 90), ("B", 80)]);
        let report = StudentReport::new(&s);
        assert!((report.average - 85.0).abs() < f64::EPSILON);
        assert!((report.gpa - 3.5).abs() < f64::EPSILON);
        assert!(report.to_string().contains("GPA: 3.50"));
    }
}
