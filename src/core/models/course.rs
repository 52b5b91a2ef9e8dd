//! Course model

use crate::core::error::ModelError;
use std::fmt;

/// Credits given to a course when none are recorded
pub const DEFAULT_CREDITS: u32 = 3;

/// Represents a course in the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course code (e.g., "DATA200"); unique identifier
    pub course_id: String,

    /// Course name (e.g., "Data Science")
    pub course_name: String,

    /// Credit count
    pub credits: u32,

    /// Free-text description
    pub description: String,
}

/// Check that `code` can be stored inside a comma-joined list field
///
/// # Errors
/// Returns [`ModelError::EmptyField`] for a blank code and
/// [`ModelError::InvalidCourseCode`] for one holding a comma or padded with whitespace
pub fn validate_course_code(code: &str) -> Result<(), ModelError> {
    if code.trim().is_empty() {
        return Err(ModelError::EmptyField("Course ID"));
    }
    if code.contains(',') || code.trim() != code {
        return Err(ModelError::InvalidCourseCode(code.to_string()));
    }
    Ok(())
}

impl Course {
    /// Create a new course
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyField`] if the course code is empty, or
    /// [`ModelError::InvalidCourseCode`] if it would not survive a CSV list field
    pub fn new(
        course_id: String,
        course_name: String,
        credits: u32,
        description: String,
    ) -> Result<Self, ModelError> {
        validate_course_code(&course_id)?;
        Ok(Self {
            course_id,
            course_name,
            credits,
            description,
        })
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course ID: {}", self.course_id)?;
        writeln!(f, "Course Name: {}", self.course_name)?;
        writeln!(f, "Credits: {}", self.credits)?;
        write!(f, "Description: {}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "DATA200".to_string(),
            "Data Science".to_string(),
            DEFAULT_CREDITS,
            "Intro".to_string(),
        )
        .unwrap();

        assert_eq!(course.course_id, "DATA200");
        assert_eq!(course.course_name, "Data Science");
        assert_eq!(course.credits, 3);
    }

    #[test]
    fn test_course_null_id() {
        let err = Course::new(String::new(), "X".to_string(), 3, String::new()).unwrap_err();
        assert_eq!(err, ModelError::EmptyField("Course ID"));
    }

    #[test]
    fn test_course_code_must_fit_list_field() {
        for code in ["CS,146", " CS146", "CS146\t"] {
            let err = Course::new(code.to_string(), "X".to_string(), 3, String::new()).unwrap_err();
            assert_eq!(err, ModelError::InvalidCourseCode(code.to_string()));
        }
        assert!(validate_course_code("CS-146").is_ok());
    }

    #[test]
    fn test_course_display() {
        let course = Course::new("CS146".to_string(), "DSA".to_string(), 4, String::new()).unwrap();
        let shown = course.to_string();
        assert!(shown.contains("Course ID: CS146"));
        assert!(shown.contains("Credits: 4"));
    }
}
