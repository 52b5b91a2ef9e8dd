//! Professor model

use super::validate_course_code;
use crate::core::error::ModelError;
use std::fmt;

/// Represents a professor and the courses they teach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professor {
    /// Professor ID, conventionally an email address
    pub professor_id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email_address: String,

    /// Academic rank (e.g., "Associate Professor")
    pub rank: String,

    /// Course codes taught, without duplicates
    course_ids: Vec<String>,
}

impl Professor {
    /// Create a new professor
    ///
    /// Duplicate course codes in `course_ids` are dropped, keeping the first occurrence.
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyField`] if the ID or email address is empty, or
    /// [`ModelError::InvalidCourseCode`] for a course code that cannot be stored
    pub fn new(
        professor_id: String,
        name: String,
        email_address: String,
        rank: String,
        course_ids: Vec<String>,
    ) -> Result<Self, ModelError> {
        if professor_id.trim().is_empty() {
            return Err(ModelError::EmptyField("Professor ID"));
        }
        if email_address.trim().is_empty() {
            return Err(ModelError::EmptyField("Email address"));
        }
        for course_id in &course_ids {
            validate_course_code(course_id)?;
        }
        let mut professor = Self {
            professor_id,
            name,
            email_address,
            rank,
            course_ids: Vec::with_capacity(course_ids.len()),
        };
        for course_id in course_ids {
            professor.add_course(course_id);
        }
        Ok(professor)
    }

    /// Course codes taught
    #[must_use]
    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    /// Add a course to the teaching list
    ///
    /// # Returns
    /// `false` if the course was already listed
    pub fn add_course(&mut self, course_id: String) -> bool {
        if self.course_ids.contains(&course_id) {
            return false;
        }
        self.course_ids.push(course_id);
        true
    }

    /// Remove a course from the teaching list
    ///
    /// # Returns
    /// `false` if the course was not listed
    pub fn remove_course(&mut self, course_id: &str) -> bool {
        let before = self.course_ids.len();
        self.course_ids.retain(|c| c != course_id);
        self.course_ids.len() != before
    }
}

impl fmt::Display for Professor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Professor ID: {}", self.professor_id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Email: {}", self.email_address)?;
        writeln!(f, "Rank: {}", self.rank)?;
        let courses = if self.course_ids.is_empty() {
            "None".to_string()
        } else {
            self.course_ids.join(", ")
        };
        write!(f, "Courses Teaching: {courses}")
    }
}
