//! Error types for record construction, persistence and registry operations

use std::path::PathBuf;

/// Invalid field values when building a record
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required identifier was empty
    #[error("{0} cannot be null or empty")]
    EmptyField(&'static str),
    /// Course code holds a comma or surrounding whitespace
    #[error("invalid course code '{0}': no commas or surrounding spaces allowed")]
    InvalidCourseCode(String),
    /// Role string is not one of student/professor/admin
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}

/// Failures reading or writing a table file
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Underlying file system failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Original error
        #[source]
        source: std::io::Error,
    },
    /// Malformed CSV or a row that does not fit the table's columns
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Header row lacks a required column
    #[error("{table} table is missing required column '{column}'")]
    HeaderMismatch {
        /// Table name
        table: &'static str,
        /// Missing column
        column: &'static str,
    },
    /// A field could not be decoded
    #[error("invalid {field} in {table} row {row}: {message}")]
    InvalidField {
        /// Table name
        table: &'static str,
        /// 1-based data row number
        row: usize,
        /// Column name
        field: &'static str,
        /// What was wrong
        message: String,
    },
}

/// Outcome of a failed registry command
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// Record construction failed
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Tables could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Student email already in use
    #[error("Student with email '{0}' already exists")]
    DuplicateStudent(String),
    /// Course id already in use
    #[error("Course with ID '{0}' already exists")]
    DuplicateCourse(String),
    /// Professor id already in use
    #[error("Professor with ID '{0}' already exists")]
    DuplicateProfessor(String),
    /// Login email already in use
    #[error("User '{0}' already exists")]
    DuplicateUser(String),
    /// No student with that email
    #[error("Student '{0}' not found")]
    StudentNotFound(String),
    /// No course with that id
    #[error("Course '{0}' not found")]
    CourseNotFound(String),
    /// No professor with that id
    #[error("Professor '{0}' not found")]
    ProfessorNotFound(String),
    /// No login with that email
    #[error("User '{0}' not found")]
    UserNotFound(String),
    /// Student already enrolled in the course
    #[error("Student '{student}' is already enrolled in '{course}'")]
    AlreadyEnrolled {
        /// Student email
        student: String,
        /// Course id
        course: String,
    },
    /// Student not enrolled in the course
    #[error("Course '{course}' not found in record of '{student}'")]
    NotEnrolled {
        /// Student email
        student: String,
        /// Course id
        course: String,
    },
    /// Professor already teaches or does not teach the course
    #[error("Professor '{professor}' {problem} '{course}'")]
    TeachingList {
        /// Professor id
        professor: String,
        /// Course id
        course: String,
        /// "already teaches" / "does not teach"
        problem: &'static str,
    },
    /// Password did not verify
    #[error("Incorrect password for '{0}'")]
    BadPassword(String),
    /// Logout without an active login
    #[error("No user is currently logged in")]
    NotLoggedIn,
}
