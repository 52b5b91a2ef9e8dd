//! Row layouts of the CSV tables and their conversion to records

use super::Table;
use crate::core::error::{ModelError, StorageError};
use crate::core::models::{
    Course, Enrollment, Grade, LoginUser, Professor, Role, Student, DEFAULT_CREDITS,
};
use crate::warn;
use serde::{Deserialize, Serialize};

/// Separator inside list-valued fields
const LIST_SEPARATOR: &str = ",";

/// Row of `students.csv`; the three list columns are index aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    /// Student email
    pub email_address: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Comma-joined course codes
    pub courses: String,
    /// Comma-joined grade letters
    pub grades: String,
    /// Comma-joined integer marks
    pub marks: String,
}

/// Row of `courses.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    /// Course code
    pub course_id: String,
    /// Course name
    pub course_name: String,
    /// Credit count; missing or unparsable values load as the default
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub credits: Option<u32>,
    /// Description
    #[serde(default)]
    pub description: String,
}

/// Row of `professors.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorRow {
    /// Professor ID
    pub professor_id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email_address: String,
    /// Academic rank
    pub rank: String,
    /// Comma-joined course codes
    #[serde(default)]
    pub course_ids: String,
}

/// Row of `login.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRow {
    /// Login email
    pub email_id: String,
    /// Password digest, passed through untouched
    pub password: String,
    /// Role; blank or missing loads as `student`
    #[serde(default)]
    pub role: String,
}

fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Split a list field, trimming tokens and dropping empty ones
fn split(field: &str) -> Vec<&str> {
    split_positional(field)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split a list field keeping blank tokens in place; an empty field is an empty list
fn split_positional(field: &str) -> Vec<&str> {
    if field.trim().is_empty() {
        return Vec::new();
    }
    field.split(LIST_SEPARATOR).map(str::trim).collect()
}

fn invalid(table: &'static str, row: usize, err: &ModelError) -> StorageError {
    let field = match err {
        ModelError::EmptyField(field) => *field,
        ModelError::InvalidCourseCode(_) => "course_id",
        ModelError::UnknownRole(_) => "role",
    };
    StorageError::InvalidField {
        table,
        row,
        field,
        message: err.to_string(),
    }
}

impl Table for Student {
    const NAME: &'static str = "students";
    const FILE_NAME: &'static str = "students.csv";
    const COLUMNS: &'static [&'static str] = &[
        "email_address",
        "first_name",
        "last_name",
        "courses",
        "grades",
        "marks",
    ];
    const REQUIRED_COLUMNS: &'static [&'static str] = Self::COLUMNS;

    type Row = StudentRow;

    fn to_row(&self) -> StudentRow {
        let enrollments = self.enrollments();
        StudentRow {
            email_address: self.email_address.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            courses: join(enrollments.iter().map(|e| e.course_code.as_str())),
            grades: join(enrollments.iter().map(|e| &e.grade)),
            marks: join(enrollments.iter().map(|e| e.marks)),
        }
    }

    fn from_row(row: StudentRow, row_number: usize) -> Result<Self, StorageError> {
        let marks = split(&row.marks)
            .into_iter()
            .map(|token| {
                token.parse::<i32>().map_err(|e| StorageError::InvalidField {
                    table: Self::NAME,
                    row: row_number,
                    field: "marks",
                    message: format!("'{token}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let courses = split_positional(&row.courses);
        let grades = split_positional(&row.grades);

        if courses.len() != marks.len() || courses.len() != grades.len() {
            warn!(
                "Student {} has {} course(s), {} grade(s) and {} mark(s); missing marks load as 0",
                row.email_address,
                courses.len(),
                grades.len(),
                marks.len()
            );
        }

        let mut student = Self::new(row.email_address, row.first_name, row.last_name)
            .map_err(|e| invalid(Self::NAME, row_number, &e))?;

        for (idx, code) in courses.into_iter().enumerate() {
            if code.is_empty() {
                warn!(
                    "Student {} has a blank course code at position {}; skipping it",
                    student.email_address,
                    idx + 1
                );
                continue;
            }
            let mark = marks.get(idx).copied().unwrap_or_default();
            // Blank or missing letters are recomputed from the mark
            let grade = match grades.get(idx) {
                Some(letter) if !letter.is_empty() => letter.parse().unwrap_or(Grade::F),
                _ => Grade::from_marks(mark),
            };
            let enrollment = Enrollment {
                course_code: code.to_string(),
                marks: mark,
                grade,
            };
            if !student.push_enrollment(enrollment) {
                warn!(
                    "Student {} lists course {code} more than once; keeping the first",
                    student.email_address
                );
            }
        }
        Ok(student)
    }
}

impl Table for Course {
    const NAME: &'static str = "courses";
    const FILE_NAME: &'static str = "courses.csv";
    const COLUMNS: &'static [&'static str] = &["course_id", "course_name", "credits", "description"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["course_id", "course_name"];

    type Row = CourseRow;

    fn to_row(&self) -> CourseRow {
        CourseRow {
            course_id: self.course_id.clone(),
            course_name: self.course_name.clone(),
            credits: Some(self.credits),
            description: self.description.clone(),
        }
    }

    fn from_row(row: CourseRow, row_number: usize) -> Result<Self, StorageError> {
        Self::new(
            row.course_id.trim().to_string(),
            row.course_name,
            row.credits.unwrap_or(DEFAULT_CREDITS),
            row.description,
        )
        .map_err(|e| invalid(Self::NAME, row_number, &e))
    }
}

impl Table for Professor {
    const NAME: &'static str = "professors";
    const FILE_NAME: &'static str = "professors.csv";
    const COLUMNS: &'static [&'static str] =
        &["professor_id", "name", "email_address", "rank", "course_ids"];
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["professor_id", "name", "email_address", "rank"];

    type Row = ProfessorRow;

    fn to_row(&self) -> ProfessorRow {
        ProfessorRow {
            professor_id: self.professor_id.clone(),
            name: self.name.clone(),
            email_address: self.email_address.clone(),
            rank: self.rank.clone(),
            course_ids: join(self.course_ids()),
        }
    }

    fn from_row(row: ProfessorRow, row_number: usize) -> Result<Self, StorageError> {
        let course_ids = split(&row.course_ids)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self::new(
            row.professor_id,
            row.name,
            row.email_address,
            row.rank,
            course_ids,
        )
        .map_err(|e| invalid(Self::NAME, row_number, &e))
    }
}

impl Table for LoginUser {
    const NAME: &'static str = "users";
    const FILE_NAME: &'static str = "login.csv";
    const COLUMNS: &'static [&'static str] = &["email_id", "password", "role"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["email_id", "password"];

    type Row = LoginRow;

    fn to_row(&self) -> LoginRow {
        LoginRow {
            email_id: self.email_id.clone(),
            password: self.password_digest().to_string(),
            role: self.role.to_string(),
        }
    }

    fn from_row(row: LoginRow, row_number: usize) -> Result<Self, StorageError> {
        let role = if row.role.trim().is_empty() {
            Role::default()
        } else {
            row.role
                .parse()
                .map_err(|e| invalid(Self::NAME, row_number, &e))?
        };
        Self::with_digest(row.email_id, row.password, role)
            .map_err(|e| invalid(Self::NAME, row_number, &e))
    }
}
