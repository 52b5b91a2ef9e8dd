//! In-memory record collections and the commands that act on them
//!
//! The registry owns the students, courses, professors and login users loaded at
//! startup. Every mutating command rewrites all four tables once it has changed
//! memory; a failed save is returned to the caller but the in-memory change stays.

use crate::core::error::{RegistryError, StorageError};
use crate::core::models::{validate_course_code, Course, LoginUser, Professor, Role, Student};
use crate::core::report::{CourseReport, ProfessorReport, StudentReport};
use crate::core::sample::SampleData;
use crate::core::stats::MarkStatistics;
use crate::core::storage::DataStore;
use crate::{debug, info};
use std::cmp::Ordering;

/// Field used to order students
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Email address
    Email,
    /// First name
    FirstName,
    /// Mean marks
    AverageMarks,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Partial update of a course; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    /// New course name
    pub course_name: Option<String>,
    /// New credit count
    pub credits: Option<u32>,
    /// New description
    pub description: Option<String>,
}

/// Partial update of a professor; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfessorUpdate {
    /// New display name
    pub name: Option<String>,
    /// New rank
    pub rank: Option<String>,
}

/// Owner of all record collections and their backing store
#[derive(Debug)]
pub struct Registry {
    store: DataStore,
    students: Vec<Student>,
    courses: Vec<Course>,
    professors: Vec<Professor>,
    users: Vec<LoginUser>,
}

impl Registry {
    /// Create an empty registry backed by `store`
    #[must_use]
    pub const fn new(store: DataStore) -> Self {
        Self {
            store,
            students: Vec::new(),
            courses: Vec::new(),
            professors: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Load all four tables from `store`
    ///
    /// Unreadable tables come back empty or partial; see [`DataStore::load_all`].
    #[must_use]
    pub fn load(store: DataStore) -> Self {
        let students = store.load_all();
        let courses = store.load_all();
        let professors = store.load_all();
        let users = store.load_all();
        let registry = Self {
            store,
            students,
            courses,
            professors,
            users,
        };
        info!(
            "Loaded: {} students, {} courses, {} professors, {} users",
            registry.students.len(),
            registry.courses.len(),
            registry.professors.len(),
            registry.users.len()
        );
        registry
    }

    /// Backing store
    #[must_use]
    pub const fn store(&self) -> &DataStore {
        &self.store
    }

    /// Rewrite all four tables
    ///
    /// Every table is attempted even if an earlier one fails.
    ///
    /// # Errors
    /// Returns the first table's failure
    pub fn save_all(&self) -> Result<(), StorageError> {
        let results = [
            self.store.save_all(&self.students),
            self.store.save_all(&self.courses),
            self.store.save_all(&self.professors),
            self.store.save_all(&self.users),
        ];
        debug!("Saved all tables to {}", self.store.dir().display());
        results.into_iter().collect()
    }

    fn commit(&self) -> Result<(), RegistryError> {
        self.save_all().map_err(RegistryError::from)
    }

    // ----- lookups -----

    /// All students in collection order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All courses
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All professors
    #[must_use]
    pub fn professors(&self) -> &[Professor] {
        &self.professors
    }

    /// All login users
    #[must_use]
    pub fn users(&self) -> &[LoginUser] {
        &self.users
    }

    /// Find a student by email
    #[must_use]
    pub fn find_student(&self, email: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.email_address == email)
    }

    /// Find a course by code
    #[must_use]
    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    /// Find a professor by ID
    #[must_use]
    pub fn find_professor(&self, professor_id: &str) -> Option<&Professor> {
        self.professors
            .iter()
            .find(|p| p.professor_id == professor_id)
    }

    /// Find a login user by email
    #[must_use]
    pub fn find_user(&self, email: &str) -> Option<&LoginUser> {
        self.users.iter().find(|u| u.email_id == email)
    }

    /// The logged-in user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<&LoginUser> {
        self.users.iter().find(|u| u.is_logged_in())
    }

    fn student_mut(&mut self, email: &str) -> Result<&mut Student, RegistryError> {
        self.students
            .iter_mut()
            .find(|s| s.email_address == email)
            .ok_or_else(|| RegistryError::StudentNotFound(email.to_string()))
    }

    fn course_mut(&mut self, course_id: &str) -> Result<&mut Course, RegistryError> {
        self.courses
            .iter_mut()
            .find(|c| c.course_id == course_id)
            .ok_or_else(|| RegistryError::CourseNotFound(course_id.to_string()))
    }

    fn professor_mut(&mut self, professor_id: &str) -> Result<&mut Professor, RegistryError> {
        self.professors
            .iter_mut()
            .find(|p| p.professor_id == professor_id)
            .ok_or_else(|| RegistryError::ProfessorNotFound(professor_id.to_string()))
    }

    fn user_mut(&mut self, email: &str) -> Result<&mut LoginUser, RegistryError> {
        self.users
            .iter_mut()
            .find(|u| u.email_id == email)
            .ok_or_else(|| RegistryError::UserNotFound(email.to_string()))
    }

    fn ensure_no_user(&self, email: &str) -> Result<(), RegistryError> {
        if self.find_user(email).is_some() {
            return Err(RegistryError::DuplicateUser(email.to_string()));
        }
        Ok(())
    }

    // ----- students -----

    /// Add a student together with a `student` login for the same email
    ///
    /// # Errors
    /// Fails without changes if the email is taken by a student or a login
    pub fn add_student(&mut self, student: Student, password: &str) -> Result<(), RegistryError> {
        if self.find_student(&student.email_address).is_some() {
            return Err(RegistryError::DuplicateStudent(student.email_address));
        }
        self.ensure_no_user(&student.email_address)?;
        let user = LoginUser::new(student.email_address.clone(), password, Role::Student)?;
        info!("Adding student {}", student.email_address);
        self.students.push(student);
        self.users.push(user);
        self.commit()
    }

    /// Delete a student and their login
    ///
    /// Enrollments are not mirrored anywhere else, so nothing else changes.
    ///
    /// # Errors
    /// Returns [`RegistryError::StudentNotFound`] for an unknown email
    pub fn delete_student(&mut self, email: &str) -> Result<Student, RegistryError> {
        let idx = self
            .students
            .iter()
            .position(|s| s.email_address == email)
            .ok_or_else(|| RegistryError::StudentNotFound(email.to_string()))?;
        let removed = self.students.remove(idx);
        self.users.retain(|u| u.email_id != email);
        info!("Deleted student {email}");
        self.commit()?;
        Ok(removed)
    }

    /// Change a student's name
    ///
    /// # Errors
    /// Returns [`RegistryError::StudentNotFound`] for an unknown email
    pub fn rename_student(
        &mut self,
        email: &str,
        first_name: String,
        last_name: String,
    ) -> Result<(), RegistryError> {
        self.student_mut(email)?.rename(first_name, last_name);
        self.commit()
    }

    /// Enroll a student in a catalogue course
    ///
    /// # Errors
    /// Fails if the student or course does not exist, or the student is already enrolled
    pub fn enroll_student(
        &mut self,
        email: &str,
        course_id: &str,
        marks: i32,
    ) -> Result<(), RegistryError> {
        if self.find_course(course_id).is_none() {
            return Err(RegistryError::CourseNotFound(course_id.to_string()));
        }
        let student = self.student_mut(email)?;
        if !student.add_course(course_id.to_string(), marks) {
            return Err(RegistryError::AlreadyEnrolled {
                student: email.to_string(),
                course: course_id.to_string(),
            });
        }
        self.commit()
    }

    /// Remove a course from a student's record
    ///
    /// # Errors
    /// Fails if the student does not exist or is not enrolled
    pub fn unenroll_student(&mut self, email: &str, course_id: &str) -> Result<(), RegistryError> {
        if !self.student_mut(email)?.remove_course(course_id) {
            return Err(RegistryError::NotEnrolled {
                student: email.to_string(),
                course: course_id.to_string(),
            });
        }
        self.commit()
    }

    /// Overwrite a student's marks for a course
    ///
    /// # Errors
    /// Fails if the student does not exist or is not enrolled
    pub fn update_student_marks(
        &mut self,
        email: &str,
        course_id: &str,
        marks: i32,
    ) -> Result<(), RegistryError> {
        if !self.student_mut(email)?.update_marks(course_id, marks) {
            return Err(RegistryError::NotEnrolled {
                student: email.to_string(),
                course: course_id.to_string(),
            });
        }
        self.commit()
    }

    /// Students whose email, first name or last name contains `term`, ignoring case
    #[must_use]
    pub fn search_students(&self, term: &str) -> Vec<&Student> {
        let needle = term.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                s.email_address.to_lowercase().contains(&needle)
                    || s.first_name.to_lowercase().contains(&needle)
                    || s.last_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Stable in-place sort of the student collection
    ///
    /// Equal keys keep their relative order in both directions. The new order is
    /// not saved until the next mutating command.
    pub fn sort_students(&mut self, key: SortKey, order: SortOrder) {
        let compare = |a: &Student, b: &Student| -> Ordering {
            match key {
                SortKey::Email => a.email_address.cmp(&b.email_address),
                SortKey::FirstName => a.first_name.cmp(&b.first_name),
                SortKey::AverageMarks => a.average_marks().total_cmp(&b.average_marks()),
            }
        };
        match order {
            SortOrder::Ascending => self.students.sort_by(compare),
            SortOrder::Descending => self.students.sort_by(|a, b| compare(b, a)),
        }
    }

    // ----- courses -----

    /// Add a course to the catalogue
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateCourse`] if the code is taken
    pub fn add_course(&mut self, course: Course) -> Result<(), RegistryError> {
        if self.find_course(&course.course_id).is_some() {
            return Err(RegistryError::DuplicateCourse(course.course_id));
        }
        info!("Adding course {}", course.course_id);
        self.courses.push(course);
        self.commit()
    }

    /// Remove a course from the catalogue
    ///
    /// Students stay enrolled and professors keep teaching the removed code.
    ///
    /// # Errors
    /// Returns [`RegistryError::CourseNotFound`] for an unknown code
    pub fn delete_course(&mut self, course_id: &str) -> Result<Course, RegistryError> {
        let idx = self
            .courses
            .iter()
            .position(|c| c.course_id == course_id)
            .ok_or_else(|| RegistryError::CourseNotFound(course_id.to_string()))?;
        let removed = self.courses.remove(idx);
        info!("Deleted course {course_id}");
        self.commit()?;
        Ok(removed)
    }

    /// Change a course's name, credits or description
    ///
    /// # Errors
    /// Returns [`RegistryError::CourseNotFound`] for an unknown code
    pub fn update_course(
        &mut self,
        course_id: &str,
        update: CourseUpdate,
    ) -> Result<(), RegistryError> {
        let course = self.course_mut(course_id)?;
        if let Some(name) = update.course_name {
            course.course_name = name;
        }
        if let Some(credits) = update.credits {
            course.credits = credits;
        }
        if let Some(description) = update.description {
            course.description = description;
        }
        self.commit()
    }

    // ----- professors -----

    /// Add a professor together with a `professor` login for their email address
    ///
    /// # Errors
    /// Fails without changes if the ID or login email is taken
    pub fn add_professor(
        &mut self,
        professor: Professor,
        password: &str,
    ) -> Result<(), RegistryError> {
        if self.find_professor(&professor.professor_id).is_some() {
            return Err(RegistryError::DuplicateProfessor(professor.professor_id));
        }
        self.ensure_no_user(&professor.email_address)?;
        let user = LoginUser::new(professor.email_address.clone(), password, Role::Professor)?;
        info!("Adding professor {}", professor.professor_id);
        self.professors.push(professor);
        self.users.push(user);
        self.commit()
    }

    /// Remove a professor; their login is kept
    ///
    /// # Errors
    /// Returns [`RegistryError::ProfessorNotFound`] for an unknown ID
    pub fn delete_professor(&mut self, professor_id: &str) -> Result<Professor, RegistryError> {
        let idx = self
            .professors
            .iter()
            .position(|p| p.professor_id == professor_id)
            .ok_or_else(|| RegistryError::ProfessorNotFound(professor_id.to_string()))?;
        let removed = self.professors.remove(idx);
        info!("Deleted professor {professor_id}");
        self.commit()?;
        Ok(removed)
    }

    /// Change a professor's name or rank
    ///
    /// # Errors
    /// Returns [`RegistryError::ProfessorNotFound`] for an unknown ID
    pub fn update_professor(
        &mut self,
        professor_id: &str,
        update: ProfessorUpdate,
    ) -> Result<(), RegistryError> {
        let professor = self.professor_mut(professor_id)?;
        if let Some(name) = update.name {
            professor.name = name;
        }
        if let Some(rank) = update.rank {
            professor.rank = rank;
        }
        self.commit()
    }

    /// Add a course code to a professor's teaching list
    ///
    /// The code is not checked against the catalogue.
    ///
    /// # Errors
    /// Fails if the code cannot be stored, the professor does not exist, or
    /// the professor already teaches the course
    pub fn assign_course(&mut self, professor_id: &str, course_id: &str) -> Result<(), RegistryError> {
        validate_course_code(course_id)?;
        if !self
            .professor_mut(professor_id)?
            .add_course(course_id.to_string())
        {
            return Err(RegistryError::TeachingList {
                professor: professor_id.to_string(),
                course: course_id.to_string(),
                problem: "already teaches",
            });
        }
        self.commit()
    }

    /// Remove a course code from a professor's teaching list
    ///
    /// # Errors
    /// Fails if the professor does not exist or does not teach the course
    pub fn unassign_course(
        &mut self,
        professor_id: &str,
        course_id: &str,
    ) -> Result<(), RegistryError> {
        if !self.professor_mut(professor_id)?.remove_course(course_id) {
            return Err(RegistryError::TeachingList {
                professor: professor_id.to_string(),
                course: course_id.to_string(),
                problem: "does not teach",
            });
        }
        self.commit()
    }

    // ----- users -----

    /// Add a standalone login
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateUser`] if the email is taken
    pub fn add_user(&mut self, user: LoginUser) -> Result<(), RegistryError> {
        self.ensure_no_user(&user.email_id)?;
        info!("Adding {} user {}", user.role, user.email_id);
        self.users.push(user);
        self.commit()
    }

    /// Delete a login; the matching student or professor record is kept
    ///
    /// # Errors
    /// Returns [`RegistryError::UserNotFound`] for an unknown email
    pub fn delete_user(&mut self, email: &str) -> Result<LoginUser, RegistryError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.email_id == email)
            .ok_or_else(|| RegistryError::UserNotFound(email.to_string()))?;
        let removed = self.users.remove(idx);
        info!("Deleted user {email}");
        self.commit()?;
        Ok(removed)
    }

    /// Log a user in, logging out whoever was logged in before
    ///
    /// # Errors
    /// Fails for an unknown email or a wrong password; the previous login is kept then
    pub fn login(&mut self, email: &str, password: &str) -> Result<&LoginUser, RegistryError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.email_id == email)
            .ok_or_else(|| RegistryError::UserNotFound(email.to_string()))?;
        let mut candidate = self.users[idx].clone();
        if !candidate.login(password) {
            info!("Failed login for {email}");
            return Err(RegistryError::BadPassword(email.to_string()));
        }
        for user in &mut self.users {
            user.logout();
        }
        self.users[idx] = candidate;
        info!("Login successful for {email}");
        Ok(&self.users[idx])
    }

    /// Log out the current user
    ///
    /// # Errors
    /// Returns [`RegistryError::NotLoggedIn`] if nobody is logged in
    pub fn logout(&mut self) -> Result<String, RegistryError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.is_logged_in())
            .ok_or(RegistryError::NotLoggedIn)?;
        user.logout();
        Ok(user.email_id.clone())
    }

    /// Change a user's password after verifying the old one
    ///
    /// # Errors
    /// Fails for an unknown email or a wrong old password
    pub fn change_password(
        &mut self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), RegistryError> {
        if !self.user_mut(email)?.change_password(old_password, new_password) {
            return Err(RegistryError::BadPassword(email.to_string()));
        }
        info!("Password changed for {email}");
        self.commit()
    }

    // ----- bulk import -----

    /// Add generated records in one pass, saving once at the end
    ///
    /// Records whose key already exists are skipped. Returns the number of
    /// students added.
    ///
    /// # Errors
    /// Returns the save failure; the added records stay in memory
    pub fn import(&mut self, data: SampleData) -> Result<usize, RegistryError> {
        for course in data.courses {
            if self.find_course(&course.course_id).is_none() {
                self.courses.push(course);
            }
        }
        for user in data.users {
            if self.find_user(&user.email_id).is_none() {
                self.users.push(user);
            }
        }
        let before = self.students.len();
        for student in data.students {
            if self.find_student(&student.email_address).is_none() {
                self.students.push(student);
            }
        }
        let added = self.students.len() - before;
        info!("Imported {added} students");
        self.commit()?;
        Ok(added)
    }

    // ----- reports -----

    /// Course-wise report
    ///
    /// # Errors
    /// Returns [`RegistryError::CourseNotFound`] for an unknown code
    pub fn course_report(&self, course_id: &str) -> Result<CourseReport<'_>, RegistryError> {
        let course = self
            .find_course(course_id)
            .ok_or_else(|| RegistryError::CourseNotFound(course_id.to_string()))?;
        Ok(CourseReport::new(course, &self.students))
    }

    /// Professor-wise report
    ///
    /// # Errors
    /// Returns [`RegistryError::ProfessorNotFound`] for an unknown ID
    pub fn professor_report(
        &self,
        professor_id: &str,
    ) -> Result<ProfessorReport<'_>, RegistryError> {
        let professor = self
            .find_professor(professor_id)
            .ok_or_else(|| RegistryError::ProfessorNotFound(professor_id.to_string()))?;
        Ok(ProfessorReport::new(professor, &self.courses))
    }

    /// Student-wise report
    ///
    /// # Errors
    /// Returns [`RegistryError::StudentNotFound`] for an unknown email
    pub fn student_report(&self, email: &str) -> Result<StudentReport<'_>, RegistryError> {
        self.find_student(email)
            .map(StudentReport::new)
            .ok_or_else(|| RegistryError::StudentNotFound(email.to_string()))
    }

    /// Statistics over every mark of every enrollment, `None` if there are no marks
    #[must_use]
    pub fn statistics(&self) -> Option<MarkStatistics> {
        let pool: Vec<i32> = self
            .students
            .iter()
            .flat_map(|s| s.enrollments().iter().map(|e| e.marks))
            .collect();
        MarkStatistics::from_marks(&pool)
    }
}
