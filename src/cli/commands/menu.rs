//! Interactive menu tree
//!
//! Reads one line per prompt from any `BufRead` and writes plain text to any `Write`,
//! so the whole tree can be driven from a script in tests. Running out of input at
//! any prompt saves every table and leaves the menu.

use check_my_grade::core::models::{
    Course, LoginUser, Professor, Role, Student, DEFAULT_CREDITS, GRADE_BANDS,
};
use check_my_grade::core::registry::{CourseUpdate, ProfessorUpdate, SortKey, SortOrder};
use check_my_grade::{debug, info, warn, Registry, RegistryError};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

/// Students shown by the listing and after a sort
const LISTING_LIMIT: usize = 10;

const RULE: &str = "==================================================";

/// Why the menu stopped reading
#[derive(thiserror::Error, Debug)]
pub enum MenuError {
    /// Input stream closed
    #[error("end of input")]
    EndOfInput,
    /// Terminal read or write failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

type MenuResult = Result<(), MenuError>;

/// Run the menu on stdin/stdout
///
/// # Errors
/// Returns an error if the terminal cannot be read or written
pub fn run(registry: &mut Registry) -> Result<(), io::Error> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(registry, stdin.lock(), stdout.lock()).run()
}

/// Menu session bound to one registry and one pair of streams
pub struct Menu<'r, R, W> {
    registry: &'r mut Registry,
    input: R,
    out: W,
}

impl<'r, R: BufRead, W: Write> Menu<'r, R, W> {
    /// Bind a session to `registry`
    pub fn new(registry: &'r mut Registry, input: R, out: W) -> Self {
        Self {
            registry,
            input,
            out,
        }
    }

    /// Loop over the main menu until "Save & Exit" or end of input
    ///
    /// # Errors
    /// Returns an error only for I/O failures on the streams
    pub fn run(mut self) -> Result<(), io::Error> {
        loop {
            match self.main_menu() {
                Ok(true) => continue,
                Ok(false) => return Ok(()),
                Err(MenuError::EndOfInput) => {
                    debug!("Input closed; saving before exit");
                    writeln!(self.out)?;
                    self.save_and_exit()?;
                    return Ok(());
                }
                Err(MenuError::Io(e)) => return Err(e),
            }
        }
    }

    /// One pass through the main menu; `Ok(false)` means exit
    fn main_menu(&mut self) -> Result<bool, MenuError> {
        writeln!(self.out, "\n{RULE}")?;
        writeln!(self.out, "CheckMyGrade Application")?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "1. Student Management")?;
        writeln!(self.out, "2. Course Management")?;
        writeln!(self.out, "3. Professor Management")?;
        writeln!(self.out, "4. Search & Sort")?;
        writeln!(self.out, "5. Reports & Statistics")?;
        writeln!(self.out, "6. Login & Users")?;
        writeln!(self.out, "7. Save & Exit")?;
        writeln!(self.out, "{RULE}")?;

        match self.prompt("Enter your choice: ")?.as_str() {
            "1" => self.student_menu()?,
            "2" => self.course_menu()?,
            "3" => self.professor_menu()?,
            "4" => self.search_sort_menu()?,
            "5" => self.reports_menu()?,
            "6" => self.login_menu()?,
            "7" => {
                self.save_and_exit()?;
                return Ok(false);
            }
            _ => writeln!(self.out, "Invalid choice! Please try again.")?,
        }
        Ok(true)
    }

    fn save_and_exit(&mut self) -> Result<(), io::Error> {
        writeln!(self.out, "Saving data to CSV files...")?;
        match self.registry.save_all() {
            Ok(()) => writeln!(self.out, "Data saved successfully!")?,
            Err(e) => {
                warn!("Save on exit failed: {e}");
                writeln!(self.out, "✗ {e}")?;
            }
        }
        writeln!(self.out, "Thank you for using CheckMyGrade!")
    }

    // ----- input helpers -----

    /// Print `label` and read one trimmed line
    fn prompt(&mut self, label: &str) -> Result<String, MenuError> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Read a number, asking again until the line parses
    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<T, MenuError> {
        loop {
            let line = self.prompt(label)?;
            if let Ok(value) = line.parse() {
                return Ok(value);
            }
            writeln!(self.out, "✗ '{line}' is not a valid number, try again.")?;
        }
    }

    /// Like [`prompt_number`](Self::prompt_number) but an empty line yields `None`
    fn prompt_optional_number<T: FromStr>(&mut self, label: &str) -> Result<Option<T>, MenuError> {
        loop {
            let line = self.prompt(label)?;
            if line.is_empty() {
                return Ok(None);
            }
            if let Ok(value) = line.parse() {
                return Ok(Some(value));
            }
            writeln!(self.out, "✗ '{line}' is not a valid number, try again.")?;
        }
    }

    /// Empty line yields `None`
    fn prompt_optional(&mut self, label: &str) -> Result<Option<String>, MenuError> {
        let line = self.prompt(label)?;
        Ok((!line.is_empty()).then_some(line))
    }

    /// Print the outcome of a registry command
    fn outcome(&mut self, result: Result<(), RegistryError>, success: &str) -> MenuResult {
        match result {
            Ok(()) => writeln!(self.out, "✓ {success}")?,
            Err(e) => {
                if matches!(e, RegistryError::Storage(_)) {
                    warn!("{e}");
                }
                writeln!(self.out, "✗ {e}")?;
            }
        }
        Ok(())
    }

    // ----- students -----

    fn student_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Student Management ===")?;
        writeln!(self.out, "1. Add new student")?;
        writeln!(self.out, "2. Delete student")?;
        writeln!(self.out, "3. Update student record")?;
        writeln!(self.out, "4. Display all students")?;
        writeln!(self.out, "5. Check grades")?;
        writeln!(self.out, "6. Check marks")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => self.add_student(),
            "2" => self.delete_student(),
            "3" => self.update_student(),
            "4" => self.display_students(),
            "5" => self.check_student(Student::grades_summary),
            "6" => self.check_student(Student::marks_summary),
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn add_student(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Add New Student ===")?;
        let email = self.prompt("Enter student email: ")?;
        if self.registry.find_student(&email).is_some() {
            writeln!(self.out, "✗ Student with this email already exists!")?;
            return Ok(());
        }
        let first_name = self.prompt("Enter first name: ")?;
        let last_name = self.prompt("Enter last name: ")?;
        let student = match Student::new(email, first_name, last_name) {
            Ok(s) => s,
            Err(e) => return Ok(writeln!(self.out, "✗ {e}")?),
        };
        let password = self.prompt("Enter password for this student: ")?;
        let name = student.full_name();
        let result = self.registry.add_student(student, &password);
        self.outcome(result, &format!("Student {name} added successfully!"))
    }

    fn delete_student(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Delete Student ===")?;
        let email = self.prompt("Enter student email to delete: ")?;
        let result = self.registry.delete_student(&email).map(drop);
        self.outcome(result, &format!("Student {email} deleted successfully!"))
    }

    fn update_student(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Update Student Record ===")?;
        let email = self.prompt("Enter student email: ")?;
        if self.registry.find_student(&email).is_none() {
            writeln!(self.out, "✗ Student {email} not found!")?;
            return Ok(());
        }

        writeln!(self.out, "\nWhat would you like to update?")?;
        writeln!(self.out, "1. Add course")?;
        writeln!(self.out, "2. Remove course")?;
        writeln!(self.out, "3. Update marks")?;
        writeln!(self.out, "4. Change name")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => {
                let course_id = self.prompt("Enter course ID: ")?;
                let marks = self.prompt_number("Enter marks: ")?;
                let result = self.registry.enroll_student(&email, &course_id, marks);
                self.outcome(result, "Course added successfully!")
            }
            "2" => {
                let course_id = self.prompt("Enter course ID to remove: ")?;
                let result = self.registry.unenroll_student(&email, &course_id);
                self.outcome(result, "Course removed successfully!")
            }
            "3" => {
                let course_id = self.prompt("Enter course ID: ")?;
                let marks = self.prompt_number("Enter new marks: ")?;
                let result = self.registry.update_student_marks(&email, &course_id, marks);
                self.outcome(result, "Marks updated successfully!")
            }
            "4" => {
                let first = self.prompt("Enter first name: ")?;
                let last = self.prompt("Enter last name: ")?;
                let result = self.registry.rename_student(&email, first, last);
                self.outcome(result, "Name updated successfully!")
            }
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn display_students(&mut self) -> MenuResult {
        let total = self.registry.students().len();
        if total == 0 {
            writeln!(self.out, "No students in the system!")?;
            return Ok(());
        }
        for student in self.registry.students().iter().take(LISTING_LIMIT) {
            write!(self.out, "{student}")?;
        }
        if total > LISTING_LIMIT {
            writeln!(self.out, "\n({LISTING_LIMIT} of {total} students shown)")?;
        }
        Ok(())
    }

    fn check_student(&mut self, view: fn(&Student) -> String) -> MenuResult {
        let email = self.prompt("Enter student email: ")?;
        match self.registry.find_student(&email) {
            Some(student) => write!(self.out, "{}", view(student))?,
            None => writeln!(self.out, "✗ Student {email} not found!")?,
        }
        Ok(())
    }

    // ----- courses -----

    fn course_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Course Management ===")?;
        writeln!(self.out, "1. Add new course")?;
        writeln!(self.out, "2. Delete course")?;
        writeln!(self.out, "3. Update course")?;
        writeln!(self.out, "4. Display all courses")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => self.add_course(),
            "2" => {
                writeln!(self.out, "\n=== Delete Course ===")?;
                let course_id = self.prompt("Enter course ID to delete: ")?;
                let result = self.registry.delete_course(&course_id).map(drop);
                self.outcome(result, &format!("Course {course_id} deleted successfully!"))
            }
            "3" => self.update_course(),
            "4" => self.display_courses(),
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn add_course(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Add New Course ===")?;
        let course_id = self.prompt("Enter course ID: ")?;
        if self.registry.find_course(&course_id).is_some() {
            writeln!(self.out, "✗ Course with this ID already exists!")?;
            return Ok(());
        }
        let course_name = self.prompt("Enter course name: ")?;
        let credits = self
            .prompt_optional_number(&format!("Enter credits (default {DEFAULT_CREDITS}): "))?
            .unwrap_or(DEFAULT_CREDITS);
        let description = self.prompt("Enter description: ")?;
        let course = match Course::new(course_id, course_name, credits, description) {
            Ok(c) => c,
            Err(e) => return Ok(writeln!(self.out, "✗ {e}")?),
        };
        let message = format!("Course {} added successfully!", course.course_name);
        let result = self.registry.add_course(course);
        self.outcome(result, &message)
    }

    fn update_course(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Update Course ===")?;
        let course_id = self.prompt("Enter course ID: ")?;
        if self.registry.find_course(&course_id).is_none() {
            writeln!(self.out, "✗ Course {course_id} not found!")?;
            return Ok(());
        }
        writeln!(self.out, "Leave a field blank to keep it.")?;
        let update = CourseUpdate {
            course_name: self.prompt_optional("New course name: ")?,
            credits: self.prompt_optional_number("New credits: ")?,
            description: self.prompt_optional("New description: ")?,
        };
        let result = self.registry.update_course(&course_id, update);
        self.outcome(result, &format!("Course {course_id} updated successfully!"))
    }

    fn display_courses(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== All Courses ===")?;
        if self.registry.courses().is_empty() {
            writeln!(self.out, "No courses in the system!")?;
        }
        for course in self.registry.courses() {
            writeln!(self.out, "{course}")?;
        }
        Ok(())
    }

    // ----- professors -----

    fn professor_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Professor Management ===")?;
        writeln!(self.out, "1. Add new professor")?;
        writeln!(self.out, "2. Delete professor")?;
        writeln!(self.out, "3. Update professor")?;
        writeln!(self.out, "4. Display all professors")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => self.add_professor(),
            "2" => {
                writeln!(self.out, "\n=== Delete Professor ===")?;
                let id = self.prompt("Enter professor ID to delete: ")?;
                let result = self.registry.delete_professor(&id).map(drop);
                self.outcome(result, &format!("Professor {id} deleted successfully!"))
            }
            "3" => self.update_professor(),
            "4" => self.display_professors(),
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn add_professor(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Add New Professor ===")?;
        let id = self.prompt("Enter professor ID (email): ")?;
        if self.registry.find_professor(&id).is_some() {
            writeln!(self.out, "✗ Professor with this ID already exists!")?;
            return Ok(());
        }
        let name = self.prompt("Enter professor name: ")?;
        let email = self.prompt("Enter email address: ")?;
        let rank = self.prompt("Enter rank: ")?;
        let courses: Vec<String> = self
            .prompt("Enter course IDs taught (comma separated): ")?
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        let professor = match Professor::new(id, name, email, rank, courses) {
            Ok(p) => p,
            Err(e) => return Ok(writeln!(self.out, "✗ {e}")?),
        };
        let password = self.prompt("Enter password for this professor: ")?;
        let message = format!("Professor {} added successfully!", professor.name);
        let result = self.registry.add_professor(professor, &password);
        self.outcome(result, &message)
    }

    fn update_professor(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Update Professor ===")?;
        let id = self.prompt("Enter professor ID: ")?;
        if self.registry.find_professor(&id).is_none() {
            writeln!(self.out, "✗ Professor {id} not found!")?;
            return Ok(());
        }
        writeln!(self.out, "1. Change name")?;
        writeln!(self.out, "2. Change rank")?;
        writeln!(self.out, "3. Add taught course")?;
        writeln!(self.out, "4. Remove taught course")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => {
                let name = self.prompt("Enter new name: ")?;
                let update = ProfessorUpdate {
                    name: Some(name),
                    ..ProfessorUpdate::default()
                };
                let result = self.registry.update_professor(&id, update);
                self.outcome(result, "Name updated successfully!")
            }
            "2" => {
                let rank = self.prompt("Enter new rank: ")?;
                let update = ProfessorUpdate {
                    rank: Some(rank),
                    ..ProfessorUpdate::default()
                };
                let result = self.registry.update_professor(&id, update);
                self.outcome(result, "Rank updated successfully!")
            }
            "3" => {
                let course_id = self.prompt("Enter course ID: ")?;
                let result = self.registry.assign_course(&id, &course_id);
                self.outcome(result, "Course assigned successfully!")
            }
            "4" => {
                let course_id = self.prompt("Enter course ID: ")?;
                let result = self.registry.unassign_course(&id, &course_id);
                self.outcome(result, "Course removed successfully!")
            }
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn display_professors(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== All Professors ===")?;
        if self.registry.professors().is_empty() {
            writeln!(self.out, "No professors in the system!")?;
        }
        for professor in self.registry.professors() {
            writeln!(self.out, "{professor}")?;
        }
        Ok(())
    }

    // ----- search & sort -----

    fn search_sort_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Search & Sort ===")?;
        writeln!(self.out, "1. Search students")?;
        writeln!(self.out, "2. Sort students")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => self.search_students(),
            "2" => self.sort_students(),
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn search_students(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Search Students ===")?;
        let term = self.prompt("Enter email or name to search: ")?;

        let start = Instant::now();
        let results = self.registry.search_students(&term);
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        info!("Search for '{term}' matched {} student(s)", results.len());
        writeln!(
            self.out,
            "\nFound {} student(s) in {elapsed:.4} ms:",
            results.len()
        )?;
        for student in results {
            write!(self.out, "{student}")?;
        }
        Ok(())
    }

    fn sort_students(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Sort Students ===")?;
        writeln!(self.out, "1. Sort by email")?;
        writeln!(self.out, "2. Sort by first name")?;
        writeln!(self.out, "3. Sort by average marks")?;
        let key = match self.prompt("Enter choice: ")?.as_str() {
            "1" => SortKey::Email,
            "2" => SortKey::FirstName,
            "3" => SortKey::AverageMarks,
            _ => return Ok(writeln!(self.out, "Invalid choice!")?),
        };
        let order = if self
            .prompt("Ascending (a) or Descending (d)? ")?
            .eq_ignore_ascii_case("d")
        {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        let start = Instant::now();
        self.registry.sort_students(key, order);
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        writeln!(self.out, "\nStudents sorted in {elapsed:.4} ms")?;
        writeln!(self.out, "\nFirst {LISTING_LIMIT} students:")?;
        for s in self.registry.students().iter().take(LISTING_LIMIT) {
            writeln!(
                self.out,
                "{}: {} (Avg: {:.2})",
                s.email_address,
                s.full_name(),
                s.average_marks()
            )?;
        }
        Ok(())
    }

    // ----- reports -----

    fn reports_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Reports & Statistics ===")?;
        writeln!(self.out, "1. Generate reports")?;
        writeln!(self.out, "2. Display student statistics")?;
        writeln!(self.out, "3. Display grade scale")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => self.generate_report(),
            "2" => self.statistics(),
            "3" => {
                writeln!(self.out, "\n=== Grade Scale ===")?;
                for band in &GRADE_BANDS {
                    writeln!(self.out, "{band}")?;
                }
                Ok(())
            }
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn generate_report(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Generate Reports ===")?;
        writeln!(self.out, "1. Course-wise report")?;
        writeln!(self.out, "2. Professor-wise report")?;
        writeln!(self.out, "3. Student-wise report")?;
        let rendered = match self.prompt("Enter choice: ")?.as_str() {
            "1" => {
                let id = self.prompt("Enter course ID: ")?;
                self.registry.course_report(&id).map(|r| r.to_string())
            }
            "2" => {
                let id = self.prompt("Enter professor ID: ")?;
                self.registry.professor_report(&id).map(|r| r.to_string())
            }
            "3" => {
                let email = self.prompt("Enter student email: ")?;
                self.registry.student_report(&email).map(|r| r.to_string())
            }
            _ => return Ok(writeln!(self.out, "Invalid choice!")?),
        };
        match rendered {
            Ok(text) => write!(self.out, "\n{text}")?,
            Err(e) => writeln!(self.out, "✗ {e}")?,
        }
        Ok(())
    }

    fn statistics(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Student Statistics ===")?;
        if self.registry.students().is_empty() {
            writeln!(self.out, "No students in the system!")?;
            return Ok(());
        }
        writeln!(self.out, "Total Students: {}", self.registry.students().len())?;
        match self.registry.statistics() {
            Some(stats) => write!(self.out, "{stats}")?,
            None => writeln!(self.out, "No marks data available!")?,
        }
        Ok(())
    }

    // ----- login -----

    fn login_menu(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Login & Users ===")?;
        match self.registry.current_user() {
            Some(user) => writeln!(self.out, "Logged in as {} ({})", user.email_id, user.role)?,
            None => writeln!(self.out, "Not logged in")?,
        }
        writeln!(self.out, "1. Log in")?;
        writeln!(self.out, "2. Log out")?;
        writeln!(self.out, "3. Change password")?;
        writeln!(self.out, "4. Display all users")?;
        writeln!(self.out, "5. Add user (with role)")?;
        writeln!(self.out, "6. Delete user")?;
        match self.prompt("Enter choice: ")?.as_str() {
            "1" => {
                let email = self.prompt("Email: ")?;
                let password = self.prompt("Password: ")?;
                match self.registry.login(&email, &password) {
                    Ok(user) => {
                        let line = format!("✓ Welcome, {} ({})", user.email_id, user.role);
                        writeln!(self.out, "{line}")?;
                    }
                    Err(e) => writeln!(self.out, "✗ {e}")?,
                }
                Ok(())
            }
            "2" => {
                match self.registry.logout() {
                    Ok(email) => writeln!(self.out, "✓ {email} logged out")?,
                    Err(e) => writeln!(self.out, "✗ {e}")?,
                }
                Ok(())
            }
            "3" => {
                let email = self.prompt("Email: ")?;
                let old = self.prompt("Current password: ")?;
                let new = self.prompt("New password: ")?;
                let result = self.registry.change_password(&email, &old, &new);
                self.outcome(result, "Password changed successfully!")
            }
            "4" => {
                writeln!(self.out, "\n=== All Users ===")?;
                for user in self.registry.users() {
                    writeln!(self.out, "{user}")?;
                }
                Ok(())
            }
            "5" => self.add_user(),
            "6" => {
                let email = self.prompt("Enter user email to delete: ")?;
                let result = self.registry.delete_user(&email).map(drop);
                self.outcome(result, &format!("User {email} deleted successfully!"))
            }
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn add_user(&mut self) -> MenuResult {
        writeln!(self.out, "\n=== Add User ===")?;
        let email = self.prompt("Email: ")?;
        let password = self.prompt("Password: ")?;
        let role = self.prompt("Role (student/professor/admin) [student]: ")?;
        let role = if role.is_empty() {
            Ok(Role::Student)
        } else {
            role.parse::<Role>()
        };
        let user = match role.and_then(|role| LoginUser::new(email, &password, role)) {
            Ok(user) => user,
            Err(e) => return Ok(writeln!(self.out, "✗ {e}")?),
        };
        let message = format!("User {} added as {}", user.email_id, user.role);
        let result = self.registry.add_user(user);
        self.outcome(result, &message)
    }
}
