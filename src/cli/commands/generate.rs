//! Sample data command handler

use check_my_grade::core::sample::{self, SAMPLE_PASSWORD};
use check_my_grade::{info, Registry, RegistryError};

/// Generate `count` students into `registry` and print a summary
///
/// # Errors
/// Returns the registry's save failure
pub fn run(registry: &mut Registry, count: usize) -> Result<(), RegistryError> {
    println!("Generating {count} sample students...");
    let data = sample::generate(count, &mut rand::thread_rng());
    let enrollments = data.enrollment_count();
    let mean = data.mean_marks();

    let added = registry.import(data)?;
    info!("Sample data written to {}", registry.store().dir().display());

    println!("\n✓ Generated and saved sample data");
    println!("  - {added} students added ({} skipped as duplicates)", count - added);
    println!("  - Default password for all users: {SAMPLE_PASSWORD}");
    if let Some(mean) = mean {
        #[allow(clippy::cast_precision_loss)]
        let per_student = enrollments as f64 / count as f64;
        println!("\nStatistics:");
        println!("  - Average courses per student: {per_student:.2}");
        println!("  - Average marks: {mean:.2}");
        println!("  - Total course enrollments: {enrollments}");
    }
    Ok(())
}
