//! Summary statistics over pools of marks

/// Arithmetic mean, `None` for an empty pool
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(marks: &[i32]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    let total: i64 = marks.iter().copied().map(i64::from).sum();
    Some(total as f64 / marks.len() as f64)
}

/// Median; the mean of the two middle values for an even-sized pool
#[must_use]
pub fn median(marks: &[i32]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    let mut sorted = marks.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    } else {
        Some(f64::from(sorted[mid]))
    }
}

/// Mean, median and range of a pool of marks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStatistics {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Highest mark
    pub max: i32,
    /// Lowest mark
    pub min: i32,
}

impl MarkStatistics {
    /// Summarise a pool of marks, `None` when it is empty
    #[must_use]
    pub fn from_marks(marks: &[i32]) -> Option<Self> {
        Some(Self {
            count: marks.len(),
            mean: mean(marks)?,
            median: median(marks)?,
            max: *marks.iter().max()?,
            min: *marks.iter().min()?,
        })
    }
}
