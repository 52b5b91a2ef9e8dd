//! Letter grades and the fixed marks-to-grade table

use std::fmt;
use std::str::FromStr;

/// A letter grade as stored in the students table
///
/// Letters outside A–F survive a load/save round trip as [`Grade::Other`] and
/// count as zero grade points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grade {
    /// 90 and above
    A,
    /// 80–89
    B,
    /// 70–79
    C,
    /// 60–69
    D,
    /// Below 60
    F,
    /// Any other stored letter
    Other(String),
}

impl Grade {
    /// Grade for a mark, using inclusive lower bounds evaluated top-down
    ///
    /// Marks are not range checked: anything above 100 is an A, anything
    /// negative an F.
    #[must_use]
    pub fn from_marks(marks: i32) -> Self {
        GRADE_BANDS
            .iter()
            .find(|band| marks >= band.min_marks)
            .map_or(Self::F, |band| band.grade.clone())
    }

    /// Grade points on the four point scale
    #[must_use]
    pub const fn points(&self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F | Self::Other(_) => 0.0,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
            Self::C => f.write_str("C"),
            Self::D => f.write_str("D"),
            Self::F => f.write_str("F"),
            Self::Other(letter) => f.write_str(letter),
        }
    }
}

impl FromStr for Grade {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "D" => Self::D,
            "F" => Self::F,
            other => Self::Other(other.to_string()),
        })
    }
}

/// One row of the grading scale: marks in `[min_marks, max_marks)` earn `grade`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeBand {
    /// Letter awarded
    pub grade: Grade,
    /// Inclusive lower bound
    pub min_marks: i32,
    /// Exclusive upper bound (`i32::MAX` for the top band)
    pub max_marks: i32,
}

/// The fixed grading scale, highest band first
pub static GRADE_BANDS: [GradeBand; 5] = [
    GradeBand { grade: Grade::A, min_marks: 90, max_marks: i32::MAX },
    GradeBand { grade: Grade::B, min_marks: 80, max_marks: 90 },
    GradeBand { grade: Grade::C, min_marks: 70, max_marks: 80 },
    GradeBand { grade: Grade::D, min_marks: 60, max_marks: 70 },
    GradeBand { grade: Grade::F, min_marks: i32::MIN, max_marks: 60 },
];

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_marks, self.max_marks) {
            (i32::MIN, max) => write!(f, "Grade {}: below {max}", self.grade),
            (min, i32::MAX) => write!(f, "Grade {}: {min} and above", self.grade),
            (min, max) => write!(f, "Grade {}: {min} - {}", self.grade, max - 1),
        }
    }
}
