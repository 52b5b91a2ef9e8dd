//! CSV persistence for the four record tables
//!
//! Every table is a UTF-8 CSV file with a header row. Loading is best-effort: a
//! missing file is an empty table, and a malformed row stops the load while keeping
//! the rows decoded before it. Saving truncates and rewrites the whole file.

mod rows;

pub use rows::{CourseRow, LoginRow, ProfessorRow, StudentRow};

use crate::core::error::StorageError;
use crate::{debug, error, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A record type persisted as one CSV table
pub trait Table: Sized {
    /// Human readable table name used in messages
    const NAME: &'static str;
    /// File name inside the data directory
    const FILE_NAME: &'static str;
    /// Header row written on save, in column order
    const COLUMNS: &'static [&'static str];
    /// Columns that must be present in a loaded header
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Flat row representation
    type Row: Serialize + DeserializeOwned;

    /// Encode a record as a row
    fn to_row(&self) -> Self::Row;

    /// Decode a row; `row_number` is 1-based and only used for messages
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidField`] if a field cannot be decoded
    fn from_row(row: Self::Row, row_number: usize) -> Result<Self, StorageError>;
}

/// Result of reading a table: the records decoded plus the error that stopped reading, if any
#[derive(Debug)]
pub struct TableLoad<T> {
    /// Records decoded before any failure
    pub records: Vec<T>,
    /// Failure that ended the load early
    pub error: Option<StorageError>,
}

/// Directory-backed store holding one CSV file per table
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing table `T`
    #[must_use]
    pub fn path_of<T: Table>(&self) -> PathBuf {
        self.dir.join(T::FILE_NAME)
    }

    /// Read table `T`, reporting the failure alongside any partial result
    #[must_use]
    pub fn read<T: Table>(&self) -> TableLoad<T> {
        let path = self.path_of::<T>();
        let mut records = Vec::new();
        let error = read_into(&path, &mut records).err();
        TableLoad { records, error }
    }

    /// Load table `T`; never fails
    ///
    /// Failures are logged and whatever was decoded before them is returned.
    #[must_use]
    pub fn load_all<T: Table>(&self) -> Vec<T> {
        let load = self.read::<T>();
        if let Some(err) = &load.error {
            error!(
                "Error loading {} from {}: {err}",
                T::NAME,
                self.path_of::<T>().display()
            );
            if !load.records.is_empty() {
                warn!("Kept {} {} row(s) read before the error", load.records.len(), T::NAME);
            }
        }
        debug!("Loaded {} {} record(s)", load.records.len(), T::NAME);
        load.records
    }

    /// Overwrite the file backing table `T` with `records`
    ///
    /// A failure part way through can leave a truncated file behind.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written
    pub fn save_all<T: Table>(&self, records: &[T]) -> Result<(), StorageError> {
        let path = self.path_of::<T>();
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(T::COLUMNS)?;
        for record in records {
            writer.serialize(record.to_row())?;
        }
        writer
            .flush()
            .map_err(|source| StorageError::Io { path: path.clone(), source })?;

        debug!("Saved {} {} record(s) to {}", records.len(), T::NAME, path.display());
        Ok(())
    }
}

fn read_into<T: Table>(path: &Path, records: &mut Vec<T>) -> Result<(), StorageError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);
    let headers = reader.headers()?.clone();
    if let Some(column) = T::REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(StorageError::HeaderMismatch {
            table: T::NAME,
            column,
        });
    }

    for (idx, row) in reader.deserialize::<T::Row>().enumerate() {
        let record = T::from_row(row?, idx + 1)?;
        records.push(record);
    }
    Ok(())
}
