/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Flat-file loaders for student and teacher records.
//!
//! One record per line, comma-separated, every field trimmed:
//!
//! ```text
//! # students.txt – 8 fields
//! S001, Aarav Sharma, aarav@uni.edu, 12 MG Road, Chandigarh, PB, 160001, FRESHMAN
//!
//! # teachers.txt – 9 fields
//! T001, Meera Iyer, meera@uni.edu, 4 Lake View, Patiala, PB, 147001, Computer Science, Backend Development
//! ```
//!
//! | Problem | Outcome |
//! |---|---|
//! | File missing | `Err(LoadError::Open)` – load aborted |
//! | Line unreadable (I/O error, invalid UTF-8) | `Err(LoadError::Read)` – load aborted |
//! | Wrong number of fields, blank lines included | row skipped, `warn!` emitted, recorded in [`LoadReport::skipped`] |
//! | Unknown grade level | `Err(LoadError::InvalidRecord)` – load aborted |

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::person::{Address, GradeLevel, GradeLevelError};
use crate::student::Student;
use crate::teacher::Teacher;

/// Fields per line in a student file.
pub const STUDENT_FIELDS: usize = 8;
/// Fields per line in a teacher file.
pub const TEACHER_FIELDS: usize = 9;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {} at line {line}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A row had the right shape but a field value was unusable.
    #[error("invalid {kind} record on line {line}")]
    InvalidRecord {
        kind: &'static str,
        line: usize,
        #[source]
        source: GradeLevelError,
    },
}

// ── LoadReport ────────────────────────────────────────────────────────────────

/// A row dropped because its field count was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
    pub expected: usize,
    pub found: usize,
}

/// Records parsed from one file, plus the rows that were skipped.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

// ── Shared row parser ─────────────────────────────────────────────────────────

fn parse_rows<R, T, F>(
    reader: R,
    origin: &Path,
    kind: &'static str,
    expected: usize,
    mut build: F,
) -> Result<LoadReport<T>, LoadError>
where
    R: BufRead,
    F: FnMut(usize, &[String]) -> Result<T, LoadError>,
{
    let mut report = LoadReport {
        records: Vec::new(),
        skipped: Vec::new(),
    };

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            path: origin.to_path_buf(),
            line: line_no,
            source,
        })?;

        let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
        if fields.len() != expected {
            warn!(
                line = line_no,
                expected,
                found = fields.len(),
                "invalid {kind} record, skipping: {line}"
            );
            report.skipped.push(SkippedRow {
                line: line_no,
                content: line,
                expected,
                found: fields.len(),
            });
            continue;
        }

        report.records.push(build(line_no, &fields)?);
    }

    Ok(report)
}

fn address_from(fields: &[String]) -> Address {
    Address {
        street: fields[3].clone(),
        city: fields[4].clone(),
        state: fields[5].clone(),
        zip_code: fields[6].clone(),
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

// ── Students ──────────────────────────────────────────────────────────────────

/// Parse student rows (`id, name, email, street, city, state, zip, grade_level`).
///
/// `origin` names the input in errors.
pub fn parse_students<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<LoadReport<Student>, LoadError> {
    parse_rows(reader, origin, "student", STUDENT_FIELDS, |line, f| {
        let grade_level = f[7].parse::<GradeLevel>().map_err(|source| LoadError::InvalidRecord {
            kind: "student",
            line,
            source,
        })?;
        Ok(Student::new(
            f[0].clone(),
            f[1].clone(),
            f[2].clone(),
            address_from(f),
            grade_level,
        ))
    })
}

pub fn load_students(path: &Path) -> Result<LoadReport<Student>, LoadError> {
    let report = parse_students(open(path)?, path)?;
    info!(
        path = %path.display(),
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "students loaded"
    );
    Ok(report)
}

// ── Teachers ──────────────────────────────────────────────────────────────────

/// Parse teacher rows (`id, name, email, street, city, state, zip,
/// department, specialization`).
pub fn parse_teachers<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<LoadReport<Teacher>, LoadError> {
    parse_rows(reader, origin, "teacher", TEACHER_FIELDS, |_, f| {
        Ok(Teacher::new(
            f[0].clone(),
            f[1].clone(),
            f[2].clone(),
            address_from(f),
            f[7].clone(),
            f[8].clone(),
        ))
    })
}

pub fn load_teachers(path: &Path) -> Result<LoadReport<Teacher>, LoadError> {
    let report = parse_teachers(open(path)?, path)?;
    info!(
        path = %path.display(),
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "teachers loaded"
    );
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
