/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the [`School`](super::School) aggregate.
//!
//! | Variant | Raised by | State touched |
//! |---|---|---|
//! | `StudentNotFound` | enrollment, grading, subscription | nothing |
//! | `CourseNotFound` | enrollment | nothing |
//! | `TeacherNotFound` | course assignment | nothing |
//! | `CourseFull` | enrollment | nothing |
//! | `ReportTaskFailed` | report generation | n/a (read-only) |
//!
//! Every variant carries the ids involved so the caller can log it without
//! further lookups.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchoolError {
    /// No student with this id is on the roster.
    #[error("student '{student}' not found")]
    StudentNotFound { student: String },

    /// No course with this id is in the catalog.
    #[error("course '{course}' not found")]
    CourseNotFound { course: String },

    /// No teacher with this id is on the roster.
    #[error("teacher '{teacher}' not found")]
    TeacherNotFound { teacher: String },

    /// The course has no free seat left.
    #[error("course '{course}' is full ({capacity} seats)")]
    CourseFull { course: String, capacity: usize },

    /// A report task panicked or was aborted before producing its report.
    ///
    /// Returned only after every other report task has been joined.
    #[error("report task for student '{student}' failed: {reason}")]
    ReportTaskFailed { student: String, reason: String },
}
