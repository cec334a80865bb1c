/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-student reports, built concurrently.
//!
//! ```text
//! roster (read lock) ──copy──► Vec<StudentSnapshot> ──spawn 1 task each──► Vec<StudentReport>
//!                      lock released here             joined in roster order
//! ```
//!
//! Tasks own their snapshot, so nothing is shared between them and the
//! roster lock is never held across an `.await`.

use std::collections::BTreeMap;
use std::fmt;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::error::SchoolError;
use crate::person::{GradeLevel, Member};
use crate::student::{mean_of_graded, Student};

// ── StudentSnapshot ───────────────────────────────────────────────────────────

/// Owned copy of the student fields a report needs.
#[derive(Debug, Clone)]
pub(crate) struct StudentSnapshot {
    id: String,
    name: String,
    grade_level: GradeLevel,
    courses: BTreeMap<String, Option<f32>>,
}

impl StudentSnapshot {
    pub(crate) fn of(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name().to_string(),
            grade_level: student.grade_level(),
            courses: student.courses().clone(),
        }
    }
}

// ── StudentReport ─────────────────────────────────────────────────────────────

/// Report for one student.  `Display` renders the printable form:
///
/// ```text
/// Student Report for Alice (S001)
/// Grade Level: JUNIOR
/// Overall WAM: 72.5
/// Courses:
///  - CS101: 80.0
///  - CS201: No grade yet
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub student_id: String,
    pub name: String,
    pub grade_level: GradeLevel,
    pub overall_wam: f32,
    /// Course id and score, in course-id order.
    pub courses: Vec<(String, Option<f32>)>,
}

impl StudentReport {
    pub(crate) fn build(snapshot: StudentSnapshot) -> Self {
        let overall_wam = mean_of_graded(snapshot.courses.values());
        Self {
            student_id: snapshot.id,
            name: snapshot.name,
            grade_level: snapshot.grade_level,
            overall_wam,
            courses: snapshot.courses.into_iter().collect(),
        }
    }
}

impl fmt::Display for StudentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student Report for {} ({})", self.name, self.student_id)?;
        writeln!(f, "Grade Level: {}", self.grade_level)?;
        writeln!(f, "Overall WAM: {:.1}", self.overall_wam)?;
        writeln!(f, "Courses:")?;
        for (course_id, score) in &self.courses {
            match score {
                Some(score) => writeln!(f, " - {course_id}: {score:.1}")?,
                None => writeln!(f, " - {course_id}: No grade yet")?,
            }
        }
        Ok(())
    }
}

// ── Concurrent generation ─────────────────────────────────────────────────────

/// Spawn one task per snapshot and wait for all of them.
///
/// Reports come back in snapshot order regardless of completion order.
/// Every task is joined even after a failure; the first failure (in roster
/// order) is returned and every failure is logged.
pub(crate) async fn generate(
    snapshots: Vec<StudentSnapshot>,
) -> Result<Vec<StudentReport>, SchoolError> {
    info!(students = snapshots.len(), "generating student reports");

    let handles: Vec<(String, JoinHandle<StudentReport>)> = snapshots
        .into_iter()
        .map(|snapshot| {
            let id = snapshot.id.clone();
            (id, tokio::spawn(async move { StudentReport::build(snapshot) }))
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    let mut first_failure: Option<SchoolError> = None;

    for (student, handle) in handles {
        match handle.await {
            Ok(report) => {
                debug!(student = %student, wam = report.overall_wam, "report ready");
                reports.push(report);
            }
            Err(e) => {
                error!(student = %student, error = %e, "report task failed");
                first_failure.get_or_insert(SchoolError::ReportTaskFailed {
                    student,
                    reason: e.to_string(),
                });
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(reports),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Address;

    fn graded_student() -> Student {
        let mut s = Student::new(
            "S001",
            "Alice",
            "alice@example.com",
            Address::default(),
            GradeLevel::Junior,
        );
        s.enroll("CS101");
        s.enroll("CS201");
        s.update_wam("CS101", 80.0);
        s
    }

    #[test]
    fn report_text_lists_every_course() {
        let report = StudentReport::build(StudentSnapshot::of(&graded_student()));
        let text = report.to_string();

        assert_eq!(
            text,
            "Student Report for Alice (S001)\n\
             Grade Level: JUNIOR\n\
             Overall WAM: 80.0\n\
             Courses:\n \
             - CS101: 80.0\n \
             - CS201: No grade yet\n"
        );
    }

    #[test]
    fn report_wam_matches_student() {
        let s = graded_student();
        let report = StudentReport::build(StudentSnapshot::of(&s));
        assert_eq!(report.overall_wam, s.overall_wam());
        assert_eq!(report.courses.len(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_updates() {
        let mut s = graded_student();
        let snapshot = StudentSnapshot::of(&s);
        s.update_wam("CS201", 40.0);

        let report = StudentReport::build(snapshot);
        assert_eq!(report.courses[1], ("CS201".to_string(), None));
    }

    #[tokio::test]
    async fn generate_preserves_input_order() {
        let snapshots: Vec<StudentSnapshot> = (0..50)
            .map(|i| {
                StudentSnapshot::of(&Student::new(
                    format!("S{i:03}"),
                    format!("Student {i}"),
                    "",
                    Address::default(),
                    GradeLevel::Freshman,
                ))
            })
            .collect();

        let reports = generate(snapshots).await.unwrap();

        assert_eq!(reports.len(), 50);
        for (i, r) in reports.iter().enumerate() {
            assert_eq!(r.student_id, format!("S{i:03}"));
        }
    }

    #[tokio::test]
    async fn generate_with_no_students_is_empty() {
        let reports = generate(Vec::new()).await.unwrap();
        assert!(reports.is_empty());
    }
}
