/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Student record: grade level, per-course scores and grade notifications.
//!
//! # Score model
//! `courses` maps course id → `Option<f32>`.  A key exists as soon as the
//! student is enrolled; the value stays `None` until the first grade arrives.
//! Any `Some(score)` is guaranteed to lie in `[MIN_SCORE, MAX_SCORE]`.
//!
//! `BTreeMap` keeps courses sorted by id, which fixes the order used by
//! reports and by the grade simulation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::observer::{GradeChange, GradeObserver, ObserverList, Subscription, ENROLLMENT_SENTINEL};
use crate::person::{Address, GradeLevel, Member, Person, Role};

/// Lowest accepted course score (inclusive).
pub const MIN_SCORE: f32 = 0.0;
/// Highest accepted course score (inclusive).
pub const MAX_SCORE: f32 = 100.0;

// ── GradeUpdate ───────────────────────────────────────────────────────────────

/// What [`Student::update_wam`] did with a score.
///
/// None of these are errors: rejected scores are logged and ignored, and
/// grading a course the student is not enrolled in is a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeUpdate {
    /// The score was stored; `previous` is what it replaced.
    Applied { previous: Option<f32> },
    /// The score was outside `[MIN_SCORE, MAX_SCORE]` (or NaN).
    OutOfRange,
    /// The student is not enrolled in the course.
    NotEnrolled,
}

impl GradeUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, GradeUpdate::Applied { .. })
    }
}

// ── Student ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Student {
    person: Person,
    grade_level: GradeLevel,
    courses: BTreeMap<String, Option<f32>>,
    observers: ObserverList,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
        grade_level: GradeLevel,
    ) -> Self {
        Self {
            person: Person::new(id, name, email, address),
            grade_level,
            courses: BTreeMap::new(),
            observers: ObserverList::new(),
        }
    }

    pub fn grade_level(&self) -> GradeLevel {
        self.grade_level
    }

    /// Course id → score (`None` until graded).
    pub fn courses(&self) -> &BTreeMap<String, Option<f32>> {
        &self.courses
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }

    /// Register a grade-change listener.  See [`crate::observer`].
    pub fn subscribe(&self, observer: Arc<dyn GradeObserver>) -> Subscription {
        self.observers.subscribe(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Add `course_id` with no score yet.
    ///
    /// Fires one notification (`previous = None`, `current =
    /// ENROLLMENT_SENTINEL`) the first time; later calls for the same course
    /// do nothing.  Returns `true` if the course was newly added.
    pub fn enroll(&mut self, course_id: &str) -> bool {
        if self.courses.contains_key(course_id) {
            return false;
        }
        self.courses.insert(course_id.to_string(), None);
        debug!(student = %self.person.id(), course = %course_id, "enrolled");

        self.observers.notify(&GradeChange {
            student_id: self.person.id().to_string(),
            course_id: course_id.to_string(),
            previous: None,
            current: ENROLLMENT_SENTINEL,
        });
        true
    }

    /// Record `score` for `course_id`.
    ///
    /// Out-of-range scores are logged and dropped; unknown courses are
    /// ignored.  Either way the stored scores are left untouched.
    pub fn update_wam(&mut self, course_id: &str, score: f32) -> GradeUpdate {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            warn!(
                student = %self.person.id(),
                course = %course_id,
                score = score,
                "invalid WAM score, must be between {MIN_SCORE} and {MAX_SCORE}"
            );
            return GradeUpdate::OutOfRange;
        }

        let Some(slot) = self.courses.get_mut(course_id) else {
            return GradeUpdate::NotEnrolled;
        };
        let previous = slot.replace(score);

        self.observers.notify(&GradeChange {
            student_id: self.person.id().to_string(),
            course_id: course_id.to_string(),
            previous,
            current: score,
        });
        GradeUpdate::Applied { previous }
    }

    /// Mean of all recorded scores; `0.0` if nothing has been graded.
    ///
    /// Ungraded courses count neither in the sum nor in the divisor.
    pub fn overall_wam(&self) -> f32 {
        mean_of_graded(self.courses.values())
    }
}

/// Mean of the `Some` scores in `scores`; `0.0` when there are none.
pub(crate) fn mean_of_graded<'a>(scores: impl IntoIterator<Item = &'a Option<f32>>) -> f32 {
    let (sum, count) = scores
        .into_iter()
        .flatten()
        .fold((0.0_f32, 0_u32), |(sum, n), score| (sum + score, n + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

impl Member for Student {
    fn person(&self) -> &Person {
        &self.person
    }

    fn role(&self) -> Role {
        Role::Student
    }

    fn info(&self) -> BTreeMap<&'static str, String> {
        let mut info = self.person.info();
        info.insert("grade_level", self.grade_level.to_string());
        info
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn student() -> Student {
        Student::new(
            "S001",
            "Alice",
            "alice@example.com",
            Address::default(),
            GradeLevel::Junior,
        )
    }

    /// Attach a listener that records every event; the subscription is
    /// detached so it lives as long as the student.
    fn record_changes(s: &Student) -> Arc<Mutex<Vec<GradeChange>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        s.subscribe(Arc::new(move |c: &GradeChange| sink.lock().push(c.clone())))
            .detach();
        log
    }

    // ── enroll ────────────────────────────────────────────────────────────────

    #[test]
    fn enroll_adds_ungraded_course_and_notifies_once() {
        let mut s = student();
        let log = record_changes(&s);

        assert!(s.enroll("CS101"));
        assert!(!s.enroll("CS101"), "second enroll is a no-op");

        assert_eq!(s.courses().len(), 1);
        assert_eq!(s.courses()["CS101"], None);

        let events = log.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].previous, None);
        assert_eq!(events[0].current, ENROLLMENT_SENTINEL);
        assert_eq!(events[0].student_id, "S001");
        assert_eq!(events[0].course_id, "CS101");
    }

    // ── update_wam ────────────────────────────────────────────────────────────

    #[test]
    fn update_wam_accepts_bounds_inclusive() {
        let mut s = student();
        s.enroll("CS101");

        assert!(s.update_wam("CS101", 0.0).is_applied());
        assert!(s.update_wam("CS101", 100.0).is_applied());
        assert_eq!(s.courses()["CS101"], Some(100.0));
    }

    #[test]
    fn update_wam_rejects_out_of_range_and_keeps_score() {
        let mut s = student();
        s.enroll("CS101");
        s.update_wam("CS101", 75.0);
        let log = record_changes(&s);

        for bad in [-0.1, 100.1, -50.0, 1000.0, f32::NAN] {
            assert_eq!(s.update_wam("CS101", bad), GradeUpdate::OutOfRange);
        }

        assert_eq!(s.courses()["CS101"], Some(75.0));
        assert!(log.lock().is_empty(), "rejected scores must not notify");
    }

    #[test]
    fn update_wam_on_unknown_course_is_noop() {
        let mut s = student();
        let log = record_changes(&s);

        assert_eq!(s.update_wam("CS999", 80.0), GradeUpdate::NotEnrolled);
        assert!(s.courses().is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn update_wam_reports_previous_score() {
        let mut s = student();
        s.enroll("CS101");
        let log = record_changes(&s);

        assert_eq!(
            s.update_wam("CS101", 60.0),
            GradeUpdate::Applied { previous: None }
        );
        assert_eq!(
            s.update_wam("CS101", 85.0),
            GradeUpdate::Applied { previous: Some(60.0) }
        );

        let events = log.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].previous, Some(60.0));
        assert_eq!(events[1].current, 85.0);
    }

    // ── overall_wam ───────────────────────────────────────────────────────────

    #[test]
    fn overall_wam_is_zero_without_grades() {
        let mut s = student();
        assert_eq!(s.overall_wam(), 0.0);
        s.enroll("CS101");
        s.enroll("CS201");
        assert_eq!(s.overall_wam(), 0.0);
    }

    #[test]
    fn overall_wam_averages_graded_courses() {
        let mut s = student();
        s.enroll("CS101");
        s.enroll("CS201");
        s.update_wam("CS101", 80.0);
        s.update_wam("CS201", 60.0);
        assert!((s.overall_wam() - 70.0).abs() < 1e-6);
    }

    #[test]
    fn overall_wam_ignores_ungraded_courses() {
        let mut s = student();
        s.enroll("A");
        s.enroll("B");
        s.update_wam("A", 90.0);
        assert!((s.overall_wam() - 90.0).abs() < 1e-6);

        s.update_wam("B", 70.0);
        assert!((s.overall_wam() - 80.0).abs() < 1e-6);
    }

    // ── Member ────────────────────────────────────────────────────────────────

    #[test]
    fn info_includes_grade_level() {
        let s = student();
        let info = s.info();
        assert_eq!(info["grade_level"], "JUNIOR");
        assert_eq!(info["id"], "S001");
        assert_eq!(s.role(), Role::Student);
    }
}
