/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The school aggregate.
//!
//! [`School`] owns every student, teacher and course record by value inside a
//! single [`Roster`].  Everything else refers to records by id: a course keeps
//! the ids of its students, a teacher the ids of its courses.
//!
//! # Locking
//! One `RwLock` guards the whole roster.
//!
//! | Operation | Lock |
//! |---|---|
//! | `add_*`, `enroll_student_in_course`, `assign_course_to_teacher`, `update_wam` | write |
//! | `department_stats`, `top_performers`, accessors | read |
//! | `generate_all_student_reports` | read, released before any task is spawned |
//! | `simulate_wam_updates` | write, taken and released once per update |
//!
//! Grade observers run while the write lock is held, so an observer must not
//! call back into the `School`.  A panicking observer unwinds through the
//! calling operation; changes made before the notification stay in place.
//!
//! Each student's observer list has its own mutex.  Enrollment, grading and
//! `observe_grades` take it while holding the roster lock, always in the
//! order roster → observer list, and never the other way round.
//!
//! # Lookup
//! Ids are not checked for uniqueness.  Lookups resolve to the **first**
//! record added with a given id; later duplicates stay on the roster (and in
//! listings) but cannot be reached by id.

pub mod error;
pub mod report;

pub use error::SchoolError;
pub use report::StudentReport;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::course::Course;
use crate::observer::{GradeObserver, Subscription};
use crate::person::Member;
use crate::student::{GradeUpdate, Student};
use crate::teacher::Teacher;

use report::StudentSnapshot;

/// Scores drawn by [`School::simulate_wam_updates`] fall in this range.
pub const SIMULATED_SCORE_RANGE: std::ops::Range<f32> = 50.0..95.0;

// ── Roster ────────────────────────────────────────────────────────────────────

/// Record arena: insertion-ordered storage plus a first-match id index.
#[derive(Debug, Default)]
struct Roster {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    student_index: HashMap<String, usize>,
    teacher_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
}

/// Record `id → pos` unless `id` is already indexed.
fn index_first(index: &mut HashMap<String, usize>, id: &str, pos: usize, kind: &str) {
    if index.contains_key(id) {
        warn!(
            kind = kind,
            id = %id,
            "duplicate id added; lookups keep resolving to the first record"
        );
        return;
    }
    index.insert(id.to_string(), pos);
}

// ── Query results ─────────────────────────────────────────────────────────────

/// One entry of [`School::top_performers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Performer {
    pub name: String,
    pub wam: f32,
}

/// One grade applied by [`School::simulate_wam_updates`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedUpdate {
    pub student_id: String,
    pub student_name: String,
    pub course_id: String,
    pub score: f32,
}

// ── School ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct School {
    name: String,
    roster: RwLock<Roster>,
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roster: RwLock::new(Roster::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Registration ──────────────────────────────────────────────────────────

    pub fn add_student(&self, student: Student) {
        let mut roster = self.roster.write();
        let pos = roster.students.len();
        index_first(&mut roster.student_index, student.id(), pos, "student");
        debug!(student = %student.id(), "student added");
        roster.students.push(student);
    }

    pub fn add_teacher(&self, teacher: Teacher) {
        let mut roster = self.roster.write();
        let pos = roster.teachers.len();
        index_first(&mut roster.teacher_index, teacher.id(), pos, "teacher");
        debug!(teacher = %teacher.id(), "teacher added");
        roster.teachers.push(teacher);
    }

    pub fn add_course(&self, course: Course) {
        let mut roster = self.roster.write();
        let pos = roster.courses.len();
        index_first(&mut roster.course_index, course.id(), pos, "course");
        debug!(course = %course.id(), capacity = course.capacity(), "course added");
        roster.courses.push(course);
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Seat `student_id` in `course_id` and record the course on the student.
    ///
    /// The course seat is taken first; the student side only changes once the
    /// seat is secured, and cannot fail after that.  Prerequisites are not
    /// checked.
    ///
    /// # Errors
    /// * [`SchoolError::StudentNotFound`] / [`SchoolError::CourseNotFound`]:
    ///   nothing is modified.
    /// * [`SchoolError::CourseFull`]: nothing is modified.
    pub fn enroll_student_in_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<(), SchoolError> {
        let mut roster = self.roster.write();

        let Some(&s_pos) = roster.student_index.get(student_id) else {
            warn!(student = %student_id, course = %course_id, "enrollment failed: student not found");
            return Err(SchoolError::StudentNotFound {
                student: student_id.to_string(),
            });
        };
        let Some(&c_pos) = roster.course_index.get(course_id) else {
            warn!(student = %student_id, course = %course_id, "enrollment failed: course not found");
            return Err(SchoolError::CourseNotFound {
                course: course_id.to_string(),
            });
        };

        let course = &mut roster.courses[c_pos];
        if !course.enroll_student(student_id) {
            warn!(
                student = %student_id,
                course = %course_id,
                capacity = course.capacity(),
                "enrollment failed: course is full"
            );
            return Err(SchoolError::CourseFull {
                course: course_id.to_string(),
                capacity: course.capacity(),
            });
        }

        roster.students[s_pos].enroll(course_id);
        info!(student = %student_id, course = %course_id, "✓ enrolled");
        Ok(())
    }

    /// Add `course_id` to a teacher's assignments.  The course id is not
    /// checked against the catalog.  Returns `true` if newly assigned.
    pub fn assign_course_to_teacher(
        &self,
        teacher_id: &str,
        course_id: &str,
    ) -> Result<bool, SchoolError> {
        let mut roster = self.roster.write();
        let Some(&pos) = roster.teacher_index.get(teacher_id) else {
            return Err(SchoolError::TeacherNotFound {
                teacher: teacher_id.to_string(),
            });
        };
        let added = roster.teachers[pos].assign_course(course_id);
        debug!(teacher = %teacher_id, course = %course_id, added, "course assigned");
        Ok(added)
    }

    /// Grade one student's course.  See [`Student::update_wam`].
    pub fn update_wam(
        &self,
        student_id: &str,
        course_id: &str,
        score: f32,
    ) -> Result<GradeUpdate, SchoolError> {
        let mut roster = self.roster.write();
        let Some(&pos) = roster.student_index.get(student_id) else {
            return Err(SchoolError::StudentNotFound {
                student: student_id.to_string(),
            });
        };
        Ok(roster.students[pos].update_wam(course_id, score))
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    /// Register `observer` on one student.
    pub fn subscribe(
        &self,
        student_id: &str,
        observer: Arc<dyn GradeObserver>,
    ) -> Result<Subscription, SchoolError> {
        let roster = self.roster.read();
        let Some(&pos) = roster.student_index.get(student_id) else {
            return Err(SchoolError::StudentNotFound {
                student: student_id.to_string(),
            });
        };
        Ok(roster.students[pos].subscribe(observer))
    }

    /// Register `observer` on every student currently on the roster, in
    /// roster order.  Students added later are not covered.
    pub fn observe_grades(&self, observer: Arc<dyn GradeObserver>) -> Vec<Subscription> {
        self.roster
            .read()
            .students
            .iter()
            .map(|s| s.subscribe(Arc::clone(&observer)))
            .collect()
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Department name → number of teachers in it, sorted by department.
    pub fn department_stats(&self) -> BTreeMap<String, usize> {
        let roster = self.roster.read();
        let mut stats = BTreeMap::new();
        for teacher in &roster.teachers {
            *stats.entry(teacher.department().to_string()).or_insert(0) += 1;
        }
        stats
    }

    /// The `n` students with the highest overall WAM, best first.
    ///
    /// Students with equal WAM keep their roster order.
    pub fn top_performers(&self, n: usize) -> Vec<Performer> {
        let mut performers: Vec<Performer> = self
            .roster
            .read()
            .students
            .iter()
            .map(|s| Performer {
                name: s.name().to_string(),
                wam: s.overall_wam(),
            })
            .collect();

        // `sort_by` is stable.
        performers.sort_by(|a, b| b.wam.total_cmp(&a.wam));
        performers.truncate(n);
        performers
    }

    /// Build one [`StudentReport`] per student, concurrently.
    ///
    /// Reports are returned in roster order.  See [`report`] for the task
    /// model.
    pub async fn generate_all_student_reports(&self) -> Result<Vec<StudentReport>, SchoolError> {
        let snapshots: Vec<StudentSnapshot> = {
            let roster = self.roster.read();
            roster.students.iter().map(StudentSnapshot::of).collect()
        };
        report::generate(snapshots).await
    }

    /// Give every enrolled course of every student a random score drawn from
    /// [`SIMULATED_SCORE_RANGE`], pausing `delay` after each update.
    ///
    /// The work list is fixed up front: students in roster order, courses in
    /// course-id order.  Returns the updates that were applied.
    pub async fn simulate_wam_updates<R: Rng>(
        &self,
        rng: &mut R,
        delay: Duration,
    ) -> Vec<SimulatedUpdate> {
        let plan: Vec<(usize, String)> = {
            let roster = self.roster.read();
            roster
                .students
                .iter()
                .enumerate()
                .flat_map(|(pos, s)| s.courses().keys().map(move |c| (pos, c.clone())))
                .collect()
        };

        info!(updates = plan.len(), "simulating WAM updates");
        let mut applied = Vec::with_capacity(plan.len());

        for (pos, course_id) in plan {
            let score: f32 = rng.random_range(SIMULATED_SCORE_RANGE);

            let update = {
                let mut roster = self.roster.write();
                let student = &mut roster.students[pos];
                student.update_wam(&course_id, score).is_applied().then(|| SimulatedUpdate {
                    student_id: student.id().to_string(),
                    student_name: student.name().to_string(),
                    course_id: course_id.clone(),
                    score,
                })
            };

            if let Some(update) = update {
                debug!(student = %update.student_id, course = %update.course_id, score, "simulated grade");
                applied.push(update);
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        applied
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// All students in insertion order.  Holds the read lock while alive.
    pub fn students(&self) -> MappedRwLockReadGuard<'_, [Student]> {
        RwLockReadGuard::map(self.roster.read(), |r| r.students.as_slice())
    }

    /// All teachers in insertion order.  Holds the read lock while alive.
    pub fn teachers(&self) -> MappedRwLockReadGuard<'_, [Teacher]> {
        RwLockReadGuard::map(self.roster.read(), |r| r.teachers.as_slice())
    }

    /// All courses in insertion order.  Holds the read lock while alive.
    pub fn courses(&self) -> MappedRwLockReadGuard<'_, [Course]> {
        RwLockReadGuard::map(self.roster.read(), |r| r.courses.as_slice())
    }

    pub fn student(&self, id: &str) -> Option<MappedRwLockReadGuard<'_, Student>> {
        RwLockReadGuard::try_map(self.roster.read(), |r| {
            r.student_index.get(id).map(|&pos| &r.students[pos])
        })
        .ok()
    }

    pub fn teacher(&self, id: &str) -> Option<MappedRwLockReadGuard<'_, Teacher>> {
        RwLockReadGuard::try_map(self.roster.read(), |r| {
            r.teacher_index.get(id).map(|&pos| &r.teachers[pos])
        })
        .ok()
    }

    pub fn course(&self, id: &str) -> Option<MappedRwLockReadGuard<'_, Course>> {
        RwLockReadGuard::try_map(self.roster.read(), |r| {
            r.course_index.get(id).map(|&pos| &r.courses[pos])
        })
        .ok()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
