/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Course record: seat capacity, enrolled student ids and prerequisites.
//!
//! Courses reference students by id only; the
//! [`School`](crate::school::School) roster owns the student records.
//! Prerequisites are recorded but not checked at enrollment time.

use std::collections::BTreeSet;

/// Seats per course when the catalog does not say otherwise.
pub const DEFAULT_CAPACITY: usize = 30;

#[derive(Debug, Clone)]
pub struct Course {
    id: String,
    name: String,
    credits: u32,
    capacity: usize,
    enrolled_students: BTreeSet<String>,
    prerequisites: BTreeSet<String>,
}

impl Course {
    /// New course with [`DEFAULT_CAPACITY`] seats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self::with_capacity(id, name, credits, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(
        id: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        capacity: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits,
            capacity,
            enrolled_students: BTreeSet::new(),
            prerequisites: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled_students.len()
    }

    pub fn enrolled_students(&self) -> &BTreeSet<String> {
        &self.enrolled_students
    }

    pub fn prerequisites(&self) -> &BTreeSet<String> {
        &self.prerequisites
    }

    pub fn add_prerequisite(&mut self, course_id: impl Into<String>) {
        self.prerequisites.insert(course_id.into());
    }

    /// Take a seat for `student_id`.
    ///
    /// Fails without touching the roster once `capacity` seats are taken.
    /// An id that already holds a seat succeeds while the course has room,
    /// without taking a second seat.
    pub fn enroll_student(&mut self, student_id: impl Into<String>) -> bool {
        if self.enrolled_students.len() >= self.capacity {
            return false;
        }
        self.enrolled_students.insert(student_id.into());
        true
    }

    /// `capacity - enrolled_count`.
    pub fn available_seats(&self) -> i64 {
        self.capacity as i64 - self.enrolled_students.len() as i64
    }

    pub fn is_full(&self) -> bool {
        self.enrolled_students.len() >= self.capacity
    }
}
