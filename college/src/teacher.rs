/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Teacher record.

use std::collections::{BTreeMap, BTreeSet};

use crate::person::{Address, Member, Person, Role};

#[derive(Debug, Clone)]
pub struct Teacher {
    person: Person,
    department: String,
    specialization: String,
    /// Course ids this teacher teaches.  No cap, and nothing stops two
    /// teachers sharing a course.
    assigned_courses: BTreeSet<String>,
}

impl Teacher {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
        department: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Self {
        Self {
            person: Person::new(id, name, email, address),
            department: department.into(),
            specialization: specialization.into(),
            assigned_courses: BTreeSet::new(),
        }
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn assigned_courses(&self) -> &BTreeSet<String> {
        &self.assigned_courses
    }

    /// Returns `true` if the course was not already assigned.
    pub fn assign_course(&mut self, course_id: impl Into<String>) -> bool {
        self.assigned_courses.insert(course_id.into())
    }

    pub fn course_load(&self) -> usize {
        self.assigned_courses.len()
    }
}

impl Member for Teacher {
    fn person(&self) -> &Person {
        &self.person
    }

    fn role(&self) -> Role {
        Role::Teacher
    }

    fn info(&self) -> BTreeMap<&'static str, String> {
        let mut info = self.person.info();
        info.insert("department", self.department.clone());
        info.insert("specialization", self.specialization.clone());
        info
    }
}
