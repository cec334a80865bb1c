/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Human-readable rendering of records.
//!
//! [`Visitor`] has one method per record kind; [`Visitable::accept`] routes a
//! record to the matching method.  [`DisplayVisitor`] is the colourised,
//! multi-line renderer used by the binary.  Colour output follows the
//! `colored` crate's global switch (`NO_COLOR`, `--no-color`).

use colored::{Color, ColoredString, Colorize};

use crate::course::Course;
use crate::person::{Address, Member};
use crate::student::Student;
use crate::teacher::Teacher;

/// One operation over every record kind.
pub trait Visitor {
    type Output;

    fn visit_student(&self, student: &Student) -> Self::Output;
    fn visit_teacher(&self, teacher: &Teacher) -> Self::Output;
    fn visit_course(&self, course: &Course) -> Self::Output;
}

/// Implemented by every record a [`Visitor`] can process.
pub trait Visitable {
    fn accept<V: Visitor>(&self, visitor: &V) -> V::Output;
}

impl Visitable for Student {
    fn accept<V: Visitor>(&self, visitor: &V) -> V::Output {
        visitor.visit_student(self)
    }
}

impl Visitable for Teacher {
    fn accept<V: Visitor>(&self, visitor: &V) -> V::Output {
        visitor.visit_teacher(self)
    }
}

impl Visitable for Course {
    fn accept<V: Visitor>(&self, visitor: &V) -> V::Output {
        visitor.visit_course(self)
    }
}

// ── DisplayVisitor ────────────────────────────────────────────────────────────

/// Renders a record as a block of `Label: value` lines under a bold,
/// coloured header.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayVisitor;

fn header(title: &str, color: Color) -> ColoredString {
    title.bold().color(color)
}

fn address_line(address: &Address) -> String {
    format!("{}, {}, {}", address.street, address.city, address.state)
}

impl Visitor for DisplayVisitor {
    type Output = String;

    fn visit_student(&self, student: &Student) -> String {
        let p = student.person();
        format!(
            "{}\nName: {}\nID: {}\nGrade Level: {}\nEmail: {}\nAddress: {}\nWAM: {:.1}\n",
            header("STUDENT", Color::Blue),
            p.name(),
            p.id(),
            student.grade_level(),
            p.email(),
            address_line(p.address()),
            student.overall_wam(),
        )
    }

    fn visit_teacher(&self, teacher: &Teacher) -> String {
        let p = teacher.person();
        format!(
            "{}\nName: {}\nID: {}\nDepartment: {}\nSpecialization: {}\nEmail: {}\nAddress: {}\n",
            header("TEACHER", Color::Green),
            p.name(),
            p.id(),
            teacher.department(),
            teacher.specialization(),
            p.email(),
            address_line(p.address()),
        )
    }

    fn visit_course(&self, course: &Course) -> String {
        format!(
            "{}\nName: {}\nID: {}\nCredits: {}\nEnrolled: {}/{}\n",
            header("COURSE", Color::Yellow),
            course.name(),
            course.id(),
            course.credits(),
            course.enrolled_count(),
            course.capacity(),
        )
    }
}

/// Colour for a WAM in rankings: green ≥ 70, yellow ≥ 60, red below.
pub fn wam_color(wam: f32) -> Color {
    if wam < 60.0 {
        Color::Red
    } else if wam < 70.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
