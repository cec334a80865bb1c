/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! College – in-memory school records
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── person      – Address, Person, GradeLevel, Member trait
//! ├── observer    – grade-change events and subscriptions
//! ├── student     – Student record, score bookkeeping
//! ├── teacher     – Teacher record, course assignments
//! ├── course      – Course record, seat capacity
//! ├── school/     – School aggregate, enrollment, ranking, reports
//! ├── display     – Visitor + colourised DisplayVisitor
//! ├── loader/     – flat-file student / teacher loaders
//! └── config/     – YAML dataset configuration
//! ```

pub mod config;
pub mod course;
pub mod display;
pub mod loader;
pub mod observer;
pub mod person;
pub mod school;
pub mod student;
pub mod teacher;
