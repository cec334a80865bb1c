/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! School dataset configuration.
//!
//! Everything the demo needs besides the student/teacher files: the school
//! name, the course catalog, which specialization teaches which course, the
//! enrollment list and the demo pacing.
//!
//! The expected YAML structure is:
//! ```yaml
//! name: "Chitkara University"
//! default_capacity: 30
//! courses:
//!   - id: CS101
//!     name: "Programming Paradigms"
//!     credits: 4
//!   - id: CS301
//!     name: "Backend Development"
//!     credits: 4
//!     capacity: 25
//!     prerequisites: [CS101]
//! teaching:
//!   "Programming Paradigms": CS101
//!   "Backend Development": CS301
//! enrollments:
//!   - [S001, CS101]
//!   - [S002, CS301]
//! demo:
//!   top_performers: 3
//!   update_delay_ms: 100
//! ```
//!
//! When no file is given, [`SchoolConfig::builtin`] supplies the stock demo
//! dataset (four courses, 23 enrollments).

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::course::{Course, DEFAULT_CAPACITY};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private – callers work with [`SchoolConfig`] instead.
#[derive(Debug, Deserialize)]
struct SchoolConfigFile {
    name: Option<String>,
    #[serde(default = "default_capacity")]
    default_capacity: usize,
    #[serde(default)]
    courses: Vec<CourseEntry>,
    #[serde(default)]
    teaching: BTreeMap<String, String>,
    #[serde(default)]
    enrollments: Vec<(String, String)>,
    #[serde(default)]
    demo: DemoEntry,
}

/// Per-course fields as they appear in the YAML file.
#[derive(Debug, Deserialize)]
struct CourseEntry {
    id: String,
    name: String,
    credits: u32,
    /// Falls back to the file-level `default_capacity` when absent.
    capacity: Option<usize>,
    #[serde(default)]
    prerequisites: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DemoEntry {
    #[serde(default = "default_top_performers")]
    top_performers: usize,
    #[serde(default = "default_update_delay_ms")]
    update_delay_ms: u64,
}

impl Default for DemoEntry {
    fn default() -> Self {
        Self {
            top_performers: default_top_performers(),
            update_delay_ms: default_update_delay_ms(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_top_performers() -> usize {
    3
}

fn default_update_delay_ms() -> u64 {
    100
}

const DEFAULT_SCHOOL_NAME: &str = "Chitkara University";

// ── Public data structures ────────────────────────────────────────────────────

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSpec {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub capacity: usize,
    pub prerequisites: Vec<String>,
}

impl CourseSpec {
    fn new(id: &str, name: &str, credits: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            credits,
            capacity: DEFAULT_CAPACITY,
            prerequisites: Vec::new(),
        }
    }

    /// Build the empty [`Course`] this entry describes.
    pub fn to_course(&self) -> Course {
        let mut course = Course::with_capacity(&self.id, &self.name, self.credits, self.capacity);
        for prereq in &self.prerequisites {
            course.add_prerequisite(prereq);
        }
        course
    }
}

/// The complete dataset and demo settings.
#[derive(Debug, Clone)]
pub struct SchoolConfig {
    pub name: String,
    pub courses: Vec<CourseSpec>,
    /// Teacher specialization → course id taught.
    pub teaching: BTreeMap<String, String>,
    /// `(student id, course id)` pairs, applied in order.
    pub enrollments: Vec<(String, String)>,
    /// How many students the ranking shows.
    pub top_performers: usize,
    /// Pause between simulated grade updates.
    pub update_delay: Duration,
}

impl SchoolConfig {
    /// The dataset used when no configuration file is supplied.
    pub fn builtin() -> Self {
        let enrollments = [
            ("S001", "CS101"), ("S001", "CS201"), ("S001", "PD101"),
            ("S002", "CS101"), ("S002", "CS301"), ("S002", "PD101"),
            ("S003", "CS201"), ("S003", "CS301"), ("S003", "PD101"),
            ("S004", "CS101"), ("S004", "PD101"),
            ("S005", "CS101"), ("S005", "CS201"),
            ("S006", "CS101"), ("S006", "CS301"),
            ("S007", "CS101"),
            ("S008", "CS101"), ("S008", "PD101"),
            ("S009", "CS201"), ("S009", "PD101"),
            ("S010", "CS101"), ("S010", "CS201"), ("S010", "CS301"),
        ];

        Self {
            name: DEFAULT_SCHOOL_NAME.to_string(),
            courses: builtin_courses(),
            teaching: BTreeMap::from([
                ("Programming Paradigms".to_string(), "CS101".to_string()),
                ("Network and Communication".to_string(), "CS201".to_string()),
                ("Backend Development".to_string(), "CS301".to_string()),
                ("Career Skills".to_string(), "PD101".to_string()),
            ]),
            enrollments: enrollments
                .iter()
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .collect(),
            top_performers: default_top_performers(),
            update_delay: Duration::from_millis(default_update_delay_ms()),
        }
    }

    /// Parses `path` into a `SchoolConfig`.
    ///
    /// * Missing optional fields take their defaults.
    /// * If the file lists no courses the built-in catalog is used.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the YAML is
    /// structurally invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading school configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let file: SchoolConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let mut courses: Vec<CourseSpec> = file
            .courses
            .into_iter()
            .map(|entry| CourseSpec {
                capacity: entry.capacity.unwrap_or(file.default_capacity),
                id: entry.id,
                name: entry.name,
                credits: entry.credits,
                prerequisites: entry.prerequisites,
            })
            .collect();

        for c in &courses {
            debug!(
                "  Course: {} | {} | credits: {} | capacity: {} | prerequisites: {:?}",
                c.id, c.name, c.credits, c.capacity, c.prerequisites
            );
        }

        // Fallback: no courses parsed → use the built-in catalog
        if courses.is_empty() {
            warn!("No courses found in configuration file, using built-in catalog");
            courses = builtin_courses();
        }

        let config = Self {
            name: file.name.unwrap_or_else(|| DEFAULT_SCHOOL_NAME.to_string()),
            courses,
            teaching: file.teaching,
            enrollments: file.enrollments,
            top_performers: file.demo.top_performers,
            update_delay: Duration::from_millis(file.demo.update_delay_ms),
        };

        info!(
            school = %config.name,
            courses = config.courses.len(),
            enrollments = config.enrollments.len(),
            "Successfully loaded school configuration"
        );
        Ok(config)
    }

    /// Course id taught by teachers with `specialization`, if any.
    pub fn course_for_specialization(&self, specialization: &str) -> Option<&str> {
        self.teaching.get(specialization).map(String::as_str)
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_courses() -> Vec<CourseSpec> {
    vec![
        CourseSpec::new("CS101", "Programming Paradigms", 4),
        CourseSpec::new("CS201", "Network and Communication", 4),
        CourseSpec::new("CS301", "Backend Development", 4),
        CourseSpec::new("PD101", "Professional Development", 3),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
