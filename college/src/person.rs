/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shared identity data for everyone the school keeps a record of.
//!
//! [`Person`] holds the fields every member carries.  Students and teachers
//! embed a `Person` and expose it through the [`Member`] capability trait,
//! which also supplies the role tag and the flat info mapping used by
//! reports and the display layer.
//!
//! ```text
//! Person ──embedded in──► Student ─┐
//!        └─embedded in──► Teacher ─┴─► impl Member (role, info)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

// ── Address ───────────────────────────────────────────────────────────────────

/// Postal address as it appears in the input files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

// ── Person ────────────────────────────────────────────────────────────────────

/// Identity fields common to students and teachers.
///
/// `id` is assigned externally and never changes after construction;
/// `created_at` is stamped when the record is built.
#[derive(Debug, Clone)]
pub struct Person {
    id: String,
    name: String,
    email: String,
    address: Address,
    created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            address,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Identity fields as a flat map; `created_at` is rendered as RFC 3339.
    pub fn info(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("street", self.address.street.clone()),
            ("city", self.address.city.clone()),
            ("state", self.address.state.clone()),
            ("zip_code", self.address.zip_code.clone()),
            ("created_at", self.created_at.to_rfc3339()),
        ])
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// Which kind of member a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("Student"),
            Role::Teacher => f.write_str("Teacher"),
        }
    }
}

// ── Member capability ─────────────────────────────────────────────────────────

/// Capability shared by every record that embeds a [`Person`].
pub trait Member {
    /// The embedded identity fields.
    fn person(&self) -> &Person;

    /// Role tag for this record.
    fn role(&self) -> Role;

    /// Flat key → value view of the record.
    ///
    /// The default covers the [`Person`] fields; implementors extend it with
    /// their own.
    fn info(&self) -> BTreeMap<&'static str, String> {
        self.person().info()
    }

    fn id(&self) -> &str {
        self.person().id()
    }

    fn name(&self) -> &str {
        self.person().name()
    }
}

// ── GradeLevel ────────────────────────────────────────────────────────────────

/// Year of study.  Parsed from its exact upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GradeLevel {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

/// Returned when a grade level string is not one of the four known names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid grade level: '{0}' (valid: FRESHMAN, SOPHOMORE, JUNIOR, SENIOR)")]
pub struct GradeLevelError(pub String);

impl GradeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            GradeLevel::Freshman => "FRESHMAN",
            GradeLevel::Sophomore => "SOPHOMORE",
            GradeLevel::Junior => "JUNIOR",
            GradeLevel::Senior => "SENIOR",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLevel {
    type Err = GradeLevelError;

    /// Case-sensitive: `"junior"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRESHMAN" => Ok(GradeLevel::Freshman),
            "SOPHOMORE" => Ok(GradeLevel::Sophomore),
            "JUNIOR" => Ok(GradeLevel::Junior),
            "SENIOR" => Ok(GradeLevel::Senior),
            other => Err(GradeLevelError(other.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct Guest(Person);

    impl Member for Guest {
        fn person(&self) -> &Person {
            &self.0
        }

        fn role(&self) -> Role {
            Role::Student
        }
    }

    fn sample_person() -> Person {
        Person::new(
            "P001",
            "Ada Lovelace",
            "ada@example.com",
            Address {
                street: "12 Analytical St".into(),
                city: "London".into(),
                state: "LDN".into(),
                zip_code: "N1".into(),
            },
        )
    }

    #[test]
    fn grade_level_parses_exact_names() {
        assert_eq!("FRESHMAN".parse::<GradeLevel>(), Ok(GradeLevel::Freshman));
        assert_eq!("SOPHOMORE".parse::<GradeLevel>(), Ok(GradeLevel::Sophomore));
        assert_eq!("JUNIOR".parse::<GradeLevel>(), Ok(GradeLevel::Junior));
        assert_eq!("SENIOR".parse::<GradeLevel>(), Ok(GradeLevel::Senior));
    }

    #[test]
    fn grade_level_is_case_sensitive() {
        let err = "junior".parse::<GradeLevel>().unwrap_err();
        assert_eq!(err, GradeLevelError("junior".into()));
        assert!(err.to_string().contains("junior"));
    }

    #[test]
    fn grade_level_display_matches_input_form() {
        for level in [
            GradeLevel::Freshman,
            GradeLevel::Sophomore,
            GradeLevel::Junior,
            GradeLevel::Senior,
        ] {
            assert_eq!(level.to_string().parse::<GradeLevel>(), Ok(level));
        }
    }

    #[test]
    fn default_info_covers_person_fields() {
        let m = Guest(sample_person());
        let info = m.info();
        assert_eq!(info["id"], "P001");
        assert_eq!(info["name"], "Ada Lovelace");
        assert_eq!(info["email"], "ada@example.com");
        assert_eq!(info["street"], "12 Analytical St");
        assert_eq!(info["city"], "London");
        assert_eq!(info["state"], "LDN");
        assert_eq!(info["zip_code"], "N1");
        assert!(info.contains_key("created_at"));
        assert_eq!(info.len(), 8);
    }

    #[test]
    fn member_shortcuts_read_through_to_person() {
        let m = Guest(sample_person());
        assert_eq!(m.id(), "P001");
        assert_eq!(m.name(), "Ada Lovelace");
        assert_eq!(m.role().to_string(), "Student");
    }

    #[test]
    fn created_at_is_stamped_at_construction() {
        let before = Utc::now();
        let p = sample_person();
        assert!(p.created_at() >= before);
        assert!(p.created_at() <= Utc::now());
    }
}
