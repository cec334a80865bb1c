/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end run over files on disk: load, enroll, report, simulate, rank.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

use college::config::SchoolConfig;
use college::display::{DisplayVisitor, Visitable};
use college::loader;
use college::observer::GradeChange;
use college::person::Member;
use college::school::{School, SchoolError, SIMULATED_SCORE_RANGE};

const STUDENTS: &str = "\
S001, Aarav Sharma, aarav@uni.edu, 12 MG Road, Chandigarh, PB, 160001, FRESHMAN
S002, Diya Kapoor, diya@uni.edu, 7 Mall Road, Shimla, HP, 171001, SOPHOMORE
S003, Kabir Singh, kabir@uni.edu, 3 Civil Lines, Ludhiana, PB
S004, Ishaan Mehta, ishaan@uni.edu, 9 Sector 17, Chandigarh, CH, 160017, SENIOR
";

const TEACHERS: &str = "\
T001, Meera Iyer, meera@uni.edu, 4 Lake View, Patiala, PB, 147001, Computer Science, Programming Paradigms
T002, Ravi Nair, ravi@uni.edu, 5 Lake View, Patiala, PB, 147001, Computer Science, Backend Development
T003, Anita Rao, anita@uni.edu, 6 Lake View, Patiala, PB, 147001, Professional Development, Career Skills
";

fn tempfile_with(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

/// Load both files and wire the built-in catalog the way the binary does.
fn build_school() -> (School, SchoolConfig) {
    let students_file = tempfile_with(STUDENTS);
    let teachers_file = tempfile_with(TEACHERS);

    let students = loader::load_students(students_file.path()).unwrap();
    let teachers = loader::load_teachers(teachers_file.path()).unwrap();
    assert_eq!(students.records.len(), 3);
    assert_eq!(students.skipped.len(), 1);
    assert_eq!(teachers.records.len(), 3);

    let config = SchoolConfig::builtin();
    let school = School::new(&config.name);
    students.records.into_iter().for_each(|s| school.add_student(s));
    teachers.records.into_iter().for_each(|t| school.add_teacher(t));
    config
        .courses
        .iter()
        .for_each(|c| school.add_course(c.to_course()));

    let assignments: Vec<(String, String)> = school
        .teachers()
        .iter()
        .filter_map(|t| {
            config
                .course_for_specialization(t.specialization())
                .map(|c| (t.id().to_string(), c.to_string()))
        })
        .collect();
    for (teacher, course) in &assignments {
        assert!(school.assign_course_to_teacher(teacher, course).unwrap());
    }

    (school, config)
}

#[test]
fn builtin_enrollments_skip_students_missing_from_the_file() {
    let (school, config) = build_school();

    let results: Vec<_> = config
        .enrollments
        .iter()
        .map(|(s, c)| school.enroll_student_in_course(s, c))
        .collect();

    // S003 was dropped by the loader; S005.. never existed.
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(SchoolError::StudentNotFound { student }) if student == "S003")));

    let s001 = school.student("S001").unwrap();
    let enrolled: Vec<&str> = s001.courses().keys().map(String::as_str).collect();
    assert_eq!(enrolled, vec!["CS101", "CS201", "PD101"]);
    drop(s001);

    let cs101 = school.course("CS101").unwrap();
    assert_eq!(cs101.enrolled_count(), 3);
    assert!(cs101.enrolled_students().contains("S004"));
}

#[test]
fn department_stats_count_loaded_teachers() {
    let (school, _) = build_school();
    let stats = school.department_stats();

    assert_eq!(stats.get("Computer Science"), Some(&2));
    assert_eq!(stats.get("Professional Development"), Some(&1));
    assert_eq!(school.teacher("T002").unwrap().course_load(), 1);
}

#[tokio::test]
async fn simulation_feeds_observers_and_ranking() {
    let (school, config) = build_school();
    for (s, c) in &config.enrollments {
        let _ = school.enroll_student_in_course(s, c);
    }

    let seen: Arc<Mutex<Vec<GradeChange>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let feed = school.observe_grades(Arc::new(move |c: &GradeChange| sink.lock().push(c.clone())));
    assert_eq!(feed.len(), 3);

    let mut rng = StdRng::seed_from_u64(7);
    let updates = school.simulate_wam_updates(&mut rng, Duration::ZERO).await;
    drop(feed);

    // S001: 3 courses, S002: 3, S004: 2.
    assert_eq!(updates.len(), 8);
    assert!(updates.iter().all(|u| SIMULATED_SCORE_RANGE.contains(&u.score)));

    {
        let seen = seen.lock();
        assert_eq!(seen.len(), updates.len());
        assert!(seen.iter().all(|c| c.previous.is_none()));
    }

    let top = school.top_performers(config.top_performers);
    assert_eq!(top.len(), 3);
    assert!(top.windows(2).all(|w| w[0].wam >= w[1].wam));

    // Unsubscribed: a further update reaches nobody.
    let first = &updates[0];
    school
        .update_wam(&first.student_id, &first.course_id, 91.0)
        .unwrap();
    assert_eq!(seen.lock().len(), updates.len());
}

#[tokio::test]
async fn reports_reflect_enrollment_and_grades() {
    let (school, _) = build_school();
    school.enroll_student_in_course("S002", "CS101").unwrap();
    school.enroll_student_in_course("S002", "CS301").unwrap();
    school.update_wam("S002", "CS101", 80.0).unwrap();

    let reports = school.generate_all_student_reports().await.unwrap();
    let ids: Vec<&str> = reports.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(ids, vec!["S001", "S002", "S004"]);

    let text = reports[1].to_string();
    assert!(text.starts_with("Student Report for Diya Kapoor (S002)"));
    assert!(text.contains("Overall WAM: 80.0"));
    assert!(text.contains(" - CS101: 80.0"));
    assert!(text.contains(" - CS301: No grade yet"));
}

#[test]
fn every_record_renders_through_the_display_visitor() {
    let (school, _) = build_school();

    for s in school.students().iter() {
        assert!(s.accept(&DisplayVisitor).contains(&format!("ID: {}", s.id())));
    }
    for t in school.teachers().iter() {
        assert!(t.accept(&DisplayVisitor).contains(t.specialization()));
    }
    let courses = school.courses();
    assert_eq!(courses.len(), 4);
    assert!(courses
        .iter()
        .all(|c| c.accept(&DisplayVisitor).contains("Enrolled: 0/")));
}
