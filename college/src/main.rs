/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::collections::HashMap;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use college::config::SchoolConfig;
use college::display::{wam_color, DisplayVisitor, Visitable};
use college::loader;
use college::observer::GradeChange;
use college::person::Member;
use college::school::School;

// ── CLI argument definition ───────────────────────────────────────────────────

/// School records demo (Rust implementation).
///
/// Example:
///   college -s data/students.txt -t data/teachers.txt \
///           --config data/school.yaml --top 5 --seed 42
#[derive(Debug, Parser)]
#[command(
    name = "college",
    about = "School records demo – enrollment, concurrent reports, grade simulation, ranking",
    long_about = None,
)]
struct Cli {
    /// Student records file (8 comma-separated fields per line).
    #[arg(short = 's', long = "students", default_value = "students.txt")]
    students: PathBuf,

    /// Teacher records file (9 comma-separated fields per line).
    #[arg(short = 't', long = "teachers", default_value = "teachers.txt")]
    teachers: PathBuf,

    /// Path to the YAML school configuration (catalog, enrollments, demo settings).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Number of students in the ranking.  Overrides the configuration.
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Seed for the grade simulation.  Random when absent.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Pause between simulated grade updates, in milliseconds.  Overrides the
    /// configuration.
    #[arg(short = 'd', long = "update-delay-ms")]
    update_delay_ms: Option<u64>,

    /// Disable ANSI colours in the demo output.
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr; the demo itself prints to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    info!(
        students    = %cli.students.display(),
        teachers    = %cli.teachers.display(),
        config      = ?cli.config,
        top         = ?cli.top,
        seed        = ?cli.seed,
        "Configuration"
    );

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {e:#}").red());
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── Load dataset configuration ────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => SchoolConfig::load_from_file(path)?,
        None => {
            warn!("No configuration file provided, using built-in dataset");
            SchoolConfig::builtin()
        }
    };
    if let Some(top) = cli.top {
        config.top_performers = top;
    }
    if let Some(ms) = cli.update_delay_ms {
        config.update_delay = Duration::from_millis(ms);
    }

    // ── Load records ──────────────────────────────────────────────────────────
    let students = loader::load_students(&cli.students)?;
    let teachers = loader::load_teachers(&cli.teachers)?;

    let school = School::new(&config.name);
    for student in students.records {
        school.add_student(student);
    }
    for teacher in teachers.records {
        school.add_teacher(teacher);
    }
    for spec in &config.courses {
        school.add_course(spec.to_course());
    }

    // ── Teaching assignments and enrollment ───────────────────────────────────
    let assignments: Vec<(String, String)> = school
        .teachers()
        .iter()
        .filter_map(|t| {
            config
                .course_for_specialization(t.specialization())
                .map(|course| (t.id().to_string(), course.to_string()))
        })
        .collect();
    for (teacher_id, course_id) in &assignments {
        school.assign_course_to_teacher(teacher_id, course_id)?;
    }

    let rejected = config
        .enrollments
        .iter()
        .filter(|(student_id, course_id)| {
            school
                .enroll_student_in_course(student_id, course_id)
                .is_err()
        })
        .count();
    if rejected > 0 {
        warn!(rejected, total = config.enrollments.len(), "some enrollments were rejected");
    }

    // ── Department statistics ─────────────────────────────────────────────────
    println!("{}", "\nDepartment Statistics:".bold().blue());
    for (department, count) in school.department_stats() {
        println!("{}: {} teachers", department.cyan(), count);
    }

    // ── Concurrent report generation ──────────────────────────────────────────
    println!("{}", "\nGenerating reports concurrently...".bold().blue());
    let reports = school.generate_all_student_reports().await?;
    for report in &reports {
        debug!("\n{report}");
    }
    println!(
        "{}",
        format!("Generated {} student reports", reports.len()).green()
    );

    // ── Live grade updates ────────────────────────────────────────────────────
    println!("{}", "\nSimulating WAM updates...".bold().magenta());
    let names: HashMap<String, String> = school
        .students()
        .iter()
        .map(|s| (s.id().to_string(), s.name().to_string()))
        .collect();
    let live_feed = school.observe_grades(Arc::new(move |change: &GradeChange| {
        let name = names
            .get(&change.student_id)
            .map(String::as_str)
            .unwrap_or(&change.student_id);
        println!(
            "{}",
            format!("Updated {}'s {} to {:.1}", name, change.course_id, change.current).cyan()
        );
    }));

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let updates = school
        .simulate_wam_updates(&mut rng, config.update_delay)
        .await;
    drop(live_feed);
    info!(updates = updates.len(), "simulation finished");

    // ── Ranking ───────────────────────────────────────────────────────────────
    println!(
        "{}",
        format!("\nTop {} Performers:", config.top_performers).bold().blue()
    );
    for performer in school.top_performers(config.top_performers) {
        println!(
            "{}: {}",
            performer.name.bold(),
            format!("{:.1}", performer.wam).color(wam_color(performer.wam))
        );
    }

    // ── Full listing ──────────────────────────────────────────────────────────
    let visitor = DisplayVisitor;
    println!(
        "{}",
        "\nDisplaying ALL information with visitor pattern:".bold().blue()
    );

    println!("{}", "\n=== ALL STUDENTS ===".bold().magenta());
    for student in school.students().iter() {
        println!("{}", student.accept(&visitor));
    }

    println!("{}", "\n=== ALL TEACHERS ===".bold().magenta());
    for teacher in school.teachers().iter() {
        println!("{}", teacher.accept(&visitor));
    }

    println!("{}", "\n=== ALL COURSES ===".bold().magenta());
    for course in school.courses().iter() {
        println!("{}", course.accept(&visitor));
    }

    Ok(())
}
