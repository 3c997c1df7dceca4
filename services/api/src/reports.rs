use crate::infra::{load_catalog, parse_target, parse_term};
use clap::Args;
use gradebook::academics::engine::Mention;
use gradebook::academics::{
    Catalog, GradebookState, GradesheetImporter, JsonFileStore, ReportSummary, SnapshotStore,
    Term,
};
use gradebook::config::AppConfig;
use gradebook::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Saved gradebook snapshot (defaults to GRADEBOOK_SNAPSHOT_PATH)
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// CSV gradesheet with Subject,Coefficient,Grade columns
    #[arg(long)]
    pub(crate) gradesheet: Option<PathBuf>,
    /// Term the gradesheet (or report) applies to: first or second
    #[arg(long, value_parser = parse_term)]
    pub(crate) term: Option<Term>,
    /// Target average between 10 and 20
    #[arg(long, value_parser = parse_target)]
    pub(crate) target: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Education level id from the catalog
    #[arg(long, default_value = "high")]
    pub(crate) level: String,
    /// Year id within the level
    #[arg(long, default_value = "2bac_pc")]
    pub(crate) year: String,
    /// Target average between 10 and 20
    #[arg(long, value_parser = parse_target)]
    pub(crate) target: Option<f64>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.storage.snapshot_path.clone());

    let state = build_report_state(args, snapshot_path)?;
    render_report(&state, &state.report().summary());
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.storage)?;
    render_catalog(&catalog);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.storage)?;
    let state = demo_state(&catalog, &args)?;

    println!("Gradebook demo");
    for term in Term::ordered() {
        let mut view = state.clone();
        view.set_active_term(term);
        println!();
        render_report(&view, &view.report().summary());
    }
    Ok(())
}

fn build_report_state(
    args: ReportArgs,
    snapshot_path: PathBuf,
) -> Result<GradebookState, AppError> {
    let ReportArgs {
        gradesheet,
        term,
        target,
        ..
    } = args;

    let mut state = match gradesheet {
        Some(_) => GradebookState::default(),
        None => JsonFileStore::new(snapshot_path).load()?.unwrap_or_default(),
    };

    if let Some(path) = gradesheet {
        let subjects = GradesheetImporter::from_path(path)?;
        let term = term.unwrap_or_default();
        state.replace_term(term, subjects);
        state.set_active_term(term);
    } else if let Some(term) = term {
        state.set_active_term(term);
    }

    if let Some(target) = target {
        state.set_target_average(target);
    }

    Ok(state)
}

/// Fills both terms with a deterministic spread of grades.
pub(crate) fn demo_state(catalog: &Catalog, args: &DemoArgs) -> Result<GradebookState, AppError> {
    let mut state = GradebookState::default();
    state.select_year(catalog, &args.level, &args.year)?;

    for (offset, term) in Term::ordered().into_iter().enumerate() {
        let ids: Vec<_> = state
            .subjects(term)
            .iter()
            .map(|subject| subject.id.clone())
            .collect();
        for (index, id) in ids.iter().enumerate() {
            let grade = 9.0 + ((index * 7 + offset * 3) % 10) as f64;
            state.set_grade_value(term, id, Some(grade))?;
        }
    }

    if let Some(target) = args.target {
        state.set_target_average(target);
    }

    Ok(state)
}

fn render_report(state: &GradebookState, summary: &ReportSummary) {
    let year = match (&state.level_id, &state.year_id) {
        (Some(level), Some(year)) => format!("{level} / {year}"),
        _ => "custom subjects".to_string(),
    };
    println!("Report card ({year}), {}", summary.active_term_label);

    println!("\nSubjects");
    let subjects = state.active_subjects();
    if subjects.is_empty() {
        println!("- none");
    }
    for subject in subjects {
        let grade = subject
            .grade
            .map(|grade| format!("{grade:.2}"))
            .unwrap_or_else(|| "--".to_string());
        println!("- {} (coef {}): {}", subject.name, subject.coefficient, grade);
    }

    println!("\nAverages");
    for entry in &summary.terms {
        let note = if entry.has_data { "" } else { " (no grades yet)" };
        println!(
            "- {}: {} [{}/{} graded]{}",
            entry.term_label,
            entry.average_display,
            entry.graded_subjects,
            entry.total_subjects,
            note
        );
    }
    println!("- Annual: {}", summary.annual_average_display);

    println!("\n{}", mention_heading(&summary.mention));
    if let Some(message) = summary.mention.messages.first() {
        println!("  {message}");
    }

    let status = if summary.goal.reached {
        "reached"
    } else {
        "not reached"
    };
    println!(
        "\nGoal {:.2}: {:.0}% ({status})",
        summary.goal.target_average, summary.goal.ratio_percent
    );

    match (
        &summary.recommendation.top_subject,
        &summary.recommendation.point_impact_display,
    ) {
        (Some(top), Some(impact)) => println!(
            "\nFocus: {} (coef {}); each extra point adds {impact} to the average",
            top.name, top.coefficient
        ),
        _ => println!("\nFocus: add subjects to get a recommendation"),
    }

    println!("\n{}", summary.share_message);
}

fn mention_heading(mention: &Mention) -> String {
    let standing = if mention.tier.is_passing() {
        "passing"
    } else {
        "below passing"
    };
    format!(
        "Mention: {} ({}), {standing}",
        mention.label, mention.local_label
    )
}

fn render_catalog(catalog: &Catalog) {
    println!("Education catalog");
    for level in &catalog.levels {
        println!("\n{} [{}]", level.label, level.id);
        for year in &level.years {
            let total: f64 = year.subjects.iter().map(|s| s.coefficient).sum();
            println!(
                "- {} [{}]: {} subjects, total coefficient {}",
                year.label,
                year.id,
                year.subjects.len(),
                total
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::academics::engine::compute_average;

    #[test]
    fn demo_state_grades_every_subject_within_scale() {
        let args = DemoArgs {
            level: "middle".to_string(),
            year: "3ac".to_string(),
            target: Some(12.0),
        };
        let state = demo_state(&Catalog::standard(), &args).expect("demo builds");

        for term in Term::ordered() {
            assert!(state
                .subjects(term)
                .iter()
                .all(|s| s.grade.is_some_and(|g| (0.0..=20.0).contains(&g))));
        }
        assert_eq!(state.target_average, 12.0);
        assert!(compute_average(state.subjects(Term::First)) > 0.0);
    }

    #[test]
    fn mention_heading_flags_passing_standing() {
        use gradebook::academics::engine::classify;

        assert_eq!(
            mention_heading(&classify(10.0)),
            "Mention: Passing (مقبول), passing"
        );
        assert!(mention_heading(&classify(9.75)).ends_with(", below passing"));
    }

    #[test]
    fn demo_state_rejects_unknown_year() {
        let args = DemoArgs {
            level: "high".to_string(),
            year: "4bac".to_string(),
            target: None,
        };
        assert!(matches!(
            demo_state(&Catalog::standard(), &args),
            Err(AppError::Gradebook(_))
        ));
    }

    #[test]
    fn gradesheet_report_targets_requested_term() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv_path = dir.path().join("grades.csv");
        std::fs::write(&csv_path, "Subject,Coefficient,Grade\nMath,3,14\nArt,1,\n")
            .expect("write csv");

        let args = ReportArgs {
            snapshot: None,
            gradesheet: Some(csv_path),
            term: Some(Term::Second),
            target: Some(16.0),
        };
        let state =
            build_report_state(args, dir.path().join("unused.json")).expect("state builds");

        assert_eq!(state.active_term, Term::Second);
        assert_eq!(state.subjects(Term::Second).len(), 2);
        assert!(state.subjects(Term::First).is_empty());
        assert_eq!(state.report().current_average, 14.0);
        assert_eq!(state.target_average, 16.0);
    }

    #[test]
    fn missing_snapshot_reports_empty_gradebook() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = build_report_state(ReportArgs::default(), dir.path().join("none.json"))
            .expect("state builds");
        assert_eq!(state, GradebookState::default());
    }
}
