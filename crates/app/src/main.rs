use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use manhaj_core::model::{Catalog, DisciplineId, SubjectAreaId};
use manhaj_core::{ConfigError, OnboardingConfig};
use services::{
    Clock, DashboardView, DiagnosticExam, OnboardingContext, OnboardingSession, OnboardingStep,
    RandomQuestionGenerator, SessionError, Transition,
};

#[derive(Debug, Error)]
#[non_exhaustive]
enum AppError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    ConfigSyntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// How the scripted walkthrough answers diagnostic questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnswerStrategy {
    /// Pick exactly the correct options.
    Perfect,
    /// Always pick the first option.
    First,
}

#[derive(Parser, Debug)]
#[command(name = "manhaj")]
#[command(about = "Walk through onboarding and print the generated study plan")]
#[command(version)]
struct Args {
    /// JSON catalog; the built-in catalog is used when omitted.
    #[arg(long, env = "MANHAJ_CATALOG")]
    catalog: Option<PathBuf>,

    /// TOML file with onboarding settings.
    #[arg(long, env = "MANHAJ_CONFIG")]
    config: Option<PathBuf>,

    /// Subject areas to plan, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "aqidah")]
    select: Vec<SubjectAreaId>,

    /// Disciplines the learner claims to have mastered.
    #[arg(long, value_delimiter = ',')]
    claim: Vec<DisciplineId>,

    #[arg(long, value_enum, default_value_t = AnswerStrategy::Perfect)]
    answers: AnswerStrategy,

    /// Print the dashboard as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<OnboardingConfig, AppError> {
    let Some(path) = path else {
        return Ok(OnboardingConfig::default());
    };
    let config: OnboardingConfig =
        toml::from_str(&read(path)?).map_err(|source| AppError::ConfigSyntax {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config.validate()?)
}

fn build_context(args: &Args) -> Result<OnboardingContext, AppError> {
    let config = load_config(args.config.as_deref())?;
    let context = match args.catalog.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            OnboardingContext::from_catalog_json(&read(path)?, config, Clock::default())?
        }
        None => OnboardingContext::new(Catalog::builtin(), config, Clock::default())?,
    };
    Ok(context)
}

fn answer_exam(session: &mut OnboardingSession, strategy: AnswerStrategy) {
    while session.step() == OnboardingStep::DiagnosticExam {
        let question = session.exam().and_then(DiagnosticExam::current_question);
        let picks: Vec<usize> = match (question, strategy) {
            (Some(question), AnswerStrategy::Perfect) => question.correct().iter().collect(),
            (Some(_), AnswerStrategy::First) => vec![0],
            (None, _) => Vec::new(),
        };
        for index in picks {
            session.choose_option(index);
        }
        if session.next_question() == Transition::Unchanged {
            warn!("exam did not advance; leaving it");
            session.advance();
        }
    }
}

fn walk_through(session: &mut OnboardingSession, args: &Args) {
    session.advance();
    let selected = session.select_subject_areas(args.select.iter().cloned());
    debug!(selected, "subject areas selected");
    session.advance();
    session.claim_mastered_disciplines(args.claim.iter().cloned());
    session.advance();

    let overview = session.overview();
    if !overview.is_empty() {
        println!(
            "Diagnostic: {} discipline(s), about {} questions, {} minutes",
            overview.disciplines.len(),
            overview.estimated_questions,
            overview.estimated_minutes
        );
    }
    session.advance();
    answer_exam(session, args.answers);

    let summaries = session.results_summary();
    if !summaries.is_empty() {
        println!("{}:", session.step().label());
    }
    for summary in summaries {
        println!(
            "  {:<20} {:>5.1}%  {}/{} units may be skipped",
            summary.discipline_id.as_str(),
            summary.overall_score,
            summary.skip_eligible_units,
            summary.total_units
        );
    }
    if session.step() == OnboardingStep::DiagnosticResults {
        session.advance();
    }
}

fn print_dashboard(catalog: &Catalog, view: &DashboardView) {
    println!(
        "\nStudy plan: {} units, {:.0}% complete",
        view.overall.total,
        view.overall.progress_percent()
    );
    for section in &view.sections {
        let name = catalog
            .subject_area(&section.subject_area_id)
            .map_or(section.subject_area_id.as_str(), |a| a.name());
        println!("\n{name}");
        for group in &section.disciplines {
            println!("  {}", group.discipline_id);
            for entry in &group.entries {
                let unit = catalog
                    .unit(entry.unit_id())
                    .map_or(entry.unit_id().as_str(), |u| u.name());
                println!("    [{:<11}] {unit}", entry.status().as_str());
            }
        }
    }
    if view.can_add_plan() {
        let rest: Vec<&str> = view.uncovered.iter().map(SubjectAreaId::as_str).collect();
        println!("\nNot yet planned: {}", rest.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut context = build_context(&args).context("failed to set up onboarding")?;
    let catalog = context.catalog();
    let questions = RandomQuestionGenerator::from_config(context.config());

    let session = context.start_session(Box::new(questions));
    walk_through(session, &args);

    let session = context.session()?;
    if session.study_plan().is_empty() {
        anyhow::bail!("no study plan was generated; check --select");
    }
    let view = session.dashboard();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_dashboard(&catalog, &view);
    }
    Ok(())
}
