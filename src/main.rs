use clap::Parser;
use unb_advisor::config::Command;
use unb_advisor::core::catalog::{
    self, course_details, course_names, recommendation_choices, CourseChoice, OTHER_COURSE_OPTION,
};
use unb_advisor::core::classify::alias_instructions;
use unb_advisor::core::session::{Interaction, Session};
use unb_advisor::domain::model::{AgentFailure, Course, DescriptionOutcome, RecommendationOutcome};
use unb_advisor::utils::error::ErrorSeverity;
use unb_advisor::utils::{logger, validation::Validate};
use unb_advisor::{
    Advisor, AdvisorClient, AdvisorError, AgentSettings, BedrockRuntime, CliConfig, LocalStorage,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init(config.verbose, config.json_logs);
    tracing::info!("Starting unb-advisor CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<(), AdvisorError> {
    let storage = LocalStorage::new(".".to_string());

    match config.command {
        Command::Courses => {
            let courses = catalog::load_catalog(&storage, &config.catalog).await?;
            for name in course_names(&courses) {
                println!("{}", name);
            }
        }
        Command::Course { name } => {
            let courses = catalog::load_catalog(&storage, &config.catalog).await?;
            let details =
                course_details(&courses, &name).ok_or_else(|| AdvisorError::ValidationError {
                    message: format!("Curso não encontrado: {}", name),
                })?;

            println!("📍 Informações do Curso: {}", details.course.nome);
            println!("Campus: {}", details.course.campus);
            println!("Coordenador: {}", details.course.coordenador);
            println!(
                "Localização: {:.4}, {:.4}",
                details.location.latitude, details.location.longitude
            );
        }
        Command::Recommend {
            course,
            other_course,
            interest,
            describe,
        } => {
            let courses = load_catalog_or_empty(&storage, &config.catalog).await;
            let choices = recommendation_choices(&courses);
            let selection = course.unwrap_or_else(|| OTHER_COURSE_OPTION.to_string());
            if !choices.contains(&selection) {
                tracing::warn!("Course '{}' is not in the catalog", selection);
            }

            let advisor = connect().await?;
            let session = advisor
                .handle(
                    Session::default(),
                    Interaction::RequestRecommendations {
                        course: CourseChoice::from_selection(&selection, other_course),
                        interest,
                    },
                )
                .await?;
            print_recommendations(&session);

            if let Some(wanted) = describe {
                if !session.has_recommendations() {
                    return Ok(());
                }
                let name = resolve_discipline(&session.disciplines, &wanted);
                let session = advisor
                    .handle(session, Interaction::DescribeDiscipline { name })
                    .await?;
                if let (Some(name), Some(outcome)) =
                    (&session.selected_discipline, &session.description)
                {
                    print_description(name, outcome);
                }
            }
        }
        Command::Describe { discipline } => {
            let advisor = connect().await?;
            let outcome = advisor.client().discipline_description(&discipline).await;
            print_description(&discipline, &outcome);
        }
    }

    Ok(())
}

async fn connect() -> Result<Advisor<BedrockRuntime>, AdvisorError> {
    let settings = AgentSettings::from_env()?;
    settings.validate()?;
    tracing::debug!("Agent settings: {:?}", settings);

    let runtime = BedrockRuntime::from_settings(&settings).await;
    let client = AdvisorClient::connect(&settings, runtime).await;
    Ok(Advisor::new(client))
}

async fn load_catalog_or_empty(storage: &LocalStorage, path: &str) -> Vec<Course> {
    match catalog::load_catalog(storage, path).await {
        Ok(courses) => courses,
        Err(e) => {
            tracing::error!("Erro ao carregar cursos para recomendação: {}", e);
            Vec::new()
        }
    }
}

/// `--describe` 可以是清單編號（從 1 開始）或課程名稱
fn resolve_discipline(disciplines: &[String], wanted: &str) -> String {
    wanted
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| disciplines.get(i).cloned())
        .unwrap_or_else(|| wanted.to_string())
}

fn print_failure(failure: &AgentFailure) {
    println!("{}", failure.fallback_text);
    eprintln!("❌ {}", failure.error_details);
    if failure.needs_alias {
        eprintln!();
        eprintln!("{}", alias_instructions());
    }
}

fn print_recommendations(session: &Session) {
    let Some(outcome) = &session.recommendation else {
        return;
    };

    match outcome {
        RecommendationOutcome::Success {
            recommendations, ..
        } => {
            println!("✅ Recomendações obtidas com sucesso!");
            println!(
                "Curso: {}",
                session.course.as_deref().unwrap_or_default()
            );
            println!(
                "Área de Interesse: {}",
                session.interest.as_deref().unwrap_or_default()
            );
            println!();
            println!("### Disciplinas Recomendadas");
            println!("{}", recommendations);

            if !session.disciplines.is_empty() {
                println!();
                println!("Disciplinas identificadas (use --describe <número>):");
                for (i, name) in session.disciplines.iter().enumerate() {
                    println!("  {}. {}", i + 1, name);
                }
            }

            println!();
            println!(
                "Nota: Estas recomendações são geradas por IA e devem ser verificadas no sistema oficial da UnB."
            );
        }
        RecommendationOutcome::Failure(failure) => print_failure(failure),
    }
}

fn print_description(name: &str, outcome: &DescriptionOutcome) {
    match outcome {
        DescriptionOutcome::Success { description, .. } => {
            println!();
            println!("### Sobre a disciplina: {}", name);
            println!("{}", description);
        }
        DescriptionOutcome::Failure(failure) => print_failure(failure),
    }
}
