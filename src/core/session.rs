use crate::core::advisor::AdvisorClient;
use crate::core::catalog::CourseChoice;
use crate::core::extract::extract_disciplines;
use crate::domain::model::{DescriptionOutcome, RecommendationOutcome};
use crate::domain::ports::AgentRuntime;
use crate::utils::error::{AdvisorError, Result};

pub const EMPTY_FIELDS_MESSAGE: &str = "Por favor, preencha todos os campos antes de continuar.";

/// State carried between user actions of the recommendation panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub course: Option<String>,
    pub interest: Option<String>,
    pub recommendation: Option<RecommendationOutcome>,
    pub disciplines: Vec<String>,
    pub selected_discipline: Option<String>,
    pub description: Option<DescriptionOutcome>,
}

impl Session {
    pub fn has_recommendations(&self) -> bool {
        self.recommendation
            .as_ref()
            .is_some_and(RecommendationOutcome::is_success)
    }

    /// True when the last outcome asks the user to create an agent alias.
    pub fn needs_alias(&self) -> bool {
        let recommendation = self
            .recommendation
            .as_ref()
            .and_then(RecommendationOutcome::failure);
        let description = self
            .description
            .as_ref()
            .and_then(DescriptionOutcome::failure);

        recommendation
            .into_iter()
            .chain(description)
            .any(|failure| failure.needs_alias)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    RequestRecommendations {
        course: CourseChoice,
        interest: String,
    },
    DescribeDiscipline {
        name: String,
    },
}

/// 單一互動處理器：輸入目前的 session 與使用者動作，回傳新的 session
pub struct Advisor<R: AgentRuntime> {
    client: AdvisorClient<R>,
}

impl<R: AgentRuntime> Advisor<R> {
    pub fn new(client: AdvisorClient<R>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AdvisorClient<R> {
        &self.client
    }

    pub async fn handle(&self, session: Session, interaction: Interaction) -> Result<Session> {
        match interaction {
            Interaction::RequestRecommendations { course, interest } => {
                self.recommend(session, course, interest).await
            }
            Interaction::DescribeDiscipline { name } => self.describe(session, name).await,
        }
    }

    async fn recommend(
        &self,
        mut session: Session,
        course: CourseChoice,
        interest: String,
    ) -> Result<Session> {
        let course = course.resolve();
        let interest = interest.trim().to_string();
        if course.trim().is_empty() || interest.is_empty() {
            return Err(AdvisorError::ValidationError {
                message: EMPTY_FIELDS_MESSAGE.to_string(),
            });
        }

        tracing::info!("🔍 Consultando recomendações para {} / {}", course, interest);
        let outcome = self.client.get_recommendations(&course, &interest).await;

        session.disciplines = match &outcome {
            RecommendationOutcome::Success {
                recommendations, ..
            } => extract_disciplines(recommendations),
            RecommendationOutcome::Failure(_) => Vec::new(),
        };
        tracing::debug!("Extracted {} disciplines", session.disciplines.len());

        session.course = Some(course);
        session.interest = Some(interest);
        session.recommendation = Some(outcome);
        session.selected_discipline = None;
        session.description = None;
        Ok(session)
    }

    async fn describe(&self, mut session: Session, name: String) -> Result<Session> {
        if !session.has_recommendations() {
            return Err(AdvisorError::ValidationError {
                message: "Obtenha recomendações antes de pedir detalhes de uma disciplina."
                    .to_string(),
            });
        }

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AdvisorError::ValidationError {
                message: "Selecione uma disciplina para saber mais.".to_string(),
            });
        }

        tracing::info!("📚 Obtendo informações sobre {}", name);
        session.description = Some(self.client.discipline_description(&name).await);
        session.selected_discipline = Some(name);
        Ok(session)
    }
}
