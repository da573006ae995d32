use crate::config::agent::AgentSettings;
use crate::core::classify::{alias_not_configured, failure_for, AgentOperation};
use crate::domain::model::{
    AgentReply, AliasSummary, DescriptionOutcome, InvocationRequest, RecommendationOutcome,
};
use crate::domain::ports::AgentRuntime;
use crate::utils::error::{AdvisorError, Result};

pub const PREFERRED_ALIAS_NAME: &str = "agente-alias";

const ALIAS_PAGE_SIZE: i32 = 10;

/// 推薦課程與課程說明的 agent 客戶端
pub struct AdvisorClient<R: AgentRuntime> {
    runtime: R,
    agent_id: String,
    agent_alias_id: Option<String>,
}

impl<R: AgentRuntime> AdvisorClient<R> {
    pub fn new(runtime: R, agent_id: String, agent_alias_id: Option<String>) -> Self {
        Self {
            runtime,
            agent_id,
            agent_alias_id,
        }
    }

    /// Builds the client, discovering an alias when none is configured.
    pub async fn connect(settings: &AgentSettings, runtime: R) -> Self {
        let alias = match &settings.agent_alias_id {
            Some(alias) => Some(alias.clone()),
            None => discover_alias(&runtime, &settings.agent_id).await,
        };

        tracing::info!("Agent ID: {}", settings.agent_id);
        tracing::info!("Agent Alias ID: {}", alias.as_deref().unwrap_or("<none>"));

        Self::new(runtime, settings.agent_id.clone(), alias)
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn agent_alias_id(&self) -> Option<&str> {
        self.agent_alias_id.as_deref()
    }

    pub fn has_alias(&self) -> bool {
        self.agent_alias_id.is_some()
    }

    pub async fn get_recommendations(&self, course: &str, interest: &str) -> RecommendationOutcome {
        tracing::debug!(
            "Requesting recommendations (agent={}, alias={:?})",
            self.agent_id,
            self.agent_alias_id
        );

        let operation = AgentOperation::Recommendations;
        let Some(alias) = &self.agent_alias_id else {
            return RecommendationOutcome::Failure(alias_not_configured(operation));
        };

        match self.ask(alias, recommendation_prompt(course, interest)).await {
            Ok(reply) => RecommendationOutcome::Success {
                recommendations: reply.text,
                session_id: reply.session_id,
            },
            Err(e) => RecommendationOutcome::Failure(failure_for(operation, &e.to_string())),
        }
    }

    pub async fn discipline_description(&self, discipline: &str) -> DescriptionOutcome {
        tracing::debug!("Requesting description for discipline: {}", discipline);

        let operation = AgentOperation::Description;
        let Some(alias) = &self.agent_alias_id else {
            return DescriptionOutcome::Failure(alias_not_configured(operation));
        };

        match self.ask(alias, description_prompt(discipline)).await {
            Ok(reply) => DescriptionOutcome::Success {
                description: reply.text,
                session_id: reply.session_id,
            },
            Err(e) => DescriptionOutcome::Failure(failure_for(operation, &e.to_string())),
        }
    }

    async fn ask(&self, alias: &str, input_text: String) -> Result<AgentReply> {
        let request = InvocationRequest {
            agent_id: self.agent_id.clone(),
            agent_alias_id: alias.to_string(),
            session_id: new_session_id(),
            input_text,
        };

        let reply = self.runtime.invoke(&request).await.inspect_err(|e| {
            tracing::warn!("❌ Agent invocation failed: {}", e);
        })?;

        if reply.text.trim().is_empty() {
            return Err(AdvisorError::AgentError {
                message: "Agent returned an empty response".to_string(),
            });
        }

        tracing::debug!(
            "Agent replied with {} characters (session {})",
            reply.text.len(),
            reply.session_id
        );
        Ok(reply)
    }
}

/// 找不到指定名稱時使用第一個 alias；列出失敗則回傳 None
async fn discover_alias<R: AgentRuntime>(runtime: &R, agent_id: &str) -> Option<String> {
    tracing::info!("Listing aliases for agent {}", agent_id);

    let aliases = match runtime.list_aliases(agent_id, ALIAS_PAGE_SIZE).await {
        Ok(aliases) => aliases,
        Err(e) => {
            tracing::warn!("Failed to list agent aliases: {}", e);
            return None;
        }
    };

    let chosen = pick_alias(&aliases, PREFERRED_ALIAS_NAME);
    match chosen {
        Some(alias) => tracing::info!(
            "Using alias '{}' (ID: {})",
            alias.alias_name,
            alias.alias_id
        ),
        None => tracing::warn!("No alias found for agent {}", agent_id),
    }
    chosen.map(|alias| alias.alias_id.clone())
}

pub fn pick_alias<'a>(aliases: &'a [AliasSummary], preferred: &str) -> Option<&'a AliasSummary> {
    aliases
        .iter()
        .find(|alias| alias.alias_name == preferred)
        .or_else(|| aliases.first())
}

pub fn new_session_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("session-{}", &id[..8])
}

pub fn recommendation_prompt(course: &str, interest: &str) -> String {
    format!(
        "Sou estudante do curso de {} e tenho interesse na área de {}. Quais disciplinas você recomenda?",
        course, interest
    )
}

pub fn description_prompt(discipline: &str) -> String {
    format!(
        "Quero mais informações a respeito da matéria {0}, explique a importância dessa matéria \
         para o desenvolvimento profissional na área. Consulte o agente responsável por descrever \
         matérias de forma detalhada, a resposta deve seguir o padrão: 'A matéria {0} é importante \
         para o desenvolvimento profissional na área de 'area de interesse', pois...'.",
        discipline
    )
}

/// Drains a finite sequence of byte chunks into one UTF-8 string.
pub fn drain_chunks<I, B>(chunks: I) -> Result<String>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut buffer = Vec::new();
    for chunk in chunks {
        buffer.extend_from_slice(chunk.as_ref());
    }
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(id: &str, name: &str) -> AliasSummary {
        AliasSummary {
            alias_id: id.to_string(),
            alias_name: name.to_string(),
        }
    }

    #[test]
    fn test_pick_alias_prefers_name_then_first() {
        let aliases = vec![alias("A1", "prod"), alias("A2", PREFERRED_ALIAS_NAME)];
        assert_eq!(pick_alias(&aliases, PREFERRED_ALIAS_NAME).unwrap().alias_id, "A2");

        let others = vec![alias("B1", "prod"), alias("B2", "dev")];
        assert_eq!(pick_alias(&others, PREFERRED_ALIAS_NAME).unwrap().alias_id, "B1");

        assert!(pick_alias(&[], PREFERRED_ALIAS_NAME).is_none());
    }

    #[test]
    fn test_session_id_format() {
        let id = new_session_id();
        assert!(id.starts_with("session-"));
        assert_eq!(id.len(), "session-".len() + 8);
        assert!(id["session-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_drain_chunks_joins_split_multibyte_characters() {
        let text = "Computação";
        let bytes = text.as_bytes();
        // split inside "ç"
        let chunks = vec![&bytes[..8], &bytes[8..]];
        assert_eq!(drain_chunks(chunks).unwrap(), text);
        assert_eq!(drain_chunks(Vec::<Vec<u8>>::new()).unwrap(), "");
        assert!(drain_chunks(vec![vec![0xffu8, 0xfe]]).is_err());
    }

    #[test]
    fn test_prompts_embed_inputs() {
        let prompt = recommendation_prompt("Ciência da Computação", "IA");
        assert!(prompt.contains("curso de Ciência da Computação"));
        assert!(prompt.contains("área de IA"));

        let prompt = description_prompt("Compiladores");
        assert!(prompt.starts_with("Quero mais informações a respeito da matéria Compiladores,"));
        assert!(prompt.contains("'A matéria Compiladores é importante"));
    }
}
