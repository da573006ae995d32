use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{validate_aws_region, validate_non_empty_string, Validate};
use std::env;

pub const REQUIRED_AWS_VARS: [&str; 3] = [
    "AWS_DEFAULT_REGION",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
];

/// Credentials and agent identifiers read from the environment.
#[derive(Clone)]
pub struct AgentSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub agent_id: String,
    pub agent_alias_id: Option<String>,
}

impl std::fmt::Debug for AgentSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSettings")
            .field("region", &self.region)
            .field("access_key_id", &"***")
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("agent_id", &self.agent_id)
            .field("agent_alias_id", &self.agent_alias_id)
            .finish()
    }
}

impl AgentSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 以任意查詢函式建立設定，方便測試時不用動到行程環境變數
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<String> = REQUIRED_AWS_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AdvisorError::MissingEnvironmentError { vars: missing });
        }

        let unquoted = |key: &str| get(key).map(|v| strip_quotes(&v)).filter(|v| !v.is_empty());

        let agent_id = unquoted("BEDROCK_AGENT_ID").ok_or_else(|| AdvisorError::ConfigError {
            message: "BEDROCK_AGENT_ID deve ser definido nas variáveis de ambiente".to_string(),
        })?;

        Ok(Self {
            region: unquoted("AWS_DEFAULT_REGION").unwrap_or_default(),
            access_key_id: get("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            session_token: get("AWS_SESSION_TOKEN"),
            agent_id,
            agent_alias_id: unquoted("BEDROCK_AGENT_ALIAS_ID"),
        })
    }
}

impl Validate for AgentSettings {
    fn validate(&self) -> Result<()> {
        validate_aws_region("AWS_DEFAULT_REGION", &self.region)?;
        validate_non_empty_string("BEDROCK_AGENT_ID", &self.agent_id)?;
        if let Some(alias) = &self.agent_alias_id {
            validate_non_empty_string("BEDROCK_AGENT_ALIAS_ID", alias)?;
        }

        tracing::debug!("✅ Agent settings validation passed");
        Ok(())
    }
}

/// Removes one pair of matching surrounding quotes, as left behind by some env files.
pub fn strip_quotes(value: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}
