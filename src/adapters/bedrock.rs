use crate::config::agent::AgentSettings;
use crate::core::advisor::drain_chunks;
use crate::domain::model::{AgentReply, AliasSummary, InvocationRequest};
use crate::domain::ports::AgentRuntime;
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::config::{Credentials, Region};
use aws_sdk_bedrockagentruntime::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_sdk_bedrockagentruntime::Client as RuntimeClient;
use aws_sdk_bedrockagent::Client as ManagementClient;

/// Bedrock Agents: `bedrock-agent-runtime` 負責呼叫，`bedrock-agent` 負責列出 alias
#[derive(Debug, Clone)]
pub struct BedrockRuntime {
    runtime: RuntimeClient,
    management: ManagementClient,
}

impl BedrockRuntime {
    pub async fn from_settings(settings: &AgentSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            settings.session_token.clone(),
            None,
            "environment",
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        tracing::debug!("Bedrock clients configured for region {}", settings.region);

        Self {
            runtime: RuntimeClient::new(&config),
            management: ManagementClient::new(&config),
        }
    }
}

#[async_trait]
impl AgentRuntime for BedrockRuntime {
    async fn invoke(&self, request: &InvocationRequest) -> Result<AgentReply> {
        tracing::debug!(
            "InvokeAgent agent={} alias={} session={}",
            request.agent_id,
            request.agent_alias_id,
            request.session_id
        );

        let mut output = self
            .runtime
            .invoke_agent()
            .agent_id(&request.agent_id)
            .agent_alias_id(&request.agent_alias_id)
            .session_id(&request.session_id)
            .input_text(&request.input_text)
            .send()
            .await
            .map_err(agent_error)?;

        let mut chunks = Vec::new();
        while let Some(event) = output.completion.recv().await.map_err(agent_error)? {
            if let ResponseStream::Chunk(part) = event {
                if let Some(bytes) = part.bytes {
                    chunks.push(bytes.into_inner());
                }
            }
        }
        tracing::debug!("Received {} completion chunks", chunks.len());

        Ok(AgentReply {
            session_id: output.session_id().to_string(),
            text: drain_chunks(chunks)?,
        })
    }

    async fn list_aliases(&self, agent_id: &str, max_results: i32) -> Result<Vec<AliasSummary>> {
        let output = self
            .management
            .list_agent_aliases()
            .agent_id(agent_id)
            .max_results(max_results)
            .send()
            .await
            .map_err(agent_error)?;

        Ok(output
            .agent_alias_summaries()
            .iter()
            .map(|summary| AliasSummary {
                alias_id: summary.agent_alias_id().to_string(),
                alias_name: summary.agent_alias_name().to_string(),
            })
            .collect())
    }
}

/// Renders a service error as `<code>: <message>` so it can be classified by substring.
fn agent_error<E>(err: E) -> AdvisorError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let code = err.code().map(str::to_string);
    let detail = err.message().map(str::to_string);

    let message = match (code, detail) {
        (Some(code), Some(detail)) => format!("{}: {}", code, detail),
        (Some(code), None) => code,
        _ => DisplayErrorContext(err).to_string(),
    };
    AdvisorError::AgentError { message }
}
