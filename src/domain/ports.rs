use crate::domain::model::{AgentReply, AliasSummary, InvocationRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Managed conversational agent (Bedrock Agents in production).
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// 呼叫 agent 並將串流回應收集成完整字串
    async fn invoke(&self, request: &InvocationRequest) -> Result<AgentReply>;

    async fn list_aliases(&self, agent_id: &str, max_results: i32) -> Result<Vec<AliasSummary>>;
}
