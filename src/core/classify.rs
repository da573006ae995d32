use crate::domain::model::AgentFailure;

pub const ALIAS_NOT_CONFIGURED: &str = "Alias não configurado";

const ALIAS_NOT_CONFIGURED_DETAILS: &str = "É necessário criar um alias para o agente chamado 'agente-alias'. \
     Siga as instruções na tela para criar um alias e configurar a aplicação.";

const RESOURCE_NOT_FOUND_DETAILS: &str = "O agente ou alias especificado não foi encontrado. \
     Verifique se você criou um alias chamado 'agente-alias' e \
     se o agente está implantado na mesma região que você está usando.";

const ACCESS_DENIED_DETAILS: &str = "Suas credenciais não têm permissão para acessar este recurso. \
     Verifique se você tem as permissões corretas para acessar o Amazon Bedrock.";

const INVALID_REQUEST_DETAILS: &str = "Requisição inválida. É necessário criar um alias para o agente chamado 'agente-alias'. \
     Acesse o console da AWS e clique em 'Criar alias' para o seu agente.";

const OTHER_DETAILS: &str = "Por favor, tente novamente mais tarde ou contate o suporte.";

/// Category of a failed agent call, derived from the raw exception text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    ResourceNotFound,
    AccessDenied,
    InvalidRequest,
    Other,
}

impl AgentErrorKind {
    pub fn needs_alias(self) -> bool {
        matches!(
            self,
            AgentErrorKind::ResourceNotFound | AgentErrorKind::InvalidRequest
        )
    }

    pub fn explanation(self) -> &'static str {
        match self {
            AgentErrorKind::ResourceNotFound => RESOURCE_NOT_FOUND_DETAILS,
            AgentErrorKind::AccessDenied => ACCESS_DENIED_DETAILS,
            AgentErrorKind::InvalidRequest => INVALID_REQUEST_DETAILS,
            AgentErrorKind::Other => OTHER_DETAILS,
        }
    }
}

/// Which agent call failed; decides the message prefix and the placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentOperation {
    Recommendations,
    Description,
}

impl AgentOperation {
    fn details_prefix(self) -> &'static str {
        match self {
            AgentOperation::Recommendations => "Não foi possível obter recomendações. ",
            AgentOperation::Description => "Não foi possível obter a descrição da disciplina. ",
        }
    }

    fn fallback_text(self, kind: AgentErrorKind) -> &'static str {
        match (self, kind.needs_alias()) {
            (AgentOperation::Recommendations, _) => "Não foi possível obter recomendações.",
            (AgentOperation::Description, true) => "Não foi possível obter a descrição.",
            (AgentOperation::Description, false) => {
                "Não foi possível obter a descrição da disciplina."
            }
        }
    }

    fn alias_fallback_text(self) -> &'static str {
        match self {
            AgentOperation::Recommendations => {
                "Não foi possível obter recomendações sem um alias configurado."
            }
            AgentOperation::Description => {
                "Não foi possível obter a descrição sem um alias configurado."
            }
        }
    }
}

/// 依例外文字分類錯誤（不分大小寫的子字串比對）
pub fn classify(raw: &str) -> AgentErrorKind {
    let lowered = raw.to_lowercase();

    if lowered.contains("resourcenotfoundexception") {
        AgentErrorKind::ResourceNotFound
    } else if lowered.contains("accessdeniedexception") {
        AgentErrorKind::AccessDenied
    } else if lowered.contains("badrequestexception")
        || lowered.contains("validation")
        || lowered.contains("missing required parameter")
    {
        AgentErrorKind::InvalidRequest
    } else {
        AgentErrorKind::Other
    }
}

pub fn failure_for(operation: AgentOperation, raw: &str) -> AgentFailure {
    let kind = classify(raw);
    AgentFailure {
        error: raw.to_string(),
        error_details: format!("{}{}", operation.details_prefix(), kind.explanation()),
        needs_alias: kind.needs_alias(),
        fallback_text: operation.fallback_text(kind).to_string(),
    }
}

/// Failure returned without touching the network when no alias could be resolved.
pub fn alias_not_configured(operation: AgentOperation) -> AgentFailure {
    AgentFailure {
        error: ALIAS_NOT_CONFIGURED.to_string(),
        error_details: ALIAS_NOT_CONFIGURED_DETAILS.to_string(),
        needs_alias: true,
        fallback_text: operation.alias_fallback_text().to_string(),
    }
}

/// Step-by-step guide shown whenever a failure has `needs_alias` set.
pub fn alias_instructions() -> &'static str {
    "Seu agente não possui um alias. É necessário criar um alias antes de poder usar o agente.\n\
     \n\
     Como criar um alias para seu agente:\n\
     1. Acesse o console AWS Bedrock (https://console.aws.amazon.com/bedrock)\n\
     2. No menu lateral, clique em \"Agentes\"\n\
     3. Selecione seu agente \"grade-agent\"\n\
     4. Clique no botão \"Criar alias\" no topo da página\n\
     5. Defina um nome para o alias (ex: \"prod\")\n\
     6. Selecione a versão mais recente do agente\n\
     7. Clique em \"Criar\"\n\
     8. Copie o ID do alias criado e defina BEDROCK_AGENT_ALIAS_ID\n\
     \n\
     Após criar o alias, execute novamente."
}
