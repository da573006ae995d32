use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Faltam as seguintes variáveis de ambiente: {}", .vars.join(", "))]
    MissingEnvironmentError { vars: Vec<String> },

    #[error("Agent invocation failed: {message}")]
    AgentError { message: String },

    #[error("Scrape failed at {stage}: {message}")]
    ScrapeError { stage: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Agent,
    Data,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::ApiError(_) | AdvisorError::ScrapeError { .. } => ErrorCategory::Network,
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::MissingEnvironmentError { .. } => ErrorCategory::Configuration,
            AdvisorError::AgentError { .. } => ErrorCategory::Agent,
            AdvisorError::CsvError(_)
            | AdvisorError::IoError(_)
            | AdvisorError::SerializationError(_)
            | AdvisorError::Utf8Error(_) => ErrorCategory::Data,
            AdvisorError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Agent => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::IoError(e) => e.to_string(),
            AdvisorError::SerializationError(e) => format!("Erro ao carregar dados: {}", e),
            AdvisorError::ValidationError { message } => message.clone(),
            AdvisorError::AgentError { message } => {
                format!("Ocorreu um erro inesperado: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::MissingEnvironmentError { .. } => {
                "Defina AWS_DEFAULT_REGION, AWS_ACCESS_KEY_ID e AWS_SECRET_ACCESS_KEY antes de executar."
            }
            AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::ConfigError { .. } => {
                "Verifique se todas as variáveis de ambiente da AWS estão configuradas corretamente."
            }
            AdvisorError::ApiError(_) => "Check network connectivity and that the portal is reachable.",
            AdvisorError::ScrapeError { .. } => {
                "The portal layout may have changed; review the selectors in the scrape config."
            }
            AdvisorError::AgentError { .. } => {
                "Por favor, tente novamente mais tarde ou contate o suporte."
            }
            AdvisorError::IoError(_) => "Check that the file exists and is readable.",
            AdvisorError::CsvError(_)
            | AdvisorError::SerializationError(_)
            | AdvisorError::Utf8Error(_) => "Check the input file format.",
            AdvisorError::ValidationError { .. } => "Preencha os campos obrigatórios e tente novamente.",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
