use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record of the graduation course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub nome: String,
    pub campus: String,
    pub coordenador: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CampusLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetails {
    pub course: Course,
    pub location: CampusLocation,
}

/// The `success = false` half of every agent call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFailure {
    pub error: String,
    pub error_details: String,
    pub needs_alias: bool,
    /// 取代推薦/描述文字顯示的預設訊息
    pub fallback_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Success {
        recommendations: String,
        session_id: String,
    },
    Failure(AgentFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DescriptionOutcome {
    Success {
        description: String,
        session_id: String,
    },
    Failure(AgentFailure),
}

impl RecommendationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RecommendationOutcome::Success { .. })
    }

    pub fn failure(&self) -> Option<&AgentFailure> {
        match self {
            RecommendationOutcome::Failure(f) => Some(f),
            RecommendationOutcome::Success { .. } => None,
        }
    }

    /// Text shown to the user: the recommendations or the fallback placeholder.
    pub fn text(&self) -> &str {
        match self {
            RecommendationOutcome::Success {
                recommendations, ..
            } => recommendations,
            RecommendationOutcome::Failure(f) => &f.fallback_text,
        }
    }
}

impl DescriptionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DescriptionOutcome::Success { .. })
    }

    pub fn failure(&self) -> Option<&AgentFailure> {
        match self {
            DescriptionOutcome::Failure(f) => Some(f),
            DescriptionOutcome::Success { .. } => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DescriptionOutcome::Success { description, .. } => description,
            DescriptionOutcome::Failure(f) => &f.fallback_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub session_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSummary {
    pub alias_id: String,
    pub alias_name: String,
}

/// A class row of the SIGAA listing, with the postback parameters embedded in its onclick handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassOffering {
    pub title: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub codigo: String,
    pub nome: String,
}
