use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// SIGAA 公開開課查詢的參數；欄位名稱與預設值對應目前的 JSF 頁面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub listing_path: String,
    /// G = graduação
    pub level: String,
    pub department: String,
    pub year: i32,
    pub period: u8,
    pub submit_field: String,
    pub submit_value: String,
    pub prerequisites_label: String,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sigaa.unb.br".to_string(),
            listing_path: "/sigaa/public/turmas/listar.jsf".to_string(),
            level: "G".to_string(),
            department: "673".to_string(),
            year: chrono::Local::now().year(),
            period: 1,
            submit_field: "formTurma:j_id_jsp_1370969402_11".to_string(),
            submit_value: "Buscar".to_string(),
            prerequisites_label: "Pré-Requisitos:".to_string(),
            user_agent: concat!("unb-advisor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AdvisorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("listing_path", &self.listing_path)?;
        validate_non_empty_string("level", &self.level)?;
        validate_non_empty_string("department", &self.department)?;
        validate_range("year", self.year, 1990, 2100)?;
        validate_range("period", self.period, 1, 4)?;
        validate_non_empty_string("submit_field", &self.submit_field)?;
        validate_non_empty_string("prerequisites_label", &self.prerequisites_label)?;
        Ok(())
    }
}
