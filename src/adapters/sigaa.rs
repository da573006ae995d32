//! Prerequisite scraper for the SIGAA public class listing.
//!
//! The listing is a JSF page: every postback must echo the `javax.faces.ViewState`
//! token of the page it comes from, and the class detail view is reached by replaying
//! the parameters embedded in each row's `onclick` handler.

use crate::config::scrape::ScrapeConfig;
use crate::domain::model::{ClassOffering, Prerequisite};
use crate::domain::ports::Storage;
use crate::utils::error::{AdvisorError, Result};
use regex::Regex;
use reqwest::header::REFERER;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use url::Url;

const VIEW_STATE_FIELD: &str = "javax.faces.ViewState";
const FORM_ID: &str = "formTurma";

static ONCLICK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'id':'(\d+)'").expect("valid onclick id regex"));
static ONCLICK_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("valid onclick object regex"));
static ONCLICK_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([^']+)'\s*:\s*'([^']+)'").expect("valid onclick pair regex")
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn scrape_error(stage: &str, message: impl Into<String>) -> AdvisorError {
    AdvisorError::ScrapeError {
        stage: stage.to_string(),
        message: message.into(),
    }
}

/// Result page of the search postback.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub html: String,
    pub offerings: Vec<ClassOffering>,
}

pub struct SigaaScraper {
    client: Client,
    config: ScrapeConfig,
    listing_url: Url,
}

impl SigaaScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let listing_url = Url::parse(&config.base_url)
            .and_then(|base| base.join(&config.listing_path))
            .map_err(|e| AdvisorError::InvalidConfigValueError {
                field: "listing_path".to_string(),
                value: format!("{}{}", config.base_url, config.listing_path),
                reason: e.to_string(),
            })?;

        // JSF 的 ViewState 綁定在 session cookie 上
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    /// GET the listing page, then submit the search form for the configured department/term.
    pub async fn search(&self) -> Result<SearchResults> {
        tracing::info!("🌐 Opening {}", self.listing_url);
        let landing = self
            .client
            .get(self.listing_url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let view_state = extract_view_state(&landing)?;
        tracing::debug!("Initial view state: {}", view_state);

        tracing::info!(
            "🔍 Searching classes: level={} dept={} term={}.{}",
            self.config.level,
            self.config.department,
            self.config.year,
            self.config.period
        );
        let html = self
            .client
            .post(self.listing_url.clone())
            .form(&search_form(&self.config, &view_state))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let offerings = parse_offerings(&html)?;
        tracing::info!("Found {} class offerings", offerings.len());
        Ok(SearchResults { html, offerings })
    }

    /// Replays the offering's onclick postback and reads its prerequisite row.
    pub async fn prerequisites(
        &self,
        results: &SearchResults,
        offering: &ClassOffering,
    ) -> Result<Vec<Prerequisite>> {
        let view_state = extract_view_state(&results.html)?;
        tracing::info!("📖 Opening details of '{}'", offering.title);
        tracing::debug!("Postback params: {:?}", offering.params);

        let html = self
            .client
            .post(self.listing_url.clone())
            .header(REFERER, self.listing_url.as_str())
            .form(&detail_form(&view_state, offering))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let prerequisites = parse_prerequisites(&html, &self.config.prerequisites_label)?;
        tracing::info!("Found {} prerequisites", prerequisites.len());
        Ok(prerequisites)
    }
}

pub fn extract_view_state(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let input = selector(&format!(r#"input[name="{}"]"#, VIEW_STATE_FIELD));

    document
        .select(&input)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string)
        .ok_or_else(|| scrape_error("view_state", "javax.faces.ViewState input not found"))
}

pub fn search_form(config: &ScrapeConfig, view_state: &str) -> Vec<(String, String)> {
    let field = |name: &str| format!("{}:{}", FORM_ID, name);
    vec![
        (FORM_ID.to_string(), FORM_ID.to_string()),
        (field("inputNivel"), config.level.clone()),
        (field("inputDepto"), config.department.clone()),
        (field("inputAno"), config.year.to_string()),
        (field("inputPeriodo"), config.period.to_string()),
        (config.submit_field.clone(), config.submit_value.clone()),
        (VIEW_STATE_FIELD.to_string(), view_state.to_string()),
    ]
}

pub fn detail_form(view_state: &str, offering: &ClassOffering) -> Vec<(String, String)> {
    let mut form = vec![
        (VIEW_STATE_FIELD.to_string(), view_state.to_string()),
        (FORM_ID.to_string(), FORM_ID.to_string()),
    ];
    form.extend(
        offering
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    form
}

/// Key/value pairs of the object literal inside a JSF `onclick` handler,
/// or `None` when the handler does not reference a class id.
pub fn parse_onclick_params(onclick: &str) -> Option<BTreeMap<String, String>> {
    if !ONCLICK_ID.is_match(onclick) {
        return None;
    }
    let object = ONCLICK_OBJECT.captures(onclick)?.get(1)?.as_str();

    Some(
        ONCLICK_PAIR
            .captures_iter(object)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect(),
    )
}

pub fn parse_offerings(html: &str) -> Result<Vec<ClassOffering>> {
    let document = Html::parse_document(html);
    let table = document
        .select(&selector("table.listagem"))
        .next()
        .ok_or_else(|| scrape_error("listing", "table.listagem not found in search results"))?;

    let row_sel = selector("tr");
    let link_sel = selector("a[onclick]");
    let title_sel = selector("span.tituloDisciplina");

    let offerings = table
        .select(&row_sel)
        .filter_map(|row| row.select(&link_sel).next())
        .filter_map(|link| {
            let params = parse_onclick_params(link.value().attr("onclick")?)?;
            let title = link
                .select(&title_sel)
                .next()
                .map(|span| element_text(&span))
                .unwrap_or_else(|| element_text(&link));
            Some(ClassOffering { title, params })
        })
        .collect();

    Ok(offerings)
}

pub fn parse_prerequisites(html: &str, label: &str) -> Result<Vec<Prerequisite>> {
    let document = Html::parse_document(html);
    let table = document
        .select(&selector("table.visualizacao"))
        .next()
        .ok_or_else(|| scrape_error("details", "table.visualizacao not found"))?;

    let header = table
        .select(&selector("th"))
        .find(|th| element_text(th) == label)
        .ok_or_else(|| scrape_error("details", format!("'{}' row not found", label)))?;

    let row = header
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
        .ok_or_else(|| scrape_error("details", format!("'{}' header is not inside a row", label)))?;

    let prerequisites = row
        .select(&selector("acronym"))
        .map(|acronym| {
            let nome = acronym.value().attr("title").unwrap_or_default();
            if nome.is_empty() {
                tracing::warn!("Prerequisite {} has no title", element_text(&acronym));
            }
            Prerequisite {
                codigo: element_text(&acronym),
                nome: nome.to_string(),
            }
        })
        .collect();

    Ok(prerequisites)
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Picks an offering by case-insensitive title fragment, or by position.
pub fn select_offering<'a>(
    offerings: &'a [ClassOffering],
    title: Option<&str>,
    index: usize,
) -> Result<&'a ClassOffering> {
    match title {
        Some(fragment) => {
            let needle = fragment.to_lowercase();
            offerings
                .iter()
                .find(|o| o.title.to_lowercase().contains(&needle))
                .ok_or_else(|| scrape_error("select", format!("no offering matches '{}'", fragment)))
        }
        None => offerings.get(index).ok_or_else(|| {
            scrape_error(
                "select",
                format!("offering #{} requested but only {} found", index, offerings.len()),
            )
        }),
    }
}

/// 依副檔名輸出 CSV 或 JSON
pub async fn export_prerequisites<S: Storage>(
    storage: &S,
    path: &str,
    prerequisites: &[Prerequisite],
) -> Result<()> {
    let data = if path.ends_with(".json") {
        serde_json::to_vec_pretty(prerequisites)?
    } else {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for prerequisite in prerequisites {
            writer.serialize(prerequisite)?;
        }
        writer.flush()?;
        writer.into_inner().map_err(|e| AdvisorError::IoError(e.into_error()))?
    };

    tracing::debug!("Writing {} bytes to {}", data.len(), path);
    storage.write_file(path, &data).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONCLICK: &str = "if(typeof jsfcljs == 'function'){jsfcljs(document.getElementById('formTurma'),\
        {'formTurma:j_id_jsp_1370969402_55':'formTurma:j_id_jsp_1370969402_55','id':'654321'},'');}return false";

    #[test]
    fn test_extract_view_state() {
        let html = r#"<form id="formTurma"><input type="hidden" name="javax.faces.ViewState" value="j_id3" /></form>"#;
        assert_eq!(extract_view_state(html).unwrap(), "j_id3");
        assert!(extract_view_state("<html></html>").is_err());
    }

    #[test]
    fn test_parse_onclick_params() {
        let params = parse_onclick_params(ONCLICK).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["id"], "654321");
        assert_eq!(
            params["formTurma:j_id_jsp_1370969402_55"],
            "formTurma:j_id_jsp_1370969402_55"
        );

        assert!(parse_onclick_params("return false;").is_none());
        assert!(parse_onclick_params("jsfcljs({'foo':'bar'})").is_none());
    }

    #[test]
    fn test_parse_offerings_skips_rows_without_class_links() {
        let html = format!(
            r#"<table class="listagem">
                <tr><th>Componente</th></tr>
                <tr class="agrupador"><td><a onclick="{onclick}"><span class="tituloDisciplina">ADM0001 - INTELIGÊNCIA ARTIFICIAL</span></a></td></tr>
                <tr><td><a onclick="window.print()">Imprimir</a></td></tr>
            </table>"#,
            onclick = ONCLICK
        );

        let offerings = parse_offerings(&html).unwrap();
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].title, "ADM0001 - INTELIGÊNCIA ARTIFICIAL");
        assert_eq!(offerings[0].params["id"], "654321");
    }

    #[test]
    fn test_parse_offerings_requires_listing_table() {
        assert!(parse_offerings("<p>Nenhuma turma encontrada</p>").is_err());
    }

    #[test]
    fn test_parse_prerequisites() {
        let html = r#"<table class="visualizacao">
            <tr><th>Nome:</th><td>INTELIGÊNCIA ARTIFICIAL</td></tr>
            <tr><th>Pré-Requisitos:</th><td>
                ( <acronym title="ESTATÍSTICA APLICADA">EST0023</acronym> E
                <acronym title="ALGORITMOS E PROGRAMAÇÃO">CIC0004</acronym> )
            </td></tr>
        </table>"#;

        let prerequisites = parse_prerequisites(html, "Pré-Requisitos:").unwrap();
        assert_eq!(
            prerequisites,
            vec![
                Prerequisite {
                    codigo: "EST0023".to_string(),
                    nome: "ESTATÍSTICA APLICADA".to_string(),
                },
                Prerequisite {
                    codigo: "CIC0004".to_string(),
                    nome: "ALGORITMOS E PROGRAMAÇÃO".to_string(),
                },
            ]
        );

        assert!(parse_prerequisites(html, "Co-Requisitos:").is_err());
    }

    #[test]
    fn test_forms_carry_view_state() {
        let config = ScrapeConfig {
            year: 2025,
            ..ScrapeConfig::default()
        };
        let form = search_form(&config, "j_id1");
        assert!(form.contains(&("formTurma:inputDepto".to_string(), "673".to_string())));
        assert!(form.contains(&("formTurma:inputAno".to_string(), "2025".to_string())));
        assert!(form.contains(&(
            "formTurma:j_id_jsp_1370969402_11".to_string(),
            "Buscar".to_string()
        )));
        assert!(form.contains(&(VIEW_STATE_FIELD.to_string(), "j_id1".to_string())));

        let offering = ClassOffering {
            title: "IA".to_string(),
            params: parse_onclick_params(ONCLICK).unwrap(),
        };
        let form = detail_form("j_id2", &offering);
        assert_eq!(form[0], (VIEW_STATE_FIELD.to_string(), "j_id2".to_string()));
        assert!(form.contains(&("id".to_string(), "654321".to_string())));
    }

    #[test]
    fn test_select_offering() {
        let offerings = vec![
            ClassOffering {
                title: "ADM0001 - INTELIGÊNCIA ARTIFICIAL".to_string(),
                params: BTreeMap::new(),
            },
            ClassOffering {
                title: "ADM0002 - CONTABILIDADE".to_string(),
                params: BTreeMap::new(),
            },
        ];

        assert_eq!(
            select_offering(&offerings, Some("contab"), 0).unwrap().title,
            "ADM0002 - CONTABILIDADE"
        );
        assert_eq!(
            select_offering(&offerings, None, 0).unwrap().title,
            "ADM0001 - INTELIGÊNCIA ARTIFICIAL"
        );
        assert!(select_offering(&offerings, None, 5).is_err());
        assert!(select_offering(&offerings, Some("direito"), 0).is_err());
    }
}
