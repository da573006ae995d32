use httpmock::prelude::*;
use tempfile::TempDir;
use unb_advisor::adapters::sigaa::{export_prerequisites, select_offering};
use unb_advisor::domain::model::Prerequisite;
use unb_advisor::utils::error::AdvisorError;
use unb_advisor::{LocalStorage, ScrapeConfig, SigaaScraper};

const LISTING_PATH: &str = "/sigaa/public/turmas/listar.jsf";

const LANDING_PAGE: &str = r#"<html><body>
<form id="formTurma" name="formTurma" method="post">
  <select name="formTurma:inputNivel"><option value="G">GRADUAÇÃO</option></select>
  <input type="hidden" name="javax.faces.ViewState" id="javax.faces.ViewState" value="j_id1" />
</form>
</body></html>"#;

const RESULTS_PAGE: &str = r##"<html><body>
<form id="formTurma" name="formTurma" method="post">
<table class="listagem">
  <thead><tr><th>Código</th><th>Turma</th></tr></thead>
  <tbody>
    <tr class="agrupador"><td colspan="2">
      <a href="#" onclick="if(typeof jsfcljs == 'function'){jsfcljs(document.getElementById('formTurma'),{'formTurma:j_id_jsp_1370969402_55':'formTurma:j_id_jsp_1370969402_55','id':'654321'},'');}return false">
        <span class="tituloDisciplina">ADM0123 - INTELIGÊNCIA ARTIFICIAL APLICADA</span>
      </a>
    </td></tr>
    <tr><td>01</td><td>Prof. Fulano</td></tr>
    <tr class="agrupador"><td colspan="2">
      <a href="#" onclick="if(typeof jsfcljs == 'function'){jsfcljs(document.getElementById('formTurma'),{'formTurma:j_id_jsp_1370969402_55':'formTurma:j_id_jsp_1370969402_55','id':'777000'},'');}return false">
        <span class="tituloDisciplina">ADM0456 - CONTABILIDADE GERAL</span>
      </a>
    </td></tr>
  </tbody>
</table>
<input type="hidden" name="javax.faces.ViewState" id="javax.faces.ViewState" value="j_id2" />
</form>
</body></html>"##;

const DETAILS_PAGE: &str = r#"<html><body>
<table class="visualizacao">
  <tr><th>Componente Curricular:</th><td>ADM0123 - INTELIGÊNCIA ARTIFICIAL APLICADA</td></tr>
  <tr><th>Pré-Requisitos:</th><td>
    ( <acronym title="ESTATÍSTICA APLICADA">EST0023</acronym> )
    E ( <acronym title="INTRODUÇÃO À ADMINISTRAÇÃO">ADM0001</acronym> )
  </td></tr>
  <tr><th>Co-Requisitos:</th><td>-</td></tr>
</table>
</body></html>"#;

fn config_for(server: &MockServer) -> ScrapeConfig {
    ScrapeConfig {
        base_url: server.base_url(),
        year: 2025,
        ..ScrapeConfig::default()
    }
}

#[tokio::test]
async fn test_two_step_postback_extracts_prerequisites() {
    let server = MockServer::start();

    let landing_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html; charset=UTF-8")
            .header("Set-Cookie", "JSESSIONID=abc123; Path=/")
            .body(LANDING_PAGE);
    });

    let search_mock = server.mock(|when, then| {
        when.method(POST)
            .path(LISTING_PATH)
            .body_contains("formTurma%3AinputNivel=G")
            .body_contains("formTurma%3AinputDepto=673")
            .body_contains("formTurma%3AinputAno=2025")
            .body_contains("formTurma%3AinputPeriodo=1")
            .body_contains("formTurma%3Aj_id_jsp_1370969402_11=Buscar")
            .body_contains("javax.faces.ViewState=j_id1");
        then.status(200)
            .header("Content-Type", "text/html; charset=UTF-8")
            .body(RESULTS_PAGE);
    });

    let details_mock = server.mock(|when, then| {
        when.method(POST)
            .path(LISTING_PATH)
            .body_contains("id=654321")
            .body_contains("formTurma=formTurma")
            .body_contains("javax.faces.ViewState=j_id2");
        then.status(200)
            .header("Content-Type", "text/html; charset=UTF-8")
            .body(DETAILS_PAGE);
    });

    let scraper = SigaaScraper::new(config_for(&server)).unwrap();
    let results = scraper.search().await.unwrap();

    landing_mock.assert();
    search_mock.assert();
    assert_eq!(results.offerings.len(), 2);
    assert_eq!(
        results.offerings[0].title,
        "ADM0123 - INTELIGÊNCIA ARTIFICIAL APLICADA"
    );
    assert_eq!(results.offerings[1].params["id"], "777000");

    let offering = select_offering(&results.offerings, None, 0).unwrap();
    let prerequisites = scraper.prerequisites(&results, offering).await.unwrap();

    details_mock.assert();
    assert_eq!(
        prerequisites,
        vec![
            Prerequisite {
                codigo: "EST0023".to_string(),
                nome: "ESTATÍSTICA APLICADA".to_string(),
            },
            Prerequisite {
                codigo: "ADM0001".to_string(),
                nome: "INTRODUÇÃO À ADMINISTRAÇÃO".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_missing_view_state_is_a_scrape_error() {
    let server = MockServer::start();

    let landing_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200).body("<html><body>Sistema em manutenção</body></html>");
    });

    let scraper = SigaaScraper::new(config_for(&server)).unwrap();
    let err = scraper.search().await.unwrap_err();

    landing_mock.assert();
    match err {
        AdvisorError::ScrapeError { stage, .. } => assert_eq!(stage, "view_state"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_portal_http_failure_is_reported() {
    let server = MockServer::start();

    let landing_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(503);
    });

    let scraper = SigaaScraper::new(config_for(&server)).unwrap();
    let err = scraper.search().await.unwrap_err();

    landing_mock.assert();
    assert!(matches!(err, AdvisorError::ApiError(_)));
}

#[tokio::test]
async fn test_export_prerequisites_as_csv_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let prerequisites = vec![Prerequisite {
        codigo: "EST0023".to_string(),
        nome: "ESTATÍSTICA APLICADA".to_string(),
    }];

    export_prerequisites(&storage, "out/prereqs.csv", &prerequisites)
        .await
        .unwrap();
    let csv_content = std::fs::read_to_string(temp_dir.path().join("out/prereqs.csv")).unwrap();
    assert_eq!(csv_content, "codigo,nome\nEST0023,ESTATÍSTICA APLICADA\n");

    export_prerequisites(&storage, "out/prereqs.json", &prerequisites)
        .await
        .unwrap();
    let json_content = std::fs::read_to_string(temp_dir.path().join("out/prereqs.json")).unwrap();
    let parsed: Vec<Prerequisite> = serde_json::from_str(&json_content).unwrap();
    assert_eq!(parsed, prerequisites);
}
