use tempfile::TempDir;
use unb_advisor::core::catalog::{
    course_details, course_names, load_catalog, recommendation_choices, OTHER_COURSE_OPTION,
};
use unb_advisor::utils::error::AdvisorError;
use unb_advisor::LocalStorage;

fn write_catalog(dir: &TempDir, content: &str) {
    let data_dir = dir.path().join("dados");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("cursos-de-graduacao.json"), content).unwrap();
}

#[tokio::test]
async fn test_load_catalog_from_local_storage() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = serde_json::json!([
        {"nome": "ENGENHARIA DE SOFTWARE", "campus": "FACULDADE DO GAMA", "coordenador": "Maria Silva", "turno": "Diurno"},
        {"nome": "ADMINISTRAÇÃO", "campus": "DARCY RIBEIRO", "coordenador": "João Souza"},
        {"nome": "ENFERMAGEM", "campus": "FACULDADE DE CEILÂNDIA", "coordenador": "Ana Lima"}
    ]);
    write_catalog(&temp_dir, &catalog.to_string());

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let courses = load_catalog(&storage, "dados/cursos-de-graduacao.json")
        .await
        .unwrap();

    assert_eq!(courses.len(), 3);
    assert_eq!(
        course_names(&courses),
        vec!["ENGENHARIA DE SOFTWARE", "ADMINISTRAÇÃO", "ENFERMAGEM"]
    );
    assert_eq!(
        recommendation_choices(&courses),
        vec![
            "ADMINISTRAÇÃO",
            "ENFERMAGEM",
            "ENGENHARIA DE SOFTWARE",
            OTHER_COURSE_OPTION
        ]
    );

    let details = course_details(&courses, "ENFERMAGEM").unwrap();
    assert_eq!(details.course.coordenador, "Ana Lima");
    assert_eq!(details.location.latitude, -15.8303);
    assert_eq!(details.location.longitude, -48.1002);
}

#[tokio::test]
async fn test_missing_catalog_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let err = load_catalog(&storage, "dados/cursos-de-graduacao.json")
        .await
        .unwrap_err();

    match &err {
        AdvisorError::IoError(io) => {
            assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
            assert!(err
                .user_friendly_message()
                .contains("Arquivo não encontrado no caminho: dados/cursos-de-graduacao.json"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_catalog_missing_required_field_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_catalog(&temp_dir, r#"[{"nome": "DIREITO", "campus": "DARCY RIBEIRO"}]"#);

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let err = load_catalog(&storage, "dados/cursos-de-graduacao.json")
        .await
        .unwrap_err();

    assert!(matches!(err, AdvisorError::SerializationError(_)));
}
