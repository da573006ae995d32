use crate::domain::model::{CampusLocation, Course, CourseDetails};
use crate::domain::ports::Storage;
use crate::utils::error::{AdvisorError, Result};
use std::collections::HashSet;

pub const DEFAULT_CATALOG_PATH: &str = "dados/cursos-de-graduacao.json";

pub const OTHER_COURSE_OPTION: &str = "Outro (especifique abaixo)";

pub const UNSPECIFIED_COURSE: &str = "Não especificado";

const CAMPUS_LOCATIONS: &[(&str, CampusLocation)] = &[
    (
        "DARCY RIBEIRO",
        CampusLocation {
            latitude: -15.7634,
            longitude: -47.8707,
        },
    ),
    (
        "FACULDADE DO GAMA",
        CampusLocation {
            latitude: -15.9892,
            longitude: -48.0546,
        },
    ),
    (
        "FACULDADE DE CEILÂNDIA",
        CampusLocation {
            latitude: -15.8303,
            longitude: -48.1002,
        },
    ),
    (
        "FACULDADE DE PLANALTINA",
        CampusLocation {
            latitude: -15.6100,
            longitude: -47.6500,
        },
    ),
];

/// 讀取課程目錄 JSON（一個物件陣列，至少包含 nome / campus / coordenador）
pub async fn load_catalog<S: Storage>(storage: &S, path: &str) -> Result<Vec<Course>> {
    let raw = storage.read_file(path).await.map_err(|e| match e {
        AdvisorError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AdvisorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Arquivo não encontrado no caminho: {}", path),
            ))
        }
        other => other,
    })?;
    let courses: Vec<Course> = serde_json::from_slice(&raw)?;
    tracing::debug!("Loaded {} courses from {}", courses.len(), path);
    Ok(courses)
}

/// Unique course names in catalog order.
pub fn course_names(courses: &[Course]) -> Vec<String> {
    let mut seen = HashSet::new();
    courses
        .iter()
        .filter(|c| seen.insert(c.nome.as_str()))
        .map(|c| c.nome.clone())
        .collect()
}

/// Sorted unique names followed by the free-text "other" option.
pub fn recommendation_choices(courses: &[Course]) -> Vec<String> {
    let mut names = course_names(courses);
    names.sort();
    names.push(OTHER_COURSE_OPTION.to_string());
    names
}

pub fn campus_location(campus: &str) -> CampusLocation {
    CAMPUS_LOCATIONS
        .iter()
        .find(|(name, _)| *name == campus)
        .map(|(_, location)| *location)
        .unwrap_or(CampusLocation {
            latitude: 0.0,
            longitude: 0.0,
        })
}

pub fn course_details(courses: &[Course], name: &str) -> Option<CourseDetails> {
    courses.iter().find(|c| c.nome == name).map(|course| CourseDetails {
        location: campus_location(&course.campus),
        course: course.clone(),
    })
}

/// Course picked in the recommendation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseChoice {
    Listed(String),
    Other(Option<String>),
}

impl CourseChoice {
    /// Picking the "other" option from the list means the name comes from free text.
    pub fn from_selection(selection: &str, custom: Option<String>) -> Self {
        if selection == OTHER_COURSE_OPTION {
            CourseChoice::Other(custom)
        } else {
            CourseChoice::Listed(selection.to_string())
        }
    }

    pub fn resolve(&self) -> String {
        match self {
            CourseChoice::Listed(name) => name.clone(),
            CourseChoice::Other(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
            CourseChoice::Other(_) => UNSPECIFIED_COURSE.to_string(),
        }
    }
}
