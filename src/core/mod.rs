pub mod advisor;
pub mod catalog;
pub mod classify;
pub mod extract;
pub mod session;

pub use crate::domain::model::{
    AgentFailure, Course, CourseDetails, DescriptionOutcome, RecommendationOutcome,
};
pub use crate::domain::ports::{AgentRuntime, Storage};
pub use crate::utils::error::Result;
