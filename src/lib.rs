//! Job search and easy-apply extensions for the LinkedIn Voyager API
pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod linkedin;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::core::{ApiResponse, VoyagerApi, VoyagerClient};
pub use crate::environment::Session;
pub use crate::linkedin::{
    ExperienceLevel, FormField, JobResult, JobType, LinkedInEvolved, SearchFilters, WorkplaceType,
};
