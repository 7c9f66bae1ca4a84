// src/core/mod.rs
//! Client layer shared by the LinkedIn operations

pub mod voyager;
pub mod voyager_client;

pub use voyager::{ApiResponse, VoyagerApi};
pub use voyager_client::VoyagerClient;
