//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
}

pub use web_api::routes::{build_app, map_routes};
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
    pub mod errors;
}

pub use shared::models::*;
pub use shared::dto::*;
pub use shared::errors;
//---------------------------------------

//---------------------------------------
pub mod domain;

pub use domain::{analytics, dashboard, policy};
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod todo_repository;
}

pub use data_access::todo_repository;
//---------------------------------------
