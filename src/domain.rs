pub mod analytics;
pub mod dashboard;
pub mod policy;
