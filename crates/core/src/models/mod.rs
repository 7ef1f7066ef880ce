pub mod analytics;
pub mod chart;
pub mod investment;
pub mod market;
pub mod settings;
