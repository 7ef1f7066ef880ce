pub mod analytics_service;
pub mod broadcast;
pub mod investment_repository;
pub mod portfolio_service;
