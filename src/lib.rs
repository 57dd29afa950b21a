//! Shared-vehicle fleet engine
//!
//! Stations, vehicles, users and rides behind a single `FleetManager`,
//! exposed over HTTP with Axum.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
