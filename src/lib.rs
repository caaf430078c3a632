//! Movie recommendation service.
//!
//! Looks up the movies most similar to a selected title in a precomputed
//! similarity matrix and pairs each result with a poster from OMDb.

pub mod api;
pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
