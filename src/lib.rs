//! # SQL Migration Analyzer Library
//!
//! Heuristic Oracle to PostgreSQL migration complexity scoring for plain SQL
//! and MyBatis statement templates.

pub mod analysis;
pub mod app;
pub mod batch;
pub mod cache;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod error;
pub mod output;
pub mod template;
