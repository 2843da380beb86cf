//! AHP Engine - Analytic Hierarchy Process decision support
//!
//! This crate turns pairwise judgments between criteria, and between
//! alternatives under each criterion, into priority weights, consistency
//! ratios and a ranked list of alternatives.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
