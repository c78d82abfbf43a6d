//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate engine state and repository calls into use-case APIs.
//! - Keep host layers decoupled from storage details.

pub mod routine_service;
