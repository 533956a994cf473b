//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate note store calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod composer;
pub mod diary_service;
