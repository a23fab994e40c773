//! Planview - project plan client and renderer
//!
//! Planview talks to a plan-generation service over HTTP and turns the
//! loosely-shaped JSON documents it returns into a stable set of
//! display sections. The normalizer is total: any JSON value resolves
//! to renderable sections without erroring, no matter how much of the
//! expected shape the generator skipped or mangled.
//!
//! # Modules
//!
//! - [`client`] - Plan service trait, HTTP implementation, error taxonomy
//! - [`plan`] - Normalizer: probes, safe content, file breakdown, sections
//! - [`render`] - Plain-text and JSON rendering of resolved sections
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Interactive terminal client
//! - [`demo`] - Built-in sample plan document

pub mod cli;
pub mod client;
pub mod config;
pub mod demo;
pub mod plan;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use client::{
    GENERIC_SERVICE_ERROR, GENERIC_TRANSPORT_ERROR, HealthStatus, HttpPlanService, PlanError, PlanService,
};
pub use config::{Config, ServiceConfig};
pub use plan::{Block, Section, SectionKind, resolve_sections};
pub use render::{render_json, render_text};
