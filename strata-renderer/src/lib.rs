//! # strata-renderer
//!
//! Template engine adapters and the layered render context.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strata_core::{Attributes, PluginConfig};
//! use strata_renderer::{EngineRegistry, RenderContext};
//!
//! async fn hello() -> Option<String> {
//!     let engine = EngineRegistry::builtin()
//!         .resolve(&PluginConfig::new("tera"))
//!         .ok()?;
//!     let ctx = RenderContext::build(
//!         &Attributes::new(),
//!         &Attributes::new(),
//!         &Attributes::new(),
//!         "world",
//!     );
//!     engine.render_str("hello {{ contents }}", &ctx).await.ok()
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod hbs;
pub mod registry;

pub use context::RenderContext;
pub use engine::{RenderSource, TemplateEngine, TeraEngine};
pub use error::RenderError;
pub use hbs::HandlebarsEngine;
pub use registry::EngineRegistry;
