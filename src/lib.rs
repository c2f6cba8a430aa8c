//! Toolshed - PDCA tool catalog and project plan builder
//!
//! Loads a catalog of continuous-improvement tools, searches it, records the
//! tools a user picks for each Plan/Do/Check/Act phase, and exports the
//! resulting project plan as CSV, tab-separated text, Excel or PDF.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod id;
pub mod plan;
pub mod session;

pub use catalog::ToolCatalog;
pub use domain::{Phase, PlanTask, ProjectMeta, ToolRecord};
pub use error::{Result, ToolshedError};
pub use export::{ExportFormat, ExportSettings, Exporter};
pub use plan::{ProjectPlan, build_plan};
pub use session::{DuplicatePolicy, SelectionStore, Session};
