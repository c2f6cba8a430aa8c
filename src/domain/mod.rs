//! Domain types for Toolshed
//!
//! - Phase: the four PDCA phases, in canonical order
//! - ToolRecord: one typed row of the tool catalog
//! - ProjectMeta: project name, owner and created date for a session
//! - PlanTask: one derived row of the exportable project plan

pub mod phase;
pub mod plan_task;
pub mod project;
pub mod tool_record;

pub use phase::Phase;
pub use plan_task::PlanTask;
pub use project::ProjectMeta;
pub use tool_record::{MAX_VIDEOS, ToolRecord};
