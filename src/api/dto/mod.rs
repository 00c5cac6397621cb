//! Request and response DTOs for the API layer.

pub mod link_stats;
pub mod update_link;
pub mod workspace_stats;

pub use link_stats::{LinkStatsQuery, LinkStatsResponse};
pub use update_link::{LinkResponse, UpdateLinkRequest};
pub use workspace_stats::WorkspaceStatsResponse;
