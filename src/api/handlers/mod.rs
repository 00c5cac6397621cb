//! HTTP request handlers.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod workspace_stats;

pub use health::health_handler;
pub use links::update_link_handler;
pub use redirect::redirect_handler;
pub use stats::link_stats_handler;
pub use workspace_stats::workspace_stats_handler;
