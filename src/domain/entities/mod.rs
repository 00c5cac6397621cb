//! Core domain entities.
//!
//! Plain data structures for the two concepts this service owns a view of:
//!
//! - [`Link`] - A short link and its per-link settings
//! - [`Engagement`] - One recorded visit, append-only
//!
//! Creation inputs use separate structs (`NewEngagement`, `LinkPatch`) in the
//! "new type" pattern.

pub mod engagement;
pub mod link;

pub use engagement::{Engagement, EngagementEvent, EngagementType, NewEngagement};
pub use link::{Link, LinkPatch};
