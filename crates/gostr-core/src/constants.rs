//! Application-wide constants
//!
//! Centralized location for limits and timings shared by the feed,
//! enrichment and thread loaders.

use std::time::Duration;

/// Maximum number of events collected for one feed view
pub const FEED_LIMIT: usize = 25;

/// Maximum number of direct replies collected for one thread frame
pub const REPLY_LIMIT: usize = 50;

/// Maximum number of the viewer's own reactions/boosts scanned per feed load
pub const REACTION_LOOKUP_LIMIT: usize = 200;

/// Idle duration after which a subscription is considered exhausted
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Width hint handed to the image previewer, in characters
pub const IMAGE_PREVIEW_WIDTH: u32 = 60;

/// Client name; also names the config directory and log file
pub const CLIENT_NAME: &str = "gostr";

/// Reaction content that counts as a like (NIP-25)
pub const LIKE_CONTENT: &str = "+";
