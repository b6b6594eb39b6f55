pub mod names;
pub mod profile;
pub mod reactions;
pub mod tags;

pub use names::{NameMap, NameUpdates};
pub use profile::parse_profile_name;
pub use reactions::{ReactionChange, ReactionIndex, ReactionKind};
pub use tags::{first_event_ref, first_tag_value, has_tag, is_reply};
