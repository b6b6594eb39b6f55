//! Tag extraction utilities
//!
//! Helpers for the two tag names the feed engine cares about: `e` (event
//! reference) and `p` (pubkey reference).

use nostr_sdk::prelude::*;

pub const EVENT_TAG: &str = "e";
pub const PUBKEY_TAG: &str = "p";

fn tag_name(tag: &Tag) -> Option<&str> {
    tag.as_slice().first().map(String::as_str)
}

/// Check if an event carries at least one tag named `name` (value not required).
pub fn has_tag(event: &Event, name: &str) -> bool {
    event.tags.iter().any(|tag| tag_name(tag) == Some(name))
}

/// True for replies/comments: events that reference another event.
pub fn is_reply(event: &Event) -> bool {
    has_tag(event, EVENT_TAG)
}

/// First value of the first tag named `name` that has one.
pub fn first_tag_value<'a>(event: &'a Event, name: &str) -> Option<&'a str> {
    event.tags.iter().find_map(|tag| {
        let values = tag.as_slice();
        match values {
            [n, value, ..] if n == name && !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    })
}

/// Event id referenced by the first `e` tag, if it parses.
pub fn first_event_ref(event: &Event) -> Option<EventId> {
    first_tag_value(event, EVENT_TAG).and_then(|hex| EventId::from_hex(hex).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(tags: Vec<Tag>) -> Event {
        EventBuilder::text_note("hello")
            .tags(tags)
            .sign_with_keys(&Keys::generate())
            .unwrap()
    }

    #[test]
    fn test_plain_note_is_not_a_reply() {
        let event = note(vec![]);
        assert!(!is_reply(&event));
        assert_eq!(first_event_ref(&event), None);
    }

    #[test]
    fn test_first_event_ref_uses_first_e_tag() {
        let first = note(vec![]);
        let second = note(vec![]);
        let pk = Keys::generate().public_key();
        let event = note(vec![
            Tag::public_key(pk),
            Tag::event(first.id),
            Tag::event(second.id),
        ]);

        assert!(is_reply(&event));
        assert_eq!(first_event_ref(&event), Some(first.id));
        assert_eq!(first_tag_value(&event, PUBKEY_TAG), Some(pk.to_hex().as_str()));
    }

    #[test]
    fn test_bare_tag_name_counts_as_present_but_has_no_value() {
        let bare = Tag::custom(
            TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::E)),
            Vec::<String>::new(),
        );
        let event = note(vec![bare]);
        assert!(is_reply(&event));
        assert_eq!(first_event_ref(&event), None);
    }
}
