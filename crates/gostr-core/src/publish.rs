//! Signed event builders for everything the client publishes.

use nostr_sdk::nips::nip04;
use nostr_sdk::prelude::*;

use crate::constants::LIKE_CONTENT;
use crate::error::{CoreError, CoreResult};

fn sign(builder: EventBuilder, keys: &Keys) -> CoreResult<Event> {
    builder
        .sign_with_keys(keys)
        .map_err(|e| CoreError::Signing(e.to_string()))
}

fn marked_event_tag(id: &EventId, marker: &str) -> CoreResult<Tag> {
    Tag::parse(["e", id.to_hex().as_str(), "", marker])
        .map_err(|e| CoreError::Signing(format!("building e tag: {}", e)))
}

/// Kind 1 note with no tags.
pub fn text_note(keys: &Keys, content: &str) -> CoreResult<Event> {
    sign(EventBuilder::text_note(content), keys)
}

/// NIP-10 reply to `target` inside the thread started by `root`.
///
/// Carries a `root` marked e tag, a `reply` marked e tag when the target is
/// not the root itself, and a p tag for each distinct author.
pub fn reply(keys: &Keys, root: &Event, target: &Event, content: &str) -> CoreResult<Event> {
    let mut tags = vec![marked_event_tag(&root.id, "root")?];
    if target.id != root.id {
        tags.push(marked_event_tag(&target.id, "reply")?);
    }
    tags.push(Tag::public_key(root.pubkey));
    if target.pubkey != root.pubkey {
        tags.push(Tag::public_key(target.pubkey));
    }
    sign(EventBuilder::text_note(content).tags(tags), keys)
}

/// NIP-25 like.
pub fn like(keys: &Keys, target: &Event) -> CoreResult<Event> {
    let builder = EventBuilder::new(Kind::Reaction, LIKE_CONTENT)
        .tag(Tag::event(target.id))
        .tag(Tag::public_key(target.pubkey));
    sign(builder, keys)
}

/// NIP-18 boost; the content is the boosted event's JSON.
pub fn boost(keys: &Keys, target: &Event) -> CoreResult<Event> {
    let builder = EventBuilder::new(Kind::Repost, target.as_json())
        .tag(Tag::event(target.id))
        .tag(Tag::public_key(target.pubkey));
    sign(builder, keys)
}

/// NIP-09 deletion of one of our own events.
pub fn deletion(keys: &Keys, own_event: EventId) -> CoreResult<Event> {
    sign(
        EventBuilder::new(Kind::EventDeletion, "").tag(Tag::event(own_event)),
        keys,
    )
}

/// NIP-04 encrypted direct message.
pub fn direct_message(keys: &Keys, to: &PublicKey, content: &str) -> CoreResult<Event> {
    let encrypted = nip04::encrypt(keys.secret_key(), to, content)
        .map_err(|e| CoreError::Encryption(e.to_string()))?;
    let builder =
        EventBuilder::new(Kind::EncryptedDirectMessage, encrypted).tag(Tag::public_key(*to));
    sign(builder, keys)
}

/// Plaintext of a direct message the viewer sent or received.
///
/// The counterparty is the p-tagged recipient when the viewer is the
/// author, otherwise the author.
pub fn read_direct_message(keys: &Keys, event: &Event) -> CoreResult<String> {
    let counterparty = if event.pubkey == keys.public_key() {
        event
            .tags
            .public_keys()
            .next()
            .copied()
            .ok_or_else(|| CoreError::Encryption("direct message has no recipient".to_string()))?
    } else {
        event.pubkey
    };
    nip04::decrypt(keys.secret_key(), &counterparty, &event.content)
        .map_err(|e| CoreError::Encryption(e.to_string()))
}
