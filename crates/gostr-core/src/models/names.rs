use std::collections::HashMap;

use nostr_sdk::prelude::*;

use crate::config::Follow;
use crate::keys::shorten;
use crate::models::profile::parse_profile_name;

/// Names resolved by one enrichment query, applied to the session's
/// [`NameMap`] inside dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameUpdates(HashMap<PublicKey, String>);

impl NameUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pubkey: PublicKey, name: String) {
        self.0.insert(pubkey, name);
    }

    pub fn get(&self, pubkey: &PublicKey) -> Option<&str> {
        self.0.get(pubkey).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PublicKey, &str)> {
        self.0.iter().map(|(pk, name)| (pk, name.as_str()))
    }
}

/// Author pubkey to display name. Session scoped and never evicts.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    names: HashMap<PublicKey, String>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from follow entries that carry a name.
    pub fn from_follows<'a>(follows: impl IntoIterator<Item = &'a Follow>) -> Self {
        let mut map = Self::new();
        for follow in follows {
            if follow.name.is_empty() {
                continue;
            }
            if let Ok(pubkey) = PublicKey::from_hex(&follow.key) {
                map.names.insert(pubkey, follow.name.clone());
            }
        }
        map
    }

    pub fn get(&self, pubkey: &PublicKey) -> Option<&str> {
        self.names
            .get(pubkey)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// True when no usable name is known for `pubkey`.
    pub fn is_missing(&self, pubkey: &PublicKey) -> bool {
        self.get(pubkey).is_none()
    }

    /// Name if known, otherwise the shortened hex key.
    pub fn display(&self, pubkey: &PublicKey) -> String {
        match self.get(pubkey) {
            Some(name) => name.to_string(),
            None => shorten(&pubkey.to_hex()),
        }
    }

    pub fn apply(&mut self, updates: NameUpdates) {
        for (pubkey, name) in updates.0 {
            if !name.is_empty() {
                self.names.insert(pubkey, name);
            }
        }
    }

    /// Record the name from a live profile-metadata event. Returns whether
    /// the map changed.
    pub fn observe(&mut self, event: &Event) -> bool {
        if event.kind != Kind::Metadata {
            return false;
        }
        let Some(name) = parse_profile_name(&event.content) else {
            return false;
        };
        if self.get(&event.pubkey) == Some(name.as_str()) {
            return false;
        }
        self.names.insert(event.pubkey, name);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
