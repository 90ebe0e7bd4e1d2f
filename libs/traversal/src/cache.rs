//! # Member Metadata Cache
//!
//! Maps a (type descriptor, [`TraversalSettings`]) pair to the ordered list of
//! structural members the engine inspects for that type: leaf members and
//! back-reference fields removed, members outside the selected categories
//! removed, properties before fields, declaration order within each.
//!
//! Descriptors are keyed by content, not by `TypeId` alone: two descriptors
//! of the same Rust type with different names or members get separate
//! entries. Each entry keeps the layout it was computed from and a lookup
//! is served only when that layout matches the caller's descriptor.
//!
//! Entries are pure functions of their key, so two threads racing on the
//! same key compute the same list and whichever insert lands first wins.

use crate::member::{MemberCategory, MemberInfo, TypeInfo, Visibility};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use tracing::{trace, warn};
use traversal_config::TraversalSettings;

static GLOBAL: Lazy<MemberCache> = Lazy::new(MemberCache::new);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    type_id: TypeId,
    fingerprint: u64,
    settings: TraversalSettings,
}

#[derive(Debug)]
struct CacheEntry {
    name: String,
    declared: Vec<MemberInfo>,
    structural: Arc<[MemberInfo]>,
}

impl CacheEntry {
    fn serves(&self, info: &TypeInfo) -> Option<Arc<[MemberInfo]>> {
        info.same_layout(&self.name, &self.declared)
            .then(|| Arc::clone(&self.structural))
    }
}

/// Thread-safe cache of structural member lists
#[derive(Debug, Default)]
pub struct MemberCache {
    entries: DashMap<CacheKey, CacheEntry>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Process-wide instance used when no cache is injected
    pub fn global() -> &'static MemberCache {
        &GLOBAL
    }

    /// Structural members of `info` under `settings`, computed on first use
    pub fn members(&self, info: &TypeInfo, settings: &TraversalSettings) -> Arc<[MemberInfo]> {
        let key = CacheKey {
            type_id: info.type_id(),
            fingerprint: info.fingerprint(),
            settings: settings.clone(),
        };

        if let Some(members) = self.entries.get(&key).and_then(|entry| entry.serves(info)) {
            return members;
        }

        let computed = structural_members(info, settings);
        trace!(
            "Caching {} structural members for {}",
            computed.len(),
            info.name()
        );

        let entry = self.entries.entry(key).or_insert_with(|| CacheEntry {
            name: info.name().to_string(),
            declared: info.members().to_vec(),
            structural: Arc::clone(&computed),
        });

        match entry.serves(info) {
            Some(members) => members,
            None => {
                warn!(
                    "Descriptor {} collides with cached {}; using an uncached member list",
                    info.name(),
                    entry.name
                );
                computed
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

fn admits(settings: &TraversalSettings, member: &MemberInfo) -> bool {
    match (member.category(), member.visibility()) {
        (MemberCategory::Property, Visibility::Public) => settings.includes_public_properties(),
        (MemberCategory::Property, Visibility::Private) => {
            settings.includes_non_public_properties()
        }
        (MemberCategory::Field, Visibility::Public) => settings.includes_public_fields(),
        (MemberCategory::Field, Visibility::Private) => settings.includes_non_public_fields(),
    }
}

fn structural_members(info: &TypeInfo, settings: &TraversalSettings) -> Arc<[MemberInfo]> {
    let of_category = |category: MemberCategory| {
        info.members()
            .iter()
            .filter(move |member| member.category() == category)
    };

    of_category(MemberCategory::Property)
        .chain(of_category(MemberCategory::Field))
        .filter(|member| {
            !member.shape().is_leaf()
                && !(member.category() == MemberCategory::Field && member.is_back_reference())
                && admits(settings, member)
        })
        .cloned()
        .collect()
}
