//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Drop records whose id was already seen, keeping the first occurrence.
///
/// The relative order of the surviving records is preserved.
pub fn dedupe_by_id<T: Entity>(records: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<T::Id> = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.id().clone()) {
            out.push(record);
        } else {
            tracing::warn!(id = ?record.id(), "dropping record with duplicate id");
        }
    }

    out
}
