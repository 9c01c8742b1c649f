//! Identity shared by every record in the model, plus the copy-on-write
//! helpers the engines use to rebuild child collections.

use std::sync::Arc;

use crate::id::EntityId;

/// A record carrying a stable identifier.
pub trait Entity {
    /// The entity's id. Stable across edits of the same logical entity.
    fn id(&self) -> &EntityId;
}

impl<T: Entity + ?Sized> Entity for Arc<T> {
    fn id(&self) -> &EntityId {
        (**self).id()
    }
}

/// Index of the first entity whose id equals `id`.
pub(crate) fn position<T: Entity>(items: &[Arc<T>], id: &EntityId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// New collection with `item` appended. Existing elements are shared.
pub(crate) fn appended<T>(items: &[Arc<T>], item: Arc<T>) -> Vec<Arc<T>> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend(items.iter().cloned());
    out.push(item);
    out
}

/// New collection with the element at `index` replaced by `item`.
pub(crate) fn replaced<T>(items: &[Arc<T>], index: usize, item: Arc<T>) -> Vec<Arc<T>> {
    let mut out = items.to_vec();
    out[index] = item;
    out
}

/// New collection without the element at `index`; the rest keep their order.
pub(crate) fn removed<T>(items: &[Arc<T>], index: usize) -> Vec<Arc<T>> {
    let mut out = items.to_vec();
    out.remove(index);
    out
}
