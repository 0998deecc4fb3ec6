//! Ordered row/column storage.
//!
//! Objects live in a slotmap arena so ids stay valid across insertions and
//! deletions; a separate `Vec` of ids defines display order.

use slotmap::{Key, SlotMap};

use super::object::GridObject;

/// Access to the [`GridObject`] inside a row or column.
pub trait AxisItem {
    fn object(&self) -> &GridObject;
    fn object_mut(&mut self) -> &mut GridObject;
}

/// An ordered collection of rows or columns.
#[derive(Debug, Clone)]
pub struct AxisList<K: Key, T> {
    items: SlotMap<K, T>,
    order: Vec<K>,
}

impl<K: Key, T> Default for AxisList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, T> AxisList<K, T> {
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append an item, returning its id.
    pub fn push_with(&mut self, make: impl FnOnce(K) -> T) -> K {
        let id = self.items.insert_with_key(make);
        self.order.push(id);
        id
    }

    /// Remove the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<(K, T)> {
        if index >= self.order.len() {
            return None;
        }
        let id = self.order.remove(index);
        self.items.remove(id).map(|item| (id, item))
    }

    pub fn id_at(&self, index: usize) -> Option<K> {
        self.order.get(index).copied()
    }

    pub fn index_of(&self, id: K) -> Option<usize> {
        self.order.iter().position(|&k| k == id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.id_at(index).and_then(|id| self.items.get(id))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let id = self.id_at(index)?;
        self.items.get_mut(id)
    }

    pub fn by_id(&self, id: K) -> Option<&T> {
        self.items.get(id)
    }

    pub fn by_id_mut(&mut self, id: K) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    /// Items in display order with their index and id.
    pub fn iter(&self) -> impl Iterator<Item = (usize, K, &T)> + '_ {
        self.order
            .iter()
            .enumerate()
            .filter_map(|(index, &id)| self.items.get(id).map(|item| (index, id, item)))
    }

    /// Mutable items in arbitrary order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items.values_mut()
    }
}

impl<K: Key, T: AxisItem> AxisList<K, T> {
    /// The object at `index`.
    pub fn object(&self, index: usize) -> Option<&GridObject> {
        self.get(index).map(AxisItem::object)
    }

    /// Objects in display order.
    pub fn objects(&self) -> impl Iterator<Item = &GridObject> + '_ {
        self.iter().map(|(_, _, item)| item.object())
    }

    /// Index of the next visible, non-header object after `from`.
    pub fn next_data_index(&self, from: usize) -> Option<usize> {
        self.iter()
            .skip(from + 1)
            .find(|(_, _, item)| item.object().is_data())
            .map(|(index, _, _)| index)
    }

    /// Index of the previous visible, non-header object before `from`.
    pub fn prev_data_index(&self, from: usize) -> Option<usize> {
        self.iter()
            .take(from)
            .filter(|(_, _, item)| item.object().is_data())
            .last()
            .map(|(index, _, _)| index)
    }

    /// Index of the first visible, non-header object.
    pub fn first_data_index(&self) -> Option<usize> {
        self.iter()
            .find(|(_, _, item)| item.object().is_data())
            .map(|(index, _, _)| index)
    }

    /// Index of the last visible, non-header object.
    pub fn last_data_index(&self) -> Option<usize> {
        self.iter()
            .filter(|(_, _, item)| item.object().is_data())
            .last()
            .map(|(index, _, _)| index)
    }

    /// Number of leading visible header objects. Invisible objects are
    /// skipped; the count stops at the first visible non-header object.
    pub fn header_count(&self) -> usize {
        self.objects()
            .filter(|obj| obj.is_visible())
            .take_while(|obj| obj.is_header())
            .count()
    }

    /// Combined size of the leading visible header objects.
    pub fn leading_header_size(&self) -> i32 {
        self.objects()
            .filter(|obj| obj.is_visible())
            .take_while(|obj| obj.is_header())
            .map(GridObject::size)
            .fold(0, i32::saturating_add)
    }

    /// Combined size of every visible header object.
    pub fn header_size(&self) -> i32 {
        self.objects()
            .filter(|obj| obj.is_visible() && obj.is_header())
            .map(GridObject::size)
            .fold(0, i32::saturating_add)
    }

    /// Combined size of every visible, non-header object: the scrollable extent.
    pub fn virtual_size(&self) -> i32 {
        self.objects()
            .filter(|obj| obj.is_data())
            .map(GridObject::size)
            .fold(0, i32::saturating_add)
    }

    /// Combined size of every visible object.
    pub fn total_size(&self) -> i32 {
        self.objects()
            .filter(|obj| obj.is_visible())
            .map(GridObject::size)
            .fold(0, i32::saturating_add)
    }

    /// Offset of a data object within the scrollable extent.
    pub fn virtual_position(&self, index: usize) -> Option<i32> {
        let target = self.object(index)?;
        if !target.is_data() {
            return None;
        }
        Some(
            self.objects()
                .take(index)
                .filter(|obj| obj.is_data())
                .map(GridObject::size)
                .fold(0, i32::saturating_add),
        )
    }
}
