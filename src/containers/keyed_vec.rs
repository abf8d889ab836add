use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which can only be indexed by a typed key, such as a
/// [`DomainId`](crate::variables::DomainId) or a [`PropagatorId`](crate::propagation::PropagatorId).
///
/// Keys are handed out in push order, so the key of an element never changes when the
/// surrounding space is copied.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an element and return the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::create_from_index(self.elements.len());
        self.elements.push(value);
        key
    }

    /// The key the next pushed element will receive.
    pub fn next_key(&self) -> Key {
        Key::create_from_index(self.elements.len())
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut Value> {
        self.elements.get_mut(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub fn iter_with_keys(&self) -> impl Iterator<Item = (Key, &'_ Value)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, value)| (Key::create_from_index(index), value))
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grow the vector so that `key` is a valid index, filling new slots with `value`.
    pub fn accommodate(&mut self, key: Key, value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, value)
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

/// Types which can be turned into, and created from, a position in a [`KeyedVec`].
pub trait StorageKey: Copy {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::KeyedVec;

    #[test]
    fn push_hands_out_consecutive_keys() {
        let mut values: KeyedVec<usize, &str> = KeyedVec::default();

        assert_eq!(values.next_key(), 0);
        let first = values.push("first");
        let second = values.push("second");

        assert_eq!((first, second), (0, 1));
        assert_eq!(values[second], "second");
        assert_eq!(values.get(2), None);
    }

    #[test]
    fn accommodate_only_grows() {
        let mut values: KeyedVec<usize, u32> = KeyedVec::default();
        values.accommodate(3, 7);
        assert_eq!(values.len(), 4);

        values[1] = 1;
        values.accommodate(1, 0);
        assert_eq!(values.len(), 4);
        assert_eq!(values[1], 1);
    }
}
