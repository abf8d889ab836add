use std::ops::Deref;
use std::sync::Arc;

/// A read-only array shared by every copy of the propagator that holds it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SharedArray<T> {
    values: Arc<[T]>,
}

impl<T> SharedArray<T> {
    /// Whether this is the only handle left, in which case dropping it frees the values.
    pub fn is_sole_holder(&self) -> bool {
        Arc::strong_count(&self.values) == 1
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.values)
    }
}

impl<T> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        SharedArray {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T> Deref for SharedArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> From<Vec<T>> for SharedArray<T> {
    fn from(values: Vec<T>) -> Self {
        SharedArray {
            values: values.into(),
        }
    }
}

impl<T: Clone> From<&[T]> for SharedArray<T> {
    fn from(values: &[T]) -> Self {
        SharedArray {
            values: values.into(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SharedArray<T> {
    fn from(values: [T; N]) -> Self {
        SharedArray {
            values: Arc::new(values),
        }
    }
}

impl<T> FromIterator<T> for SharedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SharedArray {
            values: iter.into_iter().collect(),
        }
    }
}
