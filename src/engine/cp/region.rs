use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

/// Scratch memory for a single propagator invocation.
///
/// Allocations are released in bulk when the engine resets the region after the propagator
/// returns, so nothing allocated here may outlive the invocation. Copying a space does not copy
/// its region.
#[derive(Debug, Default)]
pub struct Region {
    arena: Bump,
}

impl Region {
    /// An empty growable vector living in the region.
    pub fn vec<T>(&self) -> BumpVec<'_, T> {
        BumpVec::new_in(&self.arena)
    }

    pub fn vec_with_capacity<T>(&self, capacity: usize) -> BumpVec<'_, T> {
        BumpVec::with_capacity_in(capacity, &self.arena)
    }

    /// A slice of `len` copies of `value`.
    pub fn alloc_slice<T: Copy>(&self, len: usize, value: T) -> &mut [T] {
        self.arena.alloc_slice_fill_copy(len, value)
    }

    pub(crate) fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }

    pub(crate) fn reset(&mut self) {
        self.arena.reset();
    }
}

impl Clone for Region {
    fn clone(&self) -> Self {
        Region::default()
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn scratch_vectors_are_usable_until_reset() {
        let mut region = Region::default();

        {
            let mut values = region.vec();
            values.extend([3, 1, 2]);
            values.sort_unstable();
            assert_eq!(values.as_slice(), &[1, 2, 3]);

            let flags = region.alloc_slice(4, false);
            flags[2] = true;
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        }

        assert!(region.allocated_bytes() > 0);
        region.reset();
    }
}
