use slotmap::{SlotMap, DenseSlotMap, Key};
use super::Storage;

// Both slotmap flavours share their whole API surface, only the iteration and removal
// performance characteristics differ.
macro_rules! impl_storage_for_slotmap {
    ($($map:ident),+ $(,)?) => {$(
        impl<K, V> Storage for $map<K, V>
        where
            K: Key,
        {
            type Key = K;
            type Element = V;

            #[inline(always)]
            fn add(&mut self, element: Self::Element) -> Self::Key {
                self.insert(element)
            }
            #[inline(always)]
            fn remove(&mut self, key: &Self::Key) -> Option<Self::Element> {
                $map::remove(self, *key)
            }
            #[inline(always)]
            fn len(&self) -> usize {
                $map::len(self)
            }
            #[inline(always)]
            fn with_capacity(capacity: usize) -> Self {
                Self::with_capacity_and_key(capacity)
            }
            #[inline(always)]
            fn contains_key(&self, key: &Self::Key) -> bool {
                $map::contains_key(self, *key)
            }
            #[inline(always)]
            fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
                $map::get(self, *key)
            }
            #[inline(always)]
            fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
                $map::get_mut(self, *key)
            }
            #[inline(always)]
            fn new() -> Self {
                Self::with_key()
            }
            #[inline(always)]
            fn capacity(&self) -> usize {
                $map::capacity(self)
            }
            #[inline(always)]
            fn reserve(&mut self, additional: usize) {
                $map::reserve(self, additional)
            }
        }
    )+};
}

impl_storage_for_slotmap!(SlotMap, DenseSlotMap);
