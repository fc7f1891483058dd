//! Sharded map used to accumulate relevance from several worker threads.
//!
//! The key space is split into a fixed number of shards by `key mod shards`.
//! Each shard is an independent `HashMap` behind its own lock, so writers only
//! contend when their keys land in the same shard. No operation ever holds
//! two shard locks at once.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

/// Integer keys that can be routed to a shard.
pub trait ShardKey: Copy + Eq + Hash {
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_index(&self, shard_count: usize) -> usize {
                    (*self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<HashMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Create a map with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<HashMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Lock the owning shard and return a guard to the value, inserting the
    /// default first if the key is absent. The shard stays locked while the
    /// guard lives.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard(&key).lock(), |map| map.entry(key).or_default())
    }

    /// Read-modify-write under the owning shard's lock.
    pub fn update<F>(&self, key: K, f: F)
    where
        V: Default,
        F: FnOnce(&mut V),
    {
        f(&mut *self.access(key));
    }

    pub fn accumulate(&self, key: K, delta: V)
    where
        V: Default + AddAssign,
    {
        *self.access(key) += delta;
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Drain every shard, one lock at a time, into an ordinary map.
    pub fn snapshot(&self) -> HashMap<K, V> {
        let mut merged = HashMap::new();
        for shard in &self.shards {
            let drained = std::mem::take(&mut *shard.lock());
            merged.extend(drained);
        }
        merged
    }

    pub fn into_map(self) -> HashMap<K, V> {
        let mut merged = HashMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn negative_keys_route_to_valid_shards() {
        assert_eq!((-1i32).shard_index(4), 3);
        assert_eq!(7u64.shard_index(4), 3);
        assert_eq!(0i64.shard_index(1), 0);
    }

    #[test]
    fn zero_shards_is_clamped() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(0);
        assert_eq!(map.shard_count(), 1);
        map.accumulate(5, 1.0);
        assert_eq!(map.snapshot().get(&5), Some(&1.0));
    }

    #[test]
    fn accumulate_and_erase_touch_single_keys() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(3);
        map.accumulate(1, 0.5);
        map.accumulate(1, 0.25);
        map.accumulate(4, 1.0);
        map.update(2, |v| *v = 9.0);
        assert_eq!(map.erase(&4), Some(1.0));
        assert_eq!(map.erase(&4), None);

        let snapshot = map.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[&1], 0.75);
        assert_eq!(snapshot[&2], 9.0);
        assert!(map.snapshot().is_empty());
    }

    #[test]
    fn concurrent_accumulation_matches_sequential_sum() {
        let map: ConcurrentMap<u32, u64> = ConcurrentMap::new(16);
        (0..10_000u32).into_par_iter().for_each(|i| {
            map.accumulate(i % 100, 1);
        });
        let totals = map.into_map();
        assert_eq!(totals.len(), 100);
        assert!(totals.values().all(|&count| count == 100));
    }
}
