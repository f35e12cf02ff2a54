//! Bounded memo of measured string widths.

use std::collections::{BTreeMap, HashMap};

/// `size` is stored by bit pattern so the key can be hashed.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct WidthKey {
    pub text: String,
    pub font: String,
    pub size_bits: u32,
}

impl WidthKey {
    pub fn new(text: &str, font: &str, size: f32) -> Self {
        Self {
            text: text.to_string(),
            font: font.to_string(),
            size_bits: size.to_bits(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Least-recently-used cache of widths.
///
/// Every lookup stamps its entry with a fresh tick; `order` maps ticks back to
/// keys, so its first entry is always the eviction candidate.
#[derive(Debug)]
pub struct WidthCache {
    capacity: usize,
    entries: HashMap<WidthKey, (f32, u64)>,
    order: BTreeMap<u64, WidthKey>,
    tick: u64,
    stats: CacheStats,
}

impl WidthCache {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: BTreeMap::new(),
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Returns the cached width, or measures it with `measure` and stores it.
    /// A failed measurement is not cached.
    pub fn get_or_measure<E>(
        &mut self,
        text: &str,
        font: &str,
        size: f32,
        measure: impl FnOnce() -> Result<f32, E>,
    ) -> Result<f32, E> {
        let key = WidthKey::new(text, font, size);
        if let Some(width) = self.touch(&key) {
            self.stats.hits += 1;
            return Ok(width);
        }
        self.stats.misses += 1;
        let width = measure()?;
        self.insert(key, width);
        Ok(width)
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn touch(&mut self, key: &WidthKey) -> Option<f32> {
        let tick = self.next_tick();
        let (width, stamp) = self.entries.get_mut(key)?;
        let previous = std::mem::replace(stamp, tick);
        let width = *width;
        if let Some(k) = self.order.remove(&previous) {
            self.order.insert(tick, k);
        }
        Some(width)
    }

    fn insert(&mut self, key: WidthKey, width: f32) {
        while self.entries.len() >= self.capacity {
            let Some((_, oldest)) = self.order.pop_first() else { break };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
        let tick = self.next_tick();
        self.order.insert(tick, key.clone());
        self.entries.insert(key, (width, tick));
    }
}
