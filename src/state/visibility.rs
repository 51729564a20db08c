//! Visibility observation
//!
//! Effects depend on [`VisibilitySource`] rather than on the view itself;
//! the document view supplies a [`Viewport`].

/// A vertical span of document rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: u16,
    pub height: u16,
}

impl Region {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> u32 {
        u32::from(self.top) + u32::from(self.height.max(1))
    }
}

/// Reports how much of a region is currently visible
pub trait VisibilitySource {
    /// Visible fraction of `region`, from 0.0 to 1.0
    fn intersection_ratio(&self, region: Region) -> f32;
}

/// The visible window of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: u16,
    pub height: u16,
    /// Rows at the bottom edge that do not count as visible
    pub bottom_margin: u16,
}

impl Viewport {
    pub fn new(offset: u16, height: u16, bottom_margin: u16) -> Self {
        Self {
            offset,
            height,
            bottom_margin,
        }
    }
}

impl VisibilitySource for Viewport {
    fn intersection_ratio(&self, region: Region) -> f32 {
        let view_top = u32::from(self.offset);
        let view_bottom = view_top + u32::from(self.height.saturating_sub(self.bottom_margin));
        let top = u32::from(region.top);
        let bottom = region.bottom();

        let overlap = bottom.min(view_bottom).saturating_sub(top.max(view_top));
        overlap as f32 / (bottom - top) as f32
    }
}

#[derive(Debug, Clone)]
struct Observed<K> {
    key: K,
    region: Region,
    threshold: f32,
}

/// Watches regions and reports each key the first time it becomes visible
#[derive(Debug, Clone)]
pub struct OnceObserver<K> {
    observed: Vec<Observed<K>>,
    fired: Vec<K>,
}

impl<K> Default for OnceObserver<K> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            fired: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> OnceObserver<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `key`, or move its region. Keys that already fired are
    /// ignored and false is returned.
    pub fn observe(&mut self, key: K, region: Region, threshold: f32) -> bool {
        if self.fired.contains(&key) {
            return false;
        }
        match self.observed.iter_mut().find(|o| o.key == key) {
            Some(existing) => {
                existing.region = region;
                existing.threshold = threshold;
            }
            None => self.observed.push(Observed {
                key,
                region,
                threshold,
            }),
        }
        true
    }

    /// Keys that became visible since the last poll, in registration order
    pub fn poll(&mut self, source: &dyn VisibilitySource) -> Vec<K> {
        let mut newly_visible = Vec::new();
        self.observed.retain(|o| {
            let ratio = source.intersection_ratio(o.region);
            if ratio > 0.0 && ratio >= o.threshold {
                newly_visible.push(o.key.clone());
                false
            } else {
                true
            }
        });
        self.fired.extend(newly_visible.iter().cloned());
        newly_visible
    }

    pub fn has_fired(&self, key: &K) -> bool {
        self.fired.contains(key)
    }

    pub fn watching(&self) -> usize {
        self.observed.len()
    }
}
