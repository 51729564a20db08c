//! Visibility-triggered effects
//!
//! Sections fade in, stat counters count up, skill bars fill and the
//! portrait loads, each the first time its rows come into view.

use super::document::{DocumentLayout, RowKind, PORTRAIT_ROWS};
use super::resume::{builtin_asset, Resume, SectionBody};
use super::visibility::{OnceObserver, Region, VisibilitySource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Fraction of a section that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Counts from zero to a target in fixed increments
#[derive(Debug, Clone, PartialEq)]
pub struct NumberCounter {
    pub target: u64,
    started_at: Option<Instant>,
}

impl NumberCounter {
    pub const STEPS: u32 = 50;
    pub const STEP_INTERVAL: Duration = Duration::from_millis(40);

    pub fn new(target: u64) -> Self {
        Self {
            target,
            started_at: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at.get_or_insert(now);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Value to display at `now`
    pub fn value(&self, now: Instant) -> u64 {
        let Some(started) = self.started_at else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(started);
        let steps = (elapsed.as_millis() / Self::STEP_INTERVAL.as_millis()) as u32;
        if steps >= Self::STEPS {
            return self.target;
        }
        let increment = self.target as f64 / f64::from(Self::STEPS);
        let current = (increment * f64::from(steps)).min(self.target as f64);
        current.floor() as u64
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.started_at.is_some() && self.value(now) == self.target
    }
}

/// Fills to a percentage with an eased transition
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub target: u8,
    started_at: Option<Instant>,
}

impl ProgressBar {
    pub const FILL_DURATION: Duration = Duration::from_millis(600);

    pub fn new(target: u8) -> Self {
        Self {
            target: target.min(100),
            started_at: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at.get_or_insert(now);
    }

    /// Current fill in percent
    pub fn width(&self, now: Instant) -> f32 {
        let Some(started) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started);
        let progress =
            (elapsed.as_secs_f32() / Self::FILL_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        simple_easing::cubic_out(progress) * f32::from(self.target)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|s| now.saturating_duration_since(s) < Self::FILL_DURATION)
    }
}

/// Where a lazy image's text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    File(PathBuf),
    Embedded(&'static str),
}

impl ImageSource {
    /// Relative paths naming a built-in asset use the copy in the binary
    pub fn resolve(path: &Path) -> Self {
        match builtin_asset(path) {
            Some(content) => Self::Embedded(content),
            None => Self::File(path.to_path_buf()),
        }
    }
}

/// An image whose source is only read once it is first shown
#[derive(Debug, Clone, PartialEq)]
pub enum LazyImage {
    Pending(ImageSource),
    Loaded(Vec<String>),
    Failed,
}

impl LazyImage {
    pub fn new(source: ImageSource) -> Self {
        Self::Pending(source)
    }

    /// Read the pending source. Does nothing once loaded or failed.
    pub fn load(&mut self) {
        let Self::Pending(source) = self else {
            return;
        };
        let loaded = match source {
            ImageSource::Embedded(content) => Self::from_text(*content),
            ImageSource::File(path) => match fs::read_to_string(path.as_path()) {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), "portrait loaded");
                    Self::from_text(&content)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load portrait");
                    Self::Failed
                }
            },
        };
        *self = loaded;
    }

    fn from_text(content: &str) -> Self {
        Self::Loaded(
            content
                .lines()
                .take(usize::from(PORTRAIT_ROWS))
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        match self {
            Self::Loaded(lines) => lines.get(index).map(String::as_str),
            _ => None,
        }
    }
}

/// Vertical banner offset for a scroll position
pub fn parallax_offset(scrolled: u16, speed: f32) -> u16 {
    let offset = (f32::from(scrolled) * speed.max(0.0)).floor();
    offset.min(f32::from(u16::MAX)) as u16
}

/// What a visibility observation triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    Reveal(usize),
    Counters(usize),
    SkillBar(usize, usize),
    Portrait(usize),
}

/// State of every visibility-triggered effect in the document
#[derive(Debug, Default)]
pub struct Effects {
    observer: OnceObserver<EffectTarget>,
    counters: HashMap<(usize, usize), NumberCounter>,
    bars: HashMap<(usize, usize), ProgressBar>,
    portraits: HashMap<usize, LazyImage>,
}

impl Effects {
    pub fn new(resume: &Resume) -> Self {
        let mut effects = Self::default();
        for (section, s) in resume.sections.iter().enumerate() {
            match &s.body {
                SectionBody::Stats { stats } => {
                    for (i, stat) in stats.iter().enumerate() {
                        effects
                            .counters
                            .insert((section, i), NumberCounter::new(stat.value));
                    }
                }
                SectionBody::Skills { skills } => {
                    for (i, skill) in skills.iter().enumerate() {
                        effects
                            .bars
                            .insert((section, i), ProgressBar::new(skill.level));
                    }
                }
                SectionBody::About {
                    portrait: Some(path),
                    ..
                } => {
                    effects
                        .portraits
                        .insert(section, LazyImage::new(ImageSource::resolve(path)));
                }
                _ => {}
            }
        }
        effects
    }

    /// Point every observer at the regions of a freshly built layout
    pub fn register(&mut self, layout: &DocumentLayout) {
        for (section, region) in layout.regions.iter().enumerate() {
            self.observer
                .observe(EffectTarget::Reveal(section), region.region(), REVEAL_THRESHOLD);
        }
        for (row, doc_row) in layout.indexed_rows() {
            let target = match doc_row.kind {
                RowKind::Stats => EffectTarget::Counters(doc_row.section),
                RowKind::Skill { skill } => EffectTarget::SkillBar(doc_row.section, skill),
                RowKind::Portrait { line: 0 } => EffectTarget::Portrait(doc_row.section),
                _ => continue,
            };
            let height = match target {
                EffectTarget::Portrait(_) => PORTRAIT_ROWS,
                _ => 1,
            };
            self.observer.observe(target, Region::new(row, height), 0.0);
        }
    }

    /// Trigger effects for everything that became visible
    pub fn poll(&mut self, source: &dyn VisibilitySource, now: Instant) -> Vec<EffectTarget> {
        let fired = self.observer.poll(source);
        for target in &fired {
            match *target {
                // Reveals are read back from the observer
                EffectTarget::Reveal(_) => {}
                EffectTarget::Counters(section) => {
                    for ((s, _), counter) in self.counters.iter_mut() {
                        if *s == section {
                            counter.start(now);
                        }
                    }
                }
                EffectTarget::SkillBar(section, skill) => {
                    if let Some(bar) = self.bars.get_mut(&(section, skill)) {
                        bar.start(now);
                    }
                }
                EffectTarget::Portrait(section) => {
                    if let Some(image) = self.portraits.get_mut(&section) {
                        image.load();
                    }
                }
            }
        }
        if !fired.is_empty() {
            tracing::debug!(
                count = fired.len(),
                remaining = self.observer.watching(),
                "visibility effects triggered"
            );
        }
        fired
    }

    pub fn is_revealed(&self, section: usize) -> bool {
        self.observer.has_fired(&EffectTarget::Reveal(section))
    }

    pub fn counter_value(&self, section: usize, stat: usize, now: Instant) -> u64 {
        self.counters
            .get(&(section, stat))
            .map(|c| c.value(now))
            .unwrap_or(0)
    }

    pub fn bar_width(&self, section: usize, skill: usize, now: Instant) -> f32 {
        self.bars
            .get(&(section, skill))
            .map(|b| b.width(now))
            .unwrap_or(0.0)
    }

    pub fn portrait(&self, section: usize) -> Option<&LazyImage> {
        self.portraits.get(&section)
    }

    /// Whether any counter or bar is still moving
    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters
            .values()
            .any(|c| c.is_started() && !c.is_finished(now))
            || self.bars.values().any(|b| b.is_animating(now))
    }
}
