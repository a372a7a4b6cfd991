//! Level catalog
//!
//! Ordered level descriptors with per-level lock flags. Developer mode is a
//! read-time override: it reports every level unlocked without touching the
//! stored flags.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::authored;
use crate::sim::generate::fitted_length;
use crate::sim::rect::Rect;

/// Explicit enemy placement for a procedural level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Home (left bound) of the patrol
    pub x: f32,
    /// Surface the enemy walks on
    pub ground_y: f32,
    pub range: f32,
    pub speed: f32,
}

/// Everything needed to build one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// 1-based level number
    pub number: u32,
    pub locked: bool,
    /// Total horizontal length
    pub length: f32,
    /// Procedural platforms to place (ignored by hand-authored levels)
    pub platform_count: u32,
    /// Difficulty scalar; 1.0 is the baseline
    pub difficulty: f32,
    #[serde(default)]
    pub traps: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
}

impl LevelDescriptor {
    pub fn procedural(number: u32, length: f32, platform_count: u32, difficulty: f32) -> Self {
        Self {
            number,
            locked: number > 1,
            length,
            platform_count,
            difficulty,
            traps: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Whether this level uses a literal layout instead of procedural generation
    pub fn is_authored(&self) -> bool {
        authored::is_authored(self.number)
    }
}

/// The built-in level set
///
/// Procedural lengths come from `fitted_length`, so every configured platform
/// is placed.
pub fn default_levels() -> Vec<LevelDescriptor> {
    let procedural = |number, count, difficulty| {
        LevelDescriptor::procedural(number, fitted_length(count, difficulty), count, difficulty)
    };

    // Level 3 guards its start platform with a patrol and a spike strip
    let mut third = procedural(3, 18, 1.6);
    third.traps = vec![Rect::new(330.0, 485.0, 40.0, 15.0)];
    third.enemies = vec![EnemySpawn {
        x: 150.0,
        ground_y: 500.0,
        range: 100.0,
        speed: 1.5,
    }];

    vec![
        procedural(1, 12, 1.0),
        procedural(2, 15, 1.3),
        third,
        LevelDescriptor::procedural(authored::TRAP_ALLEY, 5100.0, 0, 1.0),
        LevelDescriptor::procedural(authored::MOVING_PARTS, 5940.0, 0, 1.0),
    ]
}

/// Sequential level list with unlock state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
    current: usize,
    developer_mode: bool,
}

impl LevelCatalog {
    pub fn new(mut levels: Vec<LevelDescriptor>, settings: &Settings) -> Self {
        levels.sort_by_key(|l| l.number);
        if let Some(first) = levels.first_mut() {
            first.locked = false;
        }
        Self {
            levels,
            current: 0,
            developer_mode: settings.developer_mode,
        }
    }

    /// Catalog of the built-in levels
    pub fn with_defaults(settings: &Settings) -> Self {
        Self::new(default_levels(), settings)
    }

    /// Parse a JSON array of descriptors
    pub fn try_from_json(json: &str, settings: &Settings) -> Result<Self, serde_json::Error> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(levels, settings))
    }

    /// Parse a JSON array of descriptors, falling back to the built-in levels
    pub fn from_json(json: &str, settings: &Settings) -> Self {
        match Self::try_from_json(json, settings) {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => {
                log::warn!("Level list is empty, using built-in levels");
                Self::with_defaults(settings)
            }
            Err(e) => {
                log::warn!("Invalid level list ({}), using built-in levels", e);
                Self::with_defaults(settings)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }

    pub fn get(&self, number: u32) -> Option<&LevelDescriptor> {
        self.index_of(number).map(|i| &self.levels[i])
    }

    fn index_of(&self, number: u32) -> Option<usize> {
        self.levels.iter().position(|l| l.number == number)
    }

    pub fn current(&self) -> Option<&LevelDescriptor> {
        self.levels.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_number(&self) -> u32 {
        self.current().map(|l| l.number).unwrap_or(1)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.levels.len()
    }

    pub fn developer_mode(&self) -> bool {
        self.developer_mode
    }

    pub fn set_developer_mode(&mut self, enabled: bool) {
        self.developer_mode = enabled;
    }

    /// Whether level `number` may be played; unknown numbers are locked
    pub fn is_level_unlocked(&self, number: u32) -> bool {
        match self.get(number) {
            Some(level) => self.developer_mode || !level.locked,
            None => false,
        }
    }

    /// Stored lock flag, ignoring developer mode
    pub fn is_stored_unlocked(&self, number: u32) -> bool {
        self.get(number).is_some_and(|l| !l.locked)
    }

    /// Unlock the level after the current one; returns its number if it changed
    pub fn unlock_next(&mut self) -> Option<u32> {
        self.unlock_after(self.current_number())
    }

    /// Unlock the level following `number`; returns its number if it changed
    pub fn unlock_after(&mut self, number: u32) -> Option<u32> {
        let index = self.index_of(number)?;
        let next = self.levels.get_mut(index + 1)?;
        if !next.locked {
            return None;
        }
        next.locked = false;
        log::info!("Level {} unlocked", next.number);
        Some(next.number)
    }

    /// Descriptor of the level following `number`
    pub fn next_after(&self, number: u32) -> Option<&LevelDescriptor> {
        self.index_of(number).and_then(|i| self.levels.get(i + 1))
    }

    /// Select level `number` if it is playable; otherwise keep the current selection
    pub fn select_level(&mut self, number: u32) -> bool {
        let Some(index) = self.index_of(number) else {
            log::debug!("Ignoring selection of unknown level {}", number);
            return false;
        };
        if !self.is_level_unlocked(number) {
            log::debug!("Ignoring selection of locked level {}", number);
            return false;
        }
        self.current = index;
        true
    }

    /// Point the selection at level `number` without checking its lock
    pub fn focus(&mut self, number: u32) -> bool {
        match self.index_of(number) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Move the selection to the next level
    pub fn advance(&mut self) -> Option<&LevelDescriptor> {
        if !self.has_next() {
            return None;
        }
        self.current += 1;
        self.levels.get(self.current)
    }

    /// Fraction of levels unlocked (1.0 in developer mode)
    pub fn total_progress(&self) -> f32 {
        if self.developer_mode || self.levels.is_empty() {
            return 1.0;
        }
        let unlocked = self.levels.iter().filter(|l| !l.locked).count();
        unlocked as f32 / self.levels.len() as f32
    }
}
