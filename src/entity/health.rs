use serde::{Deserialize, Serialize};

/// Health in whole points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub const DEFAULT_MAX: u32 = 20;

    /// Create a new health component at full health
    pub fn new(max: u32) -> Self {
        Health { current: max, max }
    }

    /// Deal damage
    /// Returns true if the entity died (health == 0)
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current = self.current.saturating_sub(amount);
        self.is_dead()
    }

    /// Heal, capped at max
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Get health as a percentage (0.0 - 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
        }
    }

    /// Set current health (clamped to 0..=max)
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Back to full
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX)
    }
}

/// Hunger in whole points; drained by the survival system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunger {
    pub current: u32,
    pub max: u32,
}

impl Hunger {
    pub const DEFAULT_MAX: u32 = 20;

    pub fn new(max: u32) -> Self {
        Hunger { current: max, max }
    }

    /// Consume hunger points, floored at zero
    pub fn drain(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Eat food to restore hunger
    pub fn eat(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_starving(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Get hunger as a percentage (0.0 - 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
        }
    }

    /// Set current hunger (clamped to 0..=max)
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

impl Default for Hunger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX)
    }
}
