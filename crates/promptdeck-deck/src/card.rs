//! Editing state for the active template.

use std::time::{Duration, Instant};

use promptdeck_common_core::Result;
use promptdeck_template::{render, FieldValues, HookRegistry, RenderedPrompt, Template};

/// Marker characters removed from user-entered values.
const MARKERS: [char; 2] = ['(', ')'];

/// Field values and view state for one template.
#[derive(Debug, Clone)]
pub struct Card {
    template: Template,
    values: FieldValues,
    active: bool,
    flipped: bool,
    copied_until: Option<Instant>,
    copied_indicator: Duration,
}

impl Card {
    /// New inactive card seeded with the template's defaults, hooks applied.
    pub fn new(template: Template, hooks: &HookRegistry) -> Self {
        let mut card = Self {
            values: FieldValues::from_defaults(&template),
            template,
            active: false,
            flipped: false,
            copied_until: None,
            copied_indicator: Duration::from_millis(2000),
        };
        hooks.run(&card.template, &mut card.values);
        card
    }

    /// How long [`mark_copied`](Self::mark_copied) lights the indicator.
    pub fn with_copied_indicator(mut self, duration: Duration) -> Self {
        self.copied_indicator = duration;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }

    /// Update one field, dropping marker characters from the value.
    ///
    /// Keys the template does not use are rejected.
    pub fn set_field(&mut self, key: &str, value: &str, hooks: &HookRegistry) -> bool {
        if !self.template.defaults.contains_key(key) {
            tracing::debug!(template = %self.template.id, key, "ignored unknown field");
            return false;
        }

        let cleaned: String = value.chars().filter(|c| !MARKERS.contains(c)).collect();
        self.values.set(key, cleaned);
        hooks.run(&self.template, &mut self.values);
        true
    }

    /// Restore every field to its default.
    pub fn reset(&mut self, hooks: &HookRegistry) {
        self.values = FieldValues::from_defaults(&self.template);
        hooks.run(&self.template, &mut self.values);
    }

    pub fn render(&self) -> Result<RenderedPrompt> {
        render(&self.template, &self.values)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the card as the deck's current card or not.
    ///
    /// Any change of the flag restores the defaults. Inactive cards close.
    pub fn set_active(&mut self, active: bool, hooks: &HookRegistry) {
        if self.active != active {
            self.active = active;
            self.reset(hooks);
        }
        if !active {
            self.flipped = false;
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Flip to the editing side. Only the active card opens.
    pub fn open(&mut self) -> bool {
        if self.active {
            self.flipped = true;
        }
        self.flipped
    }

    pub fn close(&mut self) {
        self.flipped = false;
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_until = Some(now + self.copied_indicator);
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }
}
