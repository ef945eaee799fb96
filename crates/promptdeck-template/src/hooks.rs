//! Per-template field rules applied before rendering.
//!
//! Hooks run when a card's values change or are (re)initialized, never
//! inside [`render`](crate::render::render).

use std::collections::HashMap;
use std::fmt;

use promptdeck_common_core::TemplateId;

use crate::render::FieldValues;
use crate::template::Template;

/// A rule that adjusts field values for one template.
pub trait RenderHook: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Adjust `values` in place. Returns true if anything changed.
    fn before_render(&self, template: &Template, values: &mut FieldValues) -> bool;
}

/// Keeps the polaroid's second face in sync with the first until the user
/// edits it.
///
/// While `pol_face2` still equals the template default of `pol_face`, it
/// follows the current value of `pol_face`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolaroidFaceSync;

impl PolaroidFaceSync {
    pub const TEMPLATE_ID: &'static str = "polaroid";
    pub const PRIMARY: &'static str = "pol_face";
    pub const SECONDARY: &'static str = "pol_face2";
}

impl RenderHook for PolaroidFaceSync {
    fn name(&self) -> &'static str {
        "polaroid-face-sync"
    }

    fn before_render(&self, template: &Template, values: &mut FieldValues) -> bool {
        let primary_default = template.default_for(Self::PRIMARY);
        if values.get(Self::SECONDARY).unwrap_or("") != primary_default {
            return false;
        }

        let primary = values.get(Self::PRIMARY).unwrap_or("").to_string();
        if primary == primary_default {
            return false;
        }

        values.set(Self::SECONDARY, primary);
        true
    }
}

/// Hooks registered per template id.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<TemplateId, Vec<Box<dyn RenderHook>>>,
}

impl HookRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the rules shipped for the built-in templates.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TemplateId::new(PolaroidFaceSync::TEMPLATE_ID), PolaroidFaceSync);
        registry
    }

    pub fn register(&mut self, template: TemplateId, hook: impl RenderHook + 'static) {
        self.hooks.entry(template).or_default().push(Box::new(hook));
    }

    /// Names of the hooks registered for a template.
    pub fn names_for(&self, template: &TemplateId) -> Vec<&'static str> {
        self.hooks
            .get(template)
            .map(|hooks| hooks.iter().map(|h| h.name()).collect())
            .unwrap_or_default()
    }

    /// Run every hook registered for `template`. Returns how many changed values.
    pub fn run(&self, template: &Template, values: &mut FieldValues) -> usize {
        let Some(hooks) = self.hooks.get(&template.id) else {
            return 0;
        };

        let mut changed = 0;
        for hook in hooks {
            if hook.before_render(template, values) {
                tracing::debug!(template = %template.id, hook = hook.name(), "hook updated field values");
                changed += 1;
            }
        }
        changed
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, hooks) in &self.hooks {
            let names: Vec<_> = hooks.iter().map(|h| h.name()).collect();
            map.entry(id, &names);
        }
        map.finish()
    }
}
