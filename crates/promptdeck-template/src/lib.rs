//! Prompt templates with bracketed placeholders.
//!
//! Raw text such as `A photo of (subject) at (place)` is split by
//! [`parse`] into literal segments and named placeholders. [`render`]
//! substitutes field values back in, producing plain text or a JSON
//! document with a fixed negative prompt.
//!
//! Nested markers like `(a(b)c)` are not supported; see [`parser`].

pub mod builtin;
pub mod draft;
pub mod hooks;
pub mod loader;
pub mod parser;
pub mod render;
pub mod store;
pub mod template;

pub use draft::{NewTemplate, TemplateDraft};
pub use hooks::{HookRegistry, PolaroidFaceSync, RenderHook};
pub use loader::{TemplateDefinition, TemplateLoadError, TemplateLoader};
pub use parser::{lint, parse, reconcile_defaults, MarkerWarning, ParsedTemplate};
pub use render::{render, FieldValues, RenderedPrompt, NEGATIVE_PROMPT};
pub use store::TemplateStore;
pub use template::{Format, Segment, Template};
