//! Command implementations.

mod deck;
mod list;
mod parse;
mod render;
mod show;

pub use deck::DeckCommand;
pub use list::ListCommand;
pub use parse::ParseCommand;
pub use render::RenderCommand;
pub use show::ShowCommand;

use promptdeck_template::{Template, TemplateStore};

use crate::error::CliError;

/// Find a template by id or index, suggesting close ids when nothing matches.
pub(crate) fn resolve_template<'a>(
    store: &'a TemplateStore,
    selector: &str,
) -> Result<(usize, &'a Template), CliError> {
    store.resolve(selector).map_err(|_| {
        let needle = selector.to_lowercase();
        let suggestions = store
            .iter()
            .map(|t| t.id.to_string())
            .filter(|id| id.contains(&needle) || needle.contains(id.as_str()) || shares_prefix(id, &needle))
            .collect();
        CliError::not_found_with_suggestions("template", selector, suggestions)
    })
}

fn shares_prefix(a: &str, b: &str) -> bool {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count() >= 3
}
