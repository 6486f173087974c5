//! Highlight a term in a piece of text

use anyhow::Result;
use typeahead_core::{highlight_with_class, strip_markup};

use crate::system_config;

/// Print `text` as safe markup with every match of `term` highlighted
pub async fn run(text: &str, term: &str, class: Option<String>) -> Result<()> {
    let class = match class {
        Some(class) => class,
        None => system_config::load()?.render.highlight_class,
    };

    println!("{}", highlight_with_class(&strip_markup(text), term, &class));
    Ok(())
}
