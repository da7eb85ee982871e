//! Output formats.

pub mod index;
pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::model::ResolvedDocument;
use crate::taxonomy::Taxonomy;

/// Turns resolved documents into page and index blobs of one format.
pub trait Renderer {
    /// Page for a single command.
    fn render_page(&self, doc: &ResolvedDocument) -> Result<String>;
    /// Index over every generated page.
    fn render_index(&self, docs: &[ResolvedDocument], taxonomy: &Taxonomy) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name. `tool` names the documented
/// program in titles and footers.
pub fn create_renderer(format: &str, tool: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer::new(tool))),
        "json" => Ok(Box::new(json::JsonRenderer::new(tool))),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("markdown", "t").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("md", "t").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("json", "t").unwrap().file_extension(), "json");
    }

    #[test]
    fn unknown_format() {
        assert!(matches!(
            create_renderer("xml", "t"),
            Err(Error::UnknownFormat(f)) if f == "xml"
        ));
    }
}
