//! JSON output for pages and the index.
//!
//! Serializes the resolved model directly; the index carries the same
//! section layout as the markdown index.

use crate::error::{Error, Result};
use crate::model::ResolvedDocument;
use crate::render::index::{self, IndexSection};
use crate::render::Renderer;
use crate::taxonomy::Taxonomy;
use serde::Serialize;

pub struct JsonRenderer {
    tool: String,
}

impl JsonRenderer {
    pub fn new(tool: &str) -> Self {
        JsonRenderer {
            tool: tool.to_string(),
        }
    }
}

#[derive(Serialize)]
struct JsonIndex<'a> {
    tool: &'a str,
    sections: Vec<IndexSection<'a>>,
}

impl Renderer for JsonRenderer {
    fn render_page(&self, doc: &ResolvedDocument) -> Result<String> {
        to_json(doc, doc.name())
    }

    fn render_index(&self, docs: &[ResolvedDocument], taxonomy: &Taxonomy) -> Result<String> {
        let index = JsonIndex {
            tool: &self.tool,
            sections: index::build(docs, taxonomy),
        };
        to_json(&index, "index")
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        what: what.to_string(),
        source,
    })?;
    out.push('\n');
    Ok(out)
}
