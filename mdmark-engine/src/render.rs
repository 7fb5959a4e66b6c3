//! Markdown rendering
//!
//! Rendering is a collaborator, not part of the annotation core: anything that
//! turns markdown into HTML can stand behind [`Renderer`]. The default uses
//! Comrak with raw HTML passthrough, which is what lets inline `<mark>`
//! elements from the content string reach the live view with their ids.

use comrak::{markdown_to_html, ComrakOptions};

/// Pure markdown → HTML function
pub trait Renderer {
    fn render(&self, markdown: &str) -> String;
}

/// GFM extensions enabled for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

/// [`Renderer`] backed by Comrak
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer {
    options: RenderOptions,
}

impl ComrakRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn comrak_options(&self) -> ComrakOptions<'static> {
        let mut options = ComrakOptions::default();
        options.extension.table = self.options.tables;
        options.extension.strikethrough = self.options.strikethrough;
        options.extension.autolink = self.options.autolink;
        options.extension.tasklist = self.options.tasklist;
        options.render.unsafe_ = true;
        options
    }
}

impl Renderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &self.comrak_options())
    }
}
