//! Configuration for SVG rendering

/// Options for [`render_svg`](super::render_svg)
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Prefix the document with `<?xml version="1.0"?>`
    pub xml_declaration: bool,

    /// One element per line, indented
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "sl-" for "sl-view")
    pub class_prefix: Option<String>,

    /// Whether spacers and layout stacks get outlines of their own
    pub show_transparent: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            pretty_print: true,
            class_prefix: Some("sl-".to_string()),
            show_transparent: true,
        }
    }
}

impl SvgConfig {
    /// Defaults: prologue, indentation, `sl-` classes, transparent views drawn
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit or omit the `<?xml ...?>` prologue
    pub fn with_xml_declaration(mut self, include: bool) -> Self {
        self.xml_declaration = include;
        self
    }

    /// Toggle indented output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Use `prefix` in front of every class and element id
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set whether transparent views are drawn
    pub fn with_show_transparent(mut self, show: bool) -> Self {
        self.show_transparent = show;
        self
    }
}
