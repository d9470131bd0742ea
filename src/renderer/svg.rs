//! SVG generation from a laid-out view tree

use std::collections::BTreeMap;

use crate::stylesheet::Stylesheet;
use crate::toolkit::{Rect, ToolkitError, ViewId, ViewKind, ViewTree};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet, plus the rules that use them
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut colors: BTreeMap<String, String> = Stylesheet::default().colors;
        colors.extend(stylesheet.colors.clone());

        let mut css = String::from(":root {\n");
        for (token, value) in &colors {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }");
        self.styles.push(css);

        let p = self.prefix();
        self.styles.extend([
            format!(".{p}view {{ fill: var(--view); stroke: var(--outline); stroke-width: 1; }}"),
            format!(".{p}window {{ fill: var(--window); }}"),
            format!(".{p}stack {{ fill: none; stroke: var(--stack); stroke-dasharray: 4 2; }}"),
            format!(".{p}transparent {{ fill: none; stroke: var(--spacer); stroke-dasharray: 2 2; }}"),
            format!(".{p}text {{ fill: var(--text); font-family: sans-serif; }}"),
        ]);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle for one view
    pub fn add_rect(&mut self, id: &str, frame: Rect, classes: &[String]) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}view", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<rect id="{}" class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            id,
            class_list,
            num(frame.x),
            num(frame.y),
            num(frame.width),
            num(frame.height),
        ));
    }

    /// Add a view's text, anchored at the top-left corner of its frame.
    /// Each line of the text becomes its own `tspan`.
    pub fn add_text(&mut self, text: &str, frame: Rect) {
        let prefix = self.prefix();
        let x = num(frame.x);
        let spans = text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                let dy = if i == 0 { "0" } else { "1.2em" };
                format!(r#"<tspan x="{}" dy="{}">{}</tspan>"#, x, dy, escape_xml(line))
            })
            .collect::<String>();

        self.elements.push(format!(
            r#"{}<text class="{}text" x="{}" y="{}" dominant-baseline="hanging">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            num(frame.y),
            spans
        ));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.xml_declaration {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(width),
            h = num(height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("  ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render `root`'s subtree to an SVG string.
///
/// Views are emitted in pre-order (parents beneath their subviews) with
/// coordinates relative to `root`.
pub fn render_svg(
    tree: &ViewTree,
    root: ViewId,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> Result<String, ToolkitError> {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let root_frame = tree.absolute_frame(root)?;
    render_view(tree, root, root, root_frame, &mut builder)?;

    tracing::debug!(%root, elements = builder.elements.len(), "rendered svg");
    Ok(builder.build(root_frame.width, root_frame.height))
}

fn render_view(
    tree: &ViewTree,
    id: ViewId,
    root: ViewId,
    root_frame: Rect,
    builder: &mut SvgBuilder,
) -> Result<(), ToolkitError> {
    let absolute = tree.absolute_frame(id)?;
    let frame = Rect::new(
        absolute.x - root_frame.x,
        absolute.y - root_frame.y,
        absolute.width,
        absolute.height,
    );

    let prefix = builder.prefix();
    let transparent = tree.has_hit_test_hook(id)?;
    let mut classes = Vec::new();
    if id == root {
        classes.push(format!("{}window", prefix));
    }
    if let ViewKind::Stack(_) = tree.kind(id)? {
        classes.push(format!("{}stack", prefix));
    }
    if transparent {
        classes.push(format!("{}transparent", prefix));
    }

    if !transparent || builder.config.show_transparent {
        builder.add_rect(&format!("{}v{}", prefix, id.index()), frame, &classes);
    }
    if let Some(text) = tree.text(id)? {
        builder.add_text(&text, frame);
    }

    for child in tree.subviews(id)? {
        render_view(tree, child, root, root_frame, builder)?;
    }
    Ok(())
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
