//! The demo screen: a heading, a subheading, two text columns and a button
//! that cycles the column texts.
//!
//! Text is measured with a fixed per-character estimate and wrapped greedily
//! on word boundaries, so the same input always lays out the same way.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{Alignment, Edge, Edges, InstallOptions, LayoutBuilder, LayoutError};
use crate::renderer::{render_svg, SvgConfig};
use crate::stylesheet::Stylesheet;
use crate::toolkit::{Axis, Point, Size, ToolkitError, ViewId, ViewSpec, ViewTree};

const BODY_1: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";
const BODY_2: &str = "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum";
const BODY_3: &str = "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";
const BODY_4: &str = "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo. Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem sequi nesciunt. Neque porro quisquam est, qui dolorem ipsum quia dolor sit amet.";

/// Approximate glyph width as a fraction of the font size
const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Errors from building or driving the demo
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read demo config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse demo config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    #[error("unknown demo state '{0}' (expected 1-4 or one, two, three, four)")]
    UnknownState(String),
}

/// Sizes and spacings of the demo screen
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: f64,
    pub height: f64,
    /// Horizontal inset of the whole screen
    pub margin: f64,
    /// Space above the heading
    pub top_spacing: f64,
    /// Space between the heading block, the columns and the button
    pub section_spacing: f64,
    pub heading_font_size: f64,
    pub subheading_font_size: f64,
    pub body_font_size: f64,
    pub button_font_size: f64,
    /// Padding around the button title
    pub button_padding: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 375.0,
            height: 812.0,
            margin: 16.0,
            top_spacing: 64.0,
            section_spacing: 24.0,
            heading_font_size: 28.0,
            subheading_font_size: 20.0,
            body_font_size: 17.0,
            button_font_size: 17.0,
            button_padding: 8.0,
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, DemoError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_top_spacing(mut self, spacing: f64) -> Self {
        self.top_spacing = spacing;
        self
    }

    pub fn with_section_spacing(mut self, spacing: f64) -> Self {
        self.section_spacing = spacing;
        self
    }

    /// Width available between the margins
    fn content_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(0.0)
    }
}

impl FromStr for DemoConfig {
    type Err = DemoError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

/// Which pair of texts the columns show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoState {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl DemoState {
    pub const ALL: [DemoState; 4] = [
        DemoState::One,
        DemoState::Two,
        DemoState::Three,
        DemoState::Four,
    ];

    /// The following state, wrapping from four back to one
    pub fn next(self) -> DemoState {
        match self {
            DemoState::One => DemoState::Two,
            DemoState::Two => DemoState::Three,
            DemoState::Three => DemoState::Four,
            DemoState::Four => DemoState::One,
        }
    }

    /// Texts for the left and right column
    pub fn texts(self) -> (&'static str, &'static str) {
        match self {
            DemoState::One => (BODY_1, BODY_2),
            DemoState::Two => (BODY_3, BODY_2),
            DemoState::Three => (BODY_3, BODY_4),
            DemoState::Four => (BODY_1, BODY_4),
        }
    }
}

impl fmt::Display for DemoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DemoState::One => "one",
            DemoState::Two => "two",
            DemoState::Three => "three",
            DemoState::Four => "four",
        };
        f.write_str(name)
    }
}

impl FromStr for DemoState {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" => Ok(DemoState::One),
            "2" | "two" => Ok(DemoState::Two),
            "3" | "three" => Ok(DemoState::Three),
            "4" | "four" => Ok(DemoState::Four),
            _ => Err(DemoError::UnknownState(s.to_string())),
        }
    }
}

/// Wrap `text` to `max_width` and estimate the size it occupies.
///
/// Returns the text with line breaks inserted and its size. A single word
/// wider than `max_width` stays on its own line and is clipped to the width.
pub fn measure_text(text: &str, font_size: f64, max_width: f64) -> (String, Size) {
    let char_width = font_size * CHAR_WIDTH_FACTOR;
    let max_chars = if char_width > 0.0 {
        ((max_width / char_width).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if !current.is_empty() && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = (longest as f64 * char_width).min(max_width.max(0.0));
    let height = lines.len() as f64 * font_size * LINE_HEIGHT_FACTOR;
    (lines.join("\n"), Size::new(width, height))
}

/// The demo screen and the tree that holds it
#[derive(Debug)]
pub struct Demo {
    tree: ViewTree,
    config: DemoConfig,
    window: ViewId,
    layout_view: ViewId,
    heading: ViewId,
    subheading: ViewId,
    left_column: ViewId,
    right_column: ViewId,
    button: ViewId,
    state: DemoState,
}

impl Demo {
    /// Build the screen in a fresh window, show state one and lay it out
    pub fn build(config: DemoConfig) -> Result<Self, DemoError> {
        let tree = ViewTree::new();
        let window = tree.create_window(Size::new(config.width, config.height));

        let label = |name: &str| {
            tree.create_view(ViewSpec::new().named(name).with_interactive(false))
        };
        let heading = label("heading");
        let subheading = label("subheading");
        let left_column = label("left column");
        let right_column = label("right column");
        let button = tree.create_view(ViewSpec::new().named("change button"));

        let installed = {
            let b = LayoutBuilder::new(&tree);
            b.inset(
                config.margin,
                Axis::Horizontal,
                b.rows_aligned(
                    Alignment::LEFT,
                    [
                        b.spacing(config.top_spacing, Axis::Vertical)?,
                        b.view(heading),
                        b.view(subheading),
                        b.spacing(config.section_spacing, Axis::Vertical)?,
                        b.cols_aligned(Alignment::TOP, [b.view(left_column), b.view(right_column)])?,
                        b.spacing(config.section_spacing, Axis::Vertical)?,
                        b.view(button),
                    ],
                )?,
            )?
            .install_with(
                &tree,
                window,
                InstallOptions::new().with_edges(Edges::ALL.without(Edge::Bottom)),
            )?
        };

        let mut demo = Self {
            tree,
            config,
            window,
            layout_view: installed.view,
            heading,
            subheading,
            left_column,
            right_column,
            button,
            state: DemoState::One,
        };
        demo.set_fixed_content()?;
        demo.apply_state(DemoState::One)?;
        demo.layout()?;
        tracing::debug!(window = %demo.window, views = demo.tree.len(), "built demo");
        Ok(demo)
    }

    fn set_fixed_content(&self) -> Result<(), DemoError> {
        let width = self.config.content_width();
        for (view, text, font_size) in [
            (self.heading, "Heading", self.config.heading_font_size),
            (self.subheading, "Subheading", self.config.subheading_font_size),
        ] {
            let (text, size) = measure_text(text, font_size, width);
            self.tree.set_content(view, text, size)?;
        }

        let padding = self.config.button_padding;
        let (title, size) = measure_text(
            "Change",
            self.config.button_font_size,
            (width - 2.0 * padding).max(0.0),
        );
        self.tree.set_content(
            self.button,
            title,
            Size::new(size.width + 2.0 * padding, size.height + 2.0 * padding),
        )?;
        Ok(())
    }

    /// Show the column texts of `state`. Takes effect on the next layout pass.
    pub fn apply_state(&mut self, state: DemoState) -> Result<(), DemoError> {
        let column_width = self.config.content_width() / 2.0;
        let (left, right) = state.texts();
        for (view, text) in [(self.left_column, left), (self.right_column, right)] {
            let (text, size) = measure_text(text, self.config.body_font_size, column_width);
            self.tree.set_content(view, text, size)?;
        }
        self.state = state;
        tracing::debug!(%state, "applied demo state");
        Ok(())
    }

    /// Show `state` and lay the screen out again
    pub fn set_state(&mut self, state: DemoState) -> Result<(), DemoError> {
        self.apply_state(state)?;
        self.layout()
    }

    pub fn layout(&self) -> Result<(), DemoError> {
        self.tree.layout(self.window)?;
        Ok(())
    }

    /// Deliver a tap at `point` (window coordinates). A tap on the button
    /// advances to the next state. Returns the view that received the tap.
    pub fn tap(&mut self, point: Point) -> Result<Option<ViewId>, DemoError> {
        let hit = self.tree.hit_test(self.window, point)?;
        tracing::debug!(x = point.x, y = point.y, ?hit, "tap");
        if hit == Some(self.button) {
            self.set_state(self.state.next())?;
        }
        Ok(hit)
    }

    pub fn render_svg(
        &self,
        config: &SvgConfig,
        stylesheet: &Stylesheet,
    ) -> Result<String, DemoError> {
        Ok(render_svg(&self.tree, self.window, config, stylesheet)?)
    }

    pub fn dump(&self) -> Result<String, DemoError> {
        Ok(self.tree.dump(self.window)?)
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn state(&self) -> DemoState {
        self.state
    }

    pub fn window(&self) -> ViewId {
        self.window
    }

    /// Root of the installed layout
    pub fn layout_view(&self) -> ViewId {
        self.layout_view
    }

    pub fn heading(&self) -> ViewId {
        self.heading
    }

    pub fn subheading(&self) -> ViewId {
        self.subheading
    }

    pub fn left_column(&self) -> ViewId {
        self.left_column
    }

    pub fn right_column(&self) -> ViewId {
        self.right_column
    }

    pub fn button(&self) -> ViewId {
        self.button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.01;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_state_rotation_wraps() {
        let mut state = DemoState::One;
        for _ in 0..4 {
            state = state.next();
        }
        assert_eq!(state, DemoState::One);
        assert_eq!(DemoState::Three.next(), DemoState::Four);
    }

    #[test]
    fn test_state_texts() {
        assert_eq!(DemoState::One.texts(), (BODY_1, BODY_2));
        assert_eq!(DemoState::Two.texts(), (BODY_3, BODY_2));
        assert_eq!(DemoState::Three.texts(), (BODY_3, BODY_4));
        assert_eq!(DemoState::Four.texts(), (BODY_1, BODY_4));
    }

    #[test]
    fn test_state_parsing() {
        assert_eq!("2".parse::<DemoState>().unwrap(), DemoState::Two);
        assert_eq!("Four".parse::<DemoState>().unwrap(), DemoState::Four);
        assert!(matches!(
            "five".parse::<DemoState>(),
            Err(DemoError::UnknownState(_))
        ));
        assert_eq!(DemoState::Three.to_string(), "three");
    }

    #[test]
    fn test_measure_single_line() {
        let (text, size) = measure_text("Change", 10.0, 1000.0);
        assert_eq!(text, "Change");
        assert!(approx(size.width, 36.0));
        assert!(approx(size.height, 12.0));
    }

    #[test]
    fn test_measure_wraps_on_words() {
        // 10 characters per line at 6 px each
        let (text, size) = measure_text("aaa bbb ccc ddd", 10.0, 60.0);
        assert_eq!(text, "aaa bbb\nccc ddd");
        assert!(approx(size.width, 42.0));
        assert!(approx(size.height, 24.0));
    }

    #[test]
    fn test_measure_long_word_is_clipped() {
        let (text, size) = measure_text("supercalifragilistic", 10.0, 60.0);
        assert_eq!(text, "supercalifragilistic");
        assert!(approx(size.width, 60.0));
    }

    #[test]
    fn test_measure_empty_text() {
        let (text, size) = measure_text("", 17.0, 100.0);
        assert_eq!(text, "");
        assert_eq!(size, Size::zero());
    }

    #[test]
    fn test_config_defaults_and_partial_toml() {
        let config: DemoConfig = "margin = 20.0\nwidth = 320.0\n".parse().unwrap();
        assert!(approx(config.margin, 20.0));
        assert!(approx(config.width, 320.0));
        assert!(approx(config.top_spacing, 64.0));
        assert!(approx(config.section_spacing, 24.0));
    }

    #[test]
    fn test_config_invalid_toml() {
        assert!(matches!(
            "margin = [".parse::<DemoConfig>(),
            Err(DemoError::Parse(_))
        ));
    }

    #[test]
    fn test_build_places_heading_below_top_spacing() {
        let demo = Demo::build(DemoConfig::default()).unwrap();
        let heading = demo.tree().absolute_frame(demo.heading()).unwrap();

        assert!(approx(heading.x, 16.0));
        assert!(approx(heading.y, 64.0));
    }

    #[test]
    fn test_build_sections_are_spaced() {
        let demo = Demo::build(DemoConfig::default()).unwrap();
        let tree = demo.tree();
        let subheading = tree.absolute_frame(demo.subheading()).unwrap();
        let left = tree.absolute_frame(demo.left_column()).unwrap();
        let right = tree.absolute_frame(demo.right_column()).unwrap();
        let button = tree.absolute_frame(demo.button()).unwrap();

        assert!(approx(left.y, subheading.bottom() + 24.0));
        assert!(approx(right.y, left.y));
        assert!(approx(right.x, left.right()));
        let columns_bottom = left.bottom().max(right.bottom());
        assert!(approx(button.y, columns_bottom + 24.0));
        assert!(approx(button.x, 16.0));
    }

    #[test]
    fn test_layout_hugs_content_height() {
        let demo = Demo::build(DemoConfig::default()).unwrap();
        let layout = demo.tree().absolute_frame(demo.layout_view()).unwrap();
        let button = demo.tree().absolute_frame(demo.button()).unwrap();

        assert!(approx(layout.width, 375.0));
        assert!(approx(layout.bottom(), button.bottom()));
    }

    #[test]
    fn test_tap_on_button_advances_state() {
        let mut demo = Demo::build(DemoConfig::default()).unwrap();
        let button = demo.tree().absolute_frame(demo.button()).unwrap();

        let hit = demo.tap(button.center()).unwrap();

        assert_eq!(hit, Some(demo.button()));
        assert_eq!(demo.state(), DemoState::Two);
    }

    #[test]
    fn test_tap_on_label_does_nothing() {
        let mut demo = Demo::build(DemoConfig::default()).unwrap();
        let heading = demo.tree().absolute_frame(demo.heading()).unwrap();

        let hit = demo.tap(heading.center()).unwrap();

        assert_eq!(hit, Some(demo.window()));
        assert_eq!(demo.state(), DemoState::One);
    }
}
