//! SVG output for laid-out screens.

use stack_layout::{
    render_svg, Alignment, Axis, LayoutBuilder, Size, Stylesheet, SvgConfig, ViewSpec, ViewTree,
};

fn screen() -> (ViewTree, stack_layout::ViewId) {
    let tree = ViewTree::new();
    let window = tree.create_window(Size::new(200.0, 100.0));
    let title = tree.create_view(
        ViewSpec::new()
            .named("title")
            .with_text("Title")
            .with_intrinsic_size(Size::new(60.0, 20.0)),
    );
    let b = LayoutBuilder::new(&tree);
    b.inset(
        10.0,
        Axis::Horizontal,
        b.rows_aligned(
            Alignment::LEFT,
            vec![b.spacing(10.0, Axis::Vertical).unwrap(), b.view(title)],
        )
        .unwrap(),
    )
    .unwrap()
    .install(&tree, window)
    .unwrap();
    tree.layout(window).unwrap();
    (tree, window)
}

#[test]
fn test_every_view_becomes_a_rect() {
    let (tree, window) = screen();
    let svg = render_svg(&tree, window, &SvgConfig::default(), &Stylesheet::default()).unwrap();

    assert_eq!(svg.matches("<rect ").count(), tree.len());
    assert_eq!(svg.matches(r#"class="sl-view sl-stack sl-transparent""#).count(), 2);
    assert_eq!(svg.matches(r#"class="sl-view sl-transparent""#).count(), 3);
    assert!(svg.contains(r#"x="10" y="10" width="60" height="90""#));
    assert!(svg.contains(r#"<text class="sl-text" x="10" y="10""#));
}

#[test]
fn test_hiding_transparent_views_keeps_content() {
    let (tree, window) = screen();
    let config = SvgConfig::default().with_show_transparent(false);
    let svg = render_svg(&tree, window, &config, &Stylesheet::default()).unwrap();

    // The window and the title
    assert_eq!(svg.matches("<rect ").count(), 2);
    assert!(svg.contains(">Title</tspan>"));
}

#[test]
fn test_stylesheet_from_file_overrides_palette() {
    let dir = std::env::temp_dir().join(format!("stack-layout-svg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("night.toml");
    std::fs::write(&path, "[metadata]\nname = \"night\"\n\n[colors]\nwindow = \"#000000\"\n").unwrap();

    let stylesheet = Stylesheet::from_file(&path).unwrap();
    let (tree, window) = screen();
    let svg = render_svg(&tree, window, &SvgConfig::default(), &stylesheet).unwrap();

    assert!(svg.contains("--window: #000000;"));
    assert!(svg.contains("--stack: #1565c0;"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_custom_prefix_applies_to_all_classes() {
    let (tree, window) = screen();
    let config = SvgConfig::default().with_class_prefix("x-");
    let svg = render_svg(&tree, window, &config, &Stylesheet::default()).unwrap();

    assert!(svg.contains(".x-view {"));
    assert!(svg.contains(r#"class="x-view x-window""#));
    assert!(!svg.contains("sl-"));
}
