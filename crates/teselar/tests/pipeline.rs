//! End-to-end pipeline tests: JSON document to painted scene.

use teselar::{Color, Dataset, Diagram, DrawCommand, Event, Hierarchy, Point, TreemapLayout};

/// A miniature dataset in the shape of the hosted video-game document:
/// platform groups holding valued leaves.
const VIDEO_GAMES: &str = r#"{
    "name": "Video Game Sales Data Top 100",
    "children": [
        {
            "name": "Wii",
            "children": [
                {"name": "WiiSports", "category": "Wii", "value": "82.9"},
                {"name": "MarioKartWii", "category": "Wii", "value": "35.52"}
            ]
        },
        {
            "name": "DS",
            "children": [
                {"name": "Nintendogs", "category": "DS", "value": "24.67"}
            ]
        },
        {
            "name": "X360",
            "children": [
                {"name": "KinectAdventures", "category": "X360", "value": "21.81"}
            ]
        }
    ]
}"#;

#[test]
fn two_leaf_canvas_splits_proportionally() {
    let json = r#"{
        "name": "root",
        "children": [
            {"name": "A", "category": "c", "value": 10},
            {"name": "B", "category": "c", "value": 30}
        ]
    }"#;
    let mut hierarchy = Hierarchy::from_json(json).unwrap();
    TreemapLayout::new(100.0, 100.0, 0.0).compute(&mut hierarchy);

    let a = hierarchy
        .leaves()
        .iter()
        .map(|&id| hierarchy.node(id))
        .find(|n| n.name == "A")
        .unwrap()
        .bounds
        .unwrap();
    let b = hierarchy
        .leaves()
        .iter()
        .map(|&id| hierarchy.node(id))
        .find(|n| n.name == "B")
        .unwrap()
        .bounds
        .unwrap();

    assert!((b.area() - 7500.0).abs() < 1e-3);
    assert!((a.area() - 2500.0).abs() < 1e-3);
    assert!(b.intersection(&a).is_none());
}

#[test]
fn realistic_document_loads_and_paints() {
    let diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();

    assert_eq!(diagram.treemap().tiles().len(), 4);
    assert_eq!(diagram.legend().entries().len(), 3);
    assert_eq!(diagram.title(), "Video Game Sales");
    assert_eq!(
        diagram.description(),
        "Top 100 Most Sold Video Games Grouped by Platform"
    );

    let scene = diagram.scene();
    assert!(!scene.is_empty());
    let rects = scene
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect { .. }))
        .count();
    // 4 tile fills + 3 legend swatches.
    assert_eq!(rects, 7);
}

#[test]
fn tiles_stay_within_canvas() {
    let diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    for tile in diagram.treemap().tiles() {
        assert!(tile.bounds.x >= 0.0, "{}", tile.node_id);
        assert!(tile.bounds.y >= 0.0, "{}", tile.node_id);
        assert!(tile.bounds.right() <= 950.0 + 1e-3, "{}", tile.node_id);
        assert!(tile.bounds.bottom() <= 550.0 + 1e-3, "{}", tile.node_id);
    }
}

#[test]
fn tile_fill_matches_its_legend_swatch() {
    let diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    for tile in diagram.treemap().tiles() {
        let entry = diagram.legend().entry_for(&tile.category).unwrap();
        assert_eq!(tile.fill, entry.color);
    }
}

#[test]
fn hover_tooltip_reports_tile_attributes() {
    let json = r#"{
        "name": "root",
        "children": [
            {"name": "Foo", "category": "cat1", "value": 5},
            {"name": "Bar", "category": "cat2", "value": 15}
        ]
    }"#;
    let mut diagram = Diagram::load(Dataset::VideoGames, json).unwrap();

    let bounds = diagram.treemap().tile_by_id("root.Foo").unwrap().bounds;
    let pointer = Point::new(
        bounds.x + bounds.width / 2.0,
        bounds.y + bounds.height / 2.0,
    );
    diagram.handle_event(&Event::MouseMove { position: pointer });

    let tooltip = diagram.hover().tooltip();
    assert!(tooltip.is_visible());
    assert_eq!(tooltip.lines(), ["Name: Foo", "Category: cat1", "Value: 5"]);
    assert_eq!(tooltip.data_value(), Some(5.0));
    assert_eq!(tooltip.position(), pointer.offset(10.0, -28.0));

    diagram.handle_event(&Event::MouseLeave);
    assert!(!diagram.hover().tooltip().is_visible());
}

#[test]
fn reload_resets_hover_to_idle() {
    let mut diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    let bounds = diagram.treemap().tiles()[0].bounds;
    diagram.handle_event(&Event::MouseMove {
        position: Point::new(bounds.x + 1.0, bounds.y + 1.0),
    });
    assert!(diagram.hover().hovered().is_some());

    let diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    assert!(diagram.hover().hovered().is_none());
    assert!(!diagram.hover().tooltip().is_visible());
}

#[test]
fn failed_load_produces_no_diagram() {
    assert!(Diagram::load(Dataset::Kickstarter, "[1, 2, 3]").is_err());
    assert!(Diagram::load(Dataset::Kickstarter, "").is_err());
}

#[test]
fn category_colors_are_faded_base_palette() {
    let diagram = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    // First-seen category takes the first palette color, softened 20%
    // toward white.
    let expected = Color::from_hex("#1f77b4").unwrap().faded(0.2);
    assert_eq!(diagram.legend().entries()[0].color, expected);
}

#[test]
fn determinism_across_loads() {
    let first = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    let second = Diagram::load(Dataset::VideoGames, VIDEO_GAMES).unwrap();
    assert_eq!(first.treemap().tiles(), second.treemap().tiles());
    assert_eq!(first.scene(), second.scene());
}
