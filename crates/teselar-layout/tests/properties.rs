//! Property tests for the hierarchy builder and squarified layout.

use proptest::prelude::*;
use teselar_layout::{Hierarchy, RawNode, TreemapLayout};

fn leaf_node(value: u32) -> RawNode {
    RawNode {
        name: String::new(),
        category: Some(format!("cat{}", value % 7)),
        value: Some(f64::from(value)),
        children: Vec::new(),
    }
}

/// Random tree: leaves carry bounded positive values, internal nodes fan
/// out up to four children, nesting up to three levels. Names are assigned
/// afterwards so sibling names never collide and dotted ids stay unique.
fn raw_tree() -> impl Strategy<Value = RawNode> {
    let leaf = (1u32..=1_000u32).prop_map(leaf_node);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|children| RawNode {
            name: String::new(),
            category: None,
            value: None,
            children,
        })
    })
    .prop_map(|mut root| {
        let mut counter = 0;
        assign_names(&mut root, &mut counter);
        root
    })
}

fn assign_names(node: &mut RawNode, counter: &mut u32) {
    *counter += 1;
    node.name = format!("n{counter}");
    for child in &mut node.children {
        assign_names(child, counter);
    }
}

proptest! {
    #[test]
    fn leaf_areas_conserve_canvas_area(raw in raw_tree()) {
        let mut hierarchy = Hierarchy::build(&raw).unwrap();
        TreemapLayout::new(950.0, 550.0, 0.0).compute(&mut hierarchy);

        let root_aggregate = hierarchy.node(hierarchy.root()).aggregate;
        prop_assume!(root_aggregate > 0.0);

        let total: f64 = hierarchy
            .leaves()
            .iter()
            .map(|&id| f64::from(hierarchy.node(id).bounds.unwrap().area()))
            .sum();
        // Bounds are stored as f32, so tolerance scales with leaf count.
        prop_assert!(
            (total - 950.0 * 550.0).abs() < 10.0,
            "leaf areas {} should tile the canvas", total
        );
    }

    #[test]
    fn each_leaf_area_matches_its_share(raw in raw_tree()) {
        let mut hierarchy = Hierarchy::build(&raw).unwrap();
        TreemapLayout::new(950.0, 550.0, 0.0).compute(&mut hierarchy);

        let root_aggregate = hierarchy.node(hierarchy.root()).aggregate;
        prop_assume!(root_aggregate > 0.0);

        for &leaf in &hierarchy.leaves() {
            let node = hierarchy.node(leaf);
            let expected = 950.0 * 550.0 * (node.aggregate / root_aggregate);
            let actual = f64::from(node.bounds.unwrap().area());
            prop_assert!(
                (actual - expected).abs() < 1.0,
                "leaf {} area {} vs expected {}", node.id, actual, expected
            );
        }
    }

    #[test]
    fn leaves_never_overlap(raw in raw_tree()) {
        let mut hierarchy = Hierarchy::build(&raw).unwrap();
        TreemapLayout::new(950.0, 550.0, 1.0).compute(&mut hierarchy);

        let bounds: Vec<_> = hierarchy
            .leaves()
            .iter()
            .map(|&id| hierarchy.node(id).bounds.unwrap())
            .collect();
        for i in 0..bounds.len() {
            for j in (i + 1)..bounds.len() {
                if let Some(overlap) = bounds[i].intersection(&bounds[j]) {
                    // f32 storage of the f64 layout may brush edges;
                    // genuine overlap has meaningful area.
                    prop_assert!(
                        overlap.area() < 1e-2,
                        "leaves {} and {} overlap by {}", i, j, overlap.area()
                    );
                }
            }
        }
    }

    #[test]
    fn layout_is_deterministic(raw in raw_tree()) {
        let layout = TreemapLayout::default();

        let mut first = Hierarchy::build(&raw).unwrap();
        layout.compute(&mut first);
        let mut second = Hierarchy::build(&raw).unwrap();
        layout.compute(&mut second);

        for (&l, &r) in first.leaves().iter().zip(second.leaves().iter()) {
            prop_assert_eq!(first.node(l).bounds, second.node(r).bounds);
        }
    }

    #[test]
    fn dotted_ids_round_trip(raw in raw_tree()) {
        let hierarchy = Hierarchy::build(&raw).unwrap();
        for &leaf in &hierarchy.leaves() {
            prop_assert_eq!(&hierarchy.path_id(leaf), &hierarchy.node(leaf).id);
        }
    }
}
