//! Arena-backed hierarchy built from nested JSON datasets.

use serde::Deserialize;
use teselar_core::Rect;
use thiserror::Error;
use tracing::debug;

/// Raw input node as it appears in the dataset JSON.
///
/// Leaves carry a numeric `value` and no children; internal nodes carry
/// children and no own value. A missing `name` fails deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Display name, also the trailing segment of the dotted id.
    pub name: String,
    /// Category used for coloring (present on leaves).
    #[serde(default)]
    pub category: Option<String>,
    /// Own numeric value (present on leaves). Some hosted datasets quote
    /// values as strings, so both encodings are accepted.
    #[serde(default, deserialize_with = "value_or_numeric_string")]
    pub value: Option<f64>,
    /// Child nodes (present on internal nodes).
    #[serde(default)]
    pub children: Vec<RawNode>,
}

fn value_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Errors raised while building a hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The input JSON did not match the expected shape.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// A node carried a negative or non-finite value.
    #[error("node '{id}' has invalid value {value}")]
    InvalidValue {
        /// Dotted id of the offending node.
        id: String,
        /// The rejected value.
        value: f64,
    },

    /// A node had an empty name, which would corrupt dotted ids.
    #[error("node with empty name under '{parent}'")]
    EmptyName {
        /// Dotted id of the parent node.
        parent: String,
    },
}

/// Index of a node within the hierarchy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the built hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    /// Dotted-path identifier: parent id + "." + name (root id = name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category (None on internal nodes and the root).
    pub category: Option<String>,
    /// Own value; 0.0 for internal nodes.
    pub value: f64,
    /// Subtree-aggregated value: own value for leaves, children sum otherwise.
    pub aggregate: f64,
    /// Distance from the root.
    pub depth: u16,
    /// Subtree height: 0 for leaves.
    pub height: u16,
    /// Parent index (None for the root). Stored as an index, not a pointer,
    /// so the tree has a single owner.
    pub parent: Option<NodeId>,
    /// Child indices in layout order (descending height, then aggregate).
    pub children: Vec<NodeId>,
    /// Layout bounds, written by the treemap engine.
    pub bounds: Option<Rect>,
}

impl Node {
    /// Check if the node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The built tree: an arena of [`Node`]s rooted at index 0.
///
/// Built once per dataset load and replaced wholesale on re-load.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    /// Parse a JSON document and build the hierarchy from it.
    pub fn from_json(json: &str) -> Result<Self, HierarchyError> {
        let raw: RawNode = serde_json::from_str(json)?;
        Self::build(&raw)
    }

    /// Build a hierarchy from an already-parsed [`RawNode`] tree.
    ///
    /// Runs the full pipeline: pre-order id assignment, post-order value
    /// aggregation, then the recursive layout sort.
    pub fn build(raw: &RawNode) -> Result<Self, HierarchyError> {
        let mut hierarchy = Self { nodes: Vec::new() };
        hierarchy.insert(raw, None)?;
        hierarchy.aggregate(hierarchy.root());
        hierarchy.sort_children(hierarchy.root());
        debug!(
            nodes = hierarchy.len(),
            leaves = hierarchy.leaves().len(),
            total = hierarchy.node(hierarchy.root()).aggregate,
            "hierarchy built"
        );
        Ok(hierarchy)
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree is empty (never true for a built hierarchy).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf ids in depth-first order following the layout sort.
    ///
    /// This is the traversal order that fixes category color assignment.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_leaves(self.root(), &mut out);
        out
    }

    /// Reconstruct a node's dotted id by walking its parent chain.
    #[must_use]
    pub fn path_id(&self, id: NodeId) -> String {
        let mut names = vec![self.node(id).name.as_str()];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            names.push(self.node(parent).name.as_str());
            current = parent;
        }
        names.reverse();
        names.join(".")
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        if node.is_leaf() {
            out.push(id);
            return;
        }
        for &child in &node.children {
            self.collect_leaves(child, out);
        }
    }

    /// Pre-order insertion: the id depends only on the parent chain, so it
    /// is final before any sorting happens.
    fn insert(&mut self, raw: &RawNode, parent: Option<NodeId>) -> Result<NodeId, HierarchyError> {
        let (id, depth) = match parent {
            Some(parent_id) => {
                let parent_node = self.node(parent_id);
                if raw.name.is_empty() {
                    return Err(HierarchyError::EmptyName {
                        parent: parent_node.id.clone(),
                    });
                }
                (
                    format!("{}.{}", parent_node.id, raw.name),
                    parent_node.depth + 1,
                )
            }
            None => (raw.name.clone(), 0),
        };

        let value = match raw.value {
            Some(v) if !v.is_finite() || v < 0.0 => {
                return Err(HierarchyError::InvalidValue { id, value: v });
            }
            Some(v) if raw.children.is_empty() => v,
            // Internal nodes aggregate from their children; an own value
            // on an internal node is ignored.
            _ => 0.0,
        };

        let node_id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            id,
            name: raw.name.clone(),
            category: raw.category.clone(),
            value,
            aggregate: 0.0,
            depth,
            height: 0,
            parent,
            children: Vec::with_capacity(raw.children.len()),
            bounds: None,
        });

        for raw_child in &raw.children {
            let child_id = self.insert(raw_child, Some(node_id))?;
            self.node_mut(node_id).children.push(child_id);
        }
        Ok(node_id)
    }

    /// Post-order aggregation of values and subtree heights.
    fn aggregate(&mut self, id: NodeId) -> (f64, u16) {
        let children = self.node(id).children.clone();
        if children.is_empty() {
            let value = self.node(id).value;
            let node = self.node_mut(id);
            node.aggregate = value;
            node.height = 0;
            return (value, 0);
        }

        let mut sum = 0.0;
        let mut max_height = 0;
        for child in children {
            let (aggregate, height) = self.aggregate(child);
            sum += aggregate;
            max_height = max_height.max(height);
        }
        let node = self.node_mut(id);
        node.aggregate = sum;
        node.height = max_height + 1;
        (sum, max_height + 1)
    }

    /// Recursive top-down sort, run once aggregates are known: descending
    /// subtree height, ties broken by descending aggregate. Squarified
    /// layout is order-sensitive, so this ordering is part of the contract.
    fn sort_children(&mut self, id: NodeId) {
        let mut children = self.node(id).children.clone();
        children.sort_by(|&a, &b| {
            let na = self.node(a);
            let nb = self.node(b);
            nb.height.cmp(&na.height).then_with(|| {
                nb.aggregate
                    .partial_cmp(&na.aggregate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        for &child in &children {
            self.sort_children(child);
        }
        self.node_mut(id).children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawNode {
        serde_json::from_str(
            r#"{
                "name": "root",
                "children": [
                    {
                        "name": "Platform",
                        "children": [
                            {"name": "GameA", "category": "Platform", "value": 10},
                            {"name": "GameB", "category": "Platform", "value": 30}
                        ]
                    },
                    {"name": "Loose", "category": "Misc", "value": 5}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_name_fails_parse() {
        let err = Hierarchy::from_json(r#"{"value": 3}"#).unwrap_err();
        assert!(matches!(err, HierarchyError::Parse(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_empty_name_is_fatal() {
        let raw: RawNode = serde_json::from_str(
            r#"{"name": "root", "children": [{"name": "", "value": 1}]}"#,
        )
        .unwrap();
        let err = Hierarchy::build(&raw).unwrap_err();
        assert!(matches!(err, HierarchyError::EmptyName { .. }));
    }

    #[test]
    fn test_invalid_value_is_fatal() {
        let raw: RawNode = serde_json::from_str(
            r#"{"name": "root", "children": [{"name": "bad", "value": -1.0}]}"#,
        )
        .unwrap();
        let err = Hierarchy::build(&raw).unwrap_err();
        match err {
            HierarchyError::InvalidValue { id, value } => {
                assert_eq!(id, "root.bad");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_string_encoded_values_parse() {
        let h = Hierarchy::from_json(
            r#"{"name": "root", "children": [
                {"name": "quoted", "category": "c", "value": "82.90"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(h.node(h.root()).aggregate, 82.9);
    }

    #[test]
    fn test_non_numeric_string_value_fails_parse() {
        let err = Hierarchy::from_json(
            r#"{"name": "root", "children": [
                {"name": "bad", "category": "c", "value": "lots"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, HierarchyError::Parse(_)));
    }

    #[test]
    fn test_dotted_ids() {
        let h = Hierarchy::build(&sample()).unwrap();
        let ids: Vec<&str> = h
            .leaves()
            .iter()
            .map(|&id| h.node(id).id.as_str())
            .collect();
        assert!(ids.contains(&"root.Platform.GameA"));
        assert!(ids.contains(&"root.Loose"));
    }

    #[test]
    fn test_path_id_round_trip() {
        let h = Hierarchy::build(&sample()).unwrap();
        for &leaf in &h.leaves() {
            assert_eq!(h.path_id(leaf), h.node(leaf).id);
        }
    }

    #[test]
    fn test_aggregate_sums_bottom_up() {
        let h = Hierarchy::build(&sample()).unwrap();
        assert_eq!(h.node(h.root()).aggregate, 45.0);
        let platform = h.node(h.root()).children[0];
        assert_eq!(h.node(platform).aggregate, 40.0);
    }

    #[test]
    fn test_leaf_without_value_aggregates_to_zero() {
        let h = Hierarchy::from_json(
            r#"{"name": "root", "children": [{"name": "empty"}]}"#,
        )
        .unwrap();
        let child = h.node(h.root()).children[0];
        assert_eq!(h.node(child).aggregate, 0.0);
    }

    #[test]
    fn test_internal_own_value_is_ignored() {
        let h = Hierarchy::from_json(
            r#"{"name": "root", "value": 999,
                "children": [{"name": "leaf", "value": 7}]}"#,
        )
        .unwrap();
        assert_eq!(h.node(h.root()).aggregate, 7.0);
    }

    #[test]
    fn test_children_sorted_by_height_then_aggregate() {
        let h = Hierarchy::build(&sample()).unwrap();
        let children = &h.node(h.root()).children;
        // "Platform" has height 1, "Loose" height 0: height wins.
        assert_eq!(h.node(children[0]).name, "Platform");
        assert_eq!(h.node(children[1]).name, "Loose");

        // Within "Platform", both leaves have height 0: aggregate wins.
        let platform = children[0];
        let grandchildren = &h.node(platform).children;
        assert_eq!(h.node(grandchildren[0]).name, "GameB");
        assert_eq!(h.node(grandchildren[1]).name, "GameA");
    }

    #[test]
    fn test_leaf_order_is_depth_first_after_sort() {
        let h = Hierarchy::build(&sample()).unwrap();
        let names: Vec<&str> = h
            .leaves()
            .iter()
            .map(|&id| h.node(id).name.as_str())
            .collect();
        assert_eq!(names, ["GameB", "GameA", "Loose"]);
    }

    #[test]
    fn test_depths() {
        let h = Hierarchy::build(&sample()).unwrap();
        assert_eq!(h.node(h.root()).depth, 0);
        let platform = h.node(h.root()).children[0];
        assert_eq!(h.node(platform).depth, 1);
        let leaf = h.node(platform).children[0];
        assert_eq!(h.node(leaf).depth, 2);
    }
}
