//! Scene model consumed by the exporter
//!
//! A scene is a tree of [`Node`]s. Each node has a stable [`NodeId`] (legend
//! items refer to plots through it), a [`NodeKind`] from a closed set, and
//! ordered children. The exporter only reads scenes.

mod axis;
mod plot;
mod style;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ExportError;

pub use axis::*;
pub use plot::*;
pub use style::*;

/// Stable identity of a node within one scene
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of node variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Plain container without visual meaning
    Group,
    AxisContainer(AxisContainer),
    LinePlot(LinePlot),
    Surface(Surface),
    FastSurface(FastSurface),
    ErrorBarPlot(ErrorBarPlot),
    Legend(Legend),
    LegendItem(LegendItem),
    Title(Title),
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Group => NodeTag::Group,
            NodeKind::AxisContainer(_) => NodeTag::AxisContainer,
            NodeKind::LinePlot(_) => NodeTag::LinePlot,
            NodeKind::Surface(_) => NodeTag::Surface,
            NodeKind::FastSurface(_) => NodeTag::FastSurface,
            NodeKind::ErrorBarPlot(_) => NodeTag::ErrorBarPlot,
            NodeKind::Legend(_) => NodeTag::Legend,
            NodeKind::LegendItem(_) => NodeTag::LegendItem,
            NodeKind::Title(_) => NodeTag::Title,
        }
    }
}

/// Payload-free discriminant of [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Group,
    AxisContainer,
    LinePlot,
    Surface,
    FastSurface,
    ErrorBarPlot,
    Legend,
    LegendItem,
    Title,
}

impl NodeTag {
    pub const ALL: [NodeTag; 9] = [
        NodeTag::Group,
        NodeTag::AxisContainer,
        NodeTag::LinePlot,
        NodeTag::Surface,
        NodeTag::FastSurface,
        NodeTag::ErrorBarPlot,
        NodeTag::Legend,
        NodeTag::LegendItem,
        NodeTag::Title,
    ];

    /// Name used for the `type` field of serialized nodes
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::Group => "group",
            NodeTag::AxisContainer => "axis_container",
            NodeTag::LinePlot => "line_plot",
            NodeTag::Surface => "surface",
            NodeTag::FastSurface => "fast_surface",
            NodeTag::ErrorBarPlot => "error_bar_plot",
            NodeTag::Legend => "legend",
            NodeTag::LegendItem => "legend_item",
            NodeTag::Title => "title",
        }
    }

    /// True for nodes that carry plot geometry
    pub fn is_plot(self) -> bool {
        matches!(
            self,
            NodeTag::LinePlot | NodeTag::Surface | NodeTag::FastSurface | NodeTag::ErrorBarPlot
        )
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scene node and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: u64, kind: NodeKind) -> Self {
        Self {
            id: NodeId(id),
            kind,
            children: Vec::new(),
        }
    }

    pub fn group(id: u64) -> Self {
        Self::new(id, NodeKind::Group)
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// This node and every node below it, depth-first, parents before children
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![NodeRef {
                node: self,
                parent: None,
            }],
        }
    }

    /// Every node of the given variant in this subtree, in walk order
    pub fn find(&self, tag: NodeTag) -> impl Iterator<Item = NodeRef<'_>> {
        self.walk().filter(move |entry| entry.node.tag() == tag)
    }

    /// The first node of the given variant in this subtree
    pub fn first(&self, tag: NodeTag) -> Option<&Node> {
        self.find(tag).next().map(|entry| entry.node)
    }

    /// The direct child of the given variant
    pub fn child(&self, tag: NodeTag) -> Option<&Node> {
        self.children.iter().find(|child| child.tag() == tag)
    }

    /// Stored-space bounding box of all plot geometry in this subtree
    ///
    /// Error bar endpoints count, placed at the x and z of the matching
    /// vertex of the bar plot's own line.
    pub fn data_extent(&self) -> Extent {
        let mut extent = Extent::default();
        for entry in self.walk() {
            match &entry.node.kind {
                NodeKind::LinePlot(plot) => extent.extend(&plot.positions),
                NodeKind::ErrorBarPlot(bars) => {
                    if let Some(NodeKind::LinePlot(line)) =
                        entry.node.child(NodeTag::LinePlot).map(|line| &line.kind)
                    {
                        for (point, span) in line.positions.iter().zip(&bars.errors) {
                            extent.include(&[point[0], span.lower, point[2]]);
                            extent.include(&[point[0], span.upper, point[2]]);
                        }
                    }
                }
                NodeKind::Surface(surface) => extent.extend(surface.grid.vertices()),
                NodeKind::FastSurface(surface) => extent.extend(&surface.points),
                _ => {}
            }
        }
        extent
    }
}

/// A node together with its parent in the walk
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a Node,
    pub parent: Option<&'a Node>,
}

/// Depth-first pre-order iterator over a subtree
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        self.stack
            .extend(entry.node.children.iter().rev().map(|child| NodeRef {
                node: child,
                parent: Some(entry.node),
            }));
        Some(entry)
    }
}

/// Root of a scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub root: Node,
}

impl Scene {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Load a scene from its JSON form
    pub fn from_json(input: &str) -> Result<Self, ExportError> {
        serde_json::from_str(input).map_err(|e| ExportError::scene_error(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::scene_error(e.to_string()))
    }

    pub fn nodes(&self) -> Walk<'_> {
        self.root.walk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        Scene::new(
            Node::group(0).with_child(
                Node::new(1, NodeKind::AxisContainer(AxisContainer::default()))
                    .with_child(Node::new(2, NodeKind::LinePlot(LinePlot::default())))
                    .with_child(
                        Node::new(3, NodeKind::ErrorBarPlot(ErrorBarPlot::default()))
                            .with_child(Node::new(4, NodeKind::LinePlot(LinePlot::default()))),
                    ),
            ),
        )
    }

    #[test]
    fn test_walk_is_preorder() {
        let scene = sample();
        let ids: Vec<u64> = scene.nodes().map(|entry| entry.node.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_walk_tracks_parent() {
        let scene = sample();
        let inner = scene
            .nodes()
            .find(|entry| entry.node.id == NodeId(4))
            .unwrap();
        assert_eq!(inner.parent.map(|p| p.tag()), Some(NodeTag::ErrorBarPlot));
        assert!(scene.nodes().next().unwrap().parent.is_none());
    }

    #[test]
    fn test_find_and_first() {
        let scene = sample();
        assert_eq!(scene.root.find(NodeTag::LinePlot).count(), 2);
        assert_eq!(
            scene.root.first(NodeTag::AxisContainer).map(|n| n.id),
            Some(NodeId(1))
        );
        assert!(scene.root.first(NodeTag::Legend).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let scene = sample();
        let json = scene.to_json().unwrap();
        assert!(json.contains(r#""type": "error_bar_plot""#));
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_unknown_scale_fails_scene_load() {
        let json = r#"{"root":{"id":1,"kind":{"type":"axis_container","scale_modes":{"x":"polar"}}}}"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Unsupported axis scale: polar"));
    }

    #[test]
    fn test_data_extent_covers_all_plots() {
        let scene = Scene::new(
            Node::group(0)
                .with_child(Node::new(
                    1,
                    NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 5.0), (2.0, -1.0)])),
                ))
                .with_child(Node::new(
                    2,
                    NodeKind::FastSurface(FastSurface {
                        colormap: Colormap::gray(),
                        points: vec![[4.0, 0.0, 3.0]],
                    }),
                )),
        );
        let extent = scene.root.data_extent();
        assert_eq!(extent.range(Dimension::X), (0.0, 4.0));
        assert_eq!(extent.range(Dimension::Y), (-1.0, 5.0));
        assert_eq!(extent.range(Dimension::Z), (0.0, 3.0));
    }

    #[test]
    fn test_data_extent_covers_error_bar_endpoints() {
        let bars = Node::new(
            1,
            NodeKind::ErrorBarPlot(ErrorBarPlot::new(vec![
                ErrorSpan {
                    lower: 8.0,
                    upper: 15.0,
                },
                ErrorSpan {
                    lower: 9.0,
                    upper: 11.0,
                },
            ])),
        )
        .with_child(Node::new(
            2,
            NodeKind::LinePlot(LinePlot::from_xy(&[(0.0, 10.0), (1.0, 10.0)])),
        ));
        let extent = bars.data_extent();
        assert_eq!(extent.range(Dimension::X), (0.0, 1.0));
        assert_eq!(extent.range(Dimension::Y), (8.0, 15.0));

        // Without a line there is nothing to place the spans at
        let lonely = Node::new(
            3,
            NodeKind::ErrorBarPlot(ErrorBarPlot::new(vec![ErrorSpan {
                lower: -5.0,
                upper: 5.0,
            }])),
        );
        assert_eq!(lonely.data_extent(), Extent::default());
    }

    #[test]
    fn test_tag_names_match_serialized_type() {
        for tag in NodeTag::ALL {
            assert!(!tag.name().is_empty());
        }
        let json = serde_json::to_string(&NodeKind::Group).unwrap();
        assert_eq!(json, format!(r#"{{"type":"{}"}}"#, NodeTag::Group));
    }
}
