use glam::{Affine3A, Vec3};
use serde::Serialize;

use crate::figure::Figure;
use crate::math::Transform;
use crate::types::Light;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Figure(Figure),
    Light(Light),
}

/// Scene graph node. Children are owned outright; a subtree is never shared
/// between two parents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn figure(name: impl Into<String>, figure: Figure) -> Self {
        Self::new(name, NodeKind::Figure(figure))
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn is_figure(&self) -> bool {
        matches!(self.kind, NodeKind::Figure(_))
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, NodeKind::Light(_))
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match &self.kind {
            NodeKind::Figure(figure) => Some(figure),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Depth-first search by name, this node included
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this subtree matching `predicate`
    pub fn count(&self, predicate: &impl Fn(&SceneNode) -> bool) -> usize {
        let own = usize::from(predicate(self));
        own + self.children.iter().map(|child| child.count(predicate)).sum::<usize>()
    }

    /// Depth-first walk handing each node its resolved world matrix
    pub fn visit(&self, parent: &Affine3A, visitor: &mut impl FnMut(&SceneNode, &Affine3A)) {
        let world = self.transform.world_matrix(parent);
        visitor(self, &world);
        for child in &self.children {
            child.visit(&world, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::build_figure;
    use crate::math::Color;

    fn sample_tree() -> SceneNode {
        SceneNode::group("root")
            .with_transform(Transform::IDENTITY.with_scale(2.0))
            .with_child(SceneNode::light("ambient", Light::ambient()))
            .with_child(
                SceneNode::group("holder")
                    .with_position(Vec3::new(1.0, 0.0, 0.0))
                    .with_child(SceneNode::figure("dog", build_figure(Color::SADDLE_BROWN))),
            )
    }

    #[test]
    fn test_find_by_name() {
        let tree = sample_tree();
        assert!(tree.find("dog").unwrap().is_figure());
        assert!(tree.find("ambient").unwrap().is_light());
        assert!(tree.find("cat").is_none());
    }

    #[test]
    fn test_count_matches_kind() {
        let tree = sample_tree();
        assert_eq!(tree.count(&SceneNode::is_figure), 1);
        assert_eq!(tree.count(&SceneNode::is_light), 1);
        assert_eq!(tree.count(&|_| true), 4);
    }

    #[test]
    fn test_visit_composes_parent_transforms() {
        let tree = sample_tree();
        let mut dog_origin = None;
        tree.visit(&Affine3A::IDENTITY, &mut |node: &SceneNode, world: &Affine3A| {
            if node.name == "dog" {
                dog_origin = Some(world.transform_point3(Vec3::ZERO));
            }
        });
        assert_eq!(dog_origin, Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_serializes_kind_and_children() {
        let json = serde_json::to_value(sample_tree()).unwrap();
        assert_eq!(json["name"], "root");
        assert_eq!(json["kind"], "group");
        assert_eq!(json["children"].as_array().unwrap().len(), 2);
        assert!(json["children"][0]["kind"]["light"].is_object());
    }
}
