use std::rc::Rc;

use super::RootSettings;

/// One immutable segment in a shared path tree.
///
/// Nothing mutates a node after construction; sharing an ancestor chain
/// between any number of handles and children is therefore safe, and the
/// counted parent link keeps every ancestor alive until its last descendant
/// is gone.
#[derive(Debug)]
pub(crate) struct PathNode {
    pub(crate) value: String,
    pub(crate) parent: Parent,
}

/// A node's upward link: the parent node, or the settings of the root the
/// chain terminates at. Exactly one of the two.
#[derive(Debug)]
pub(crate) enum Parent {
    Root(RootSettings),
    Node(Rc<PathNode>),
}

impl PathNode {
    pub(crate) fn root(settings: RootSettings) -> Rc<PathNode> {
        Rc::new(PathNode {
            value: String::new(),
            parent: Parent::Root(settings),
        })
    }

    pub(crate) fn child(parent: &Rc<PathNode>, value: String) -> Rc<PathNode> {
        Rc::new(PathNode {
            value,
            parent: Parent::Node(Rc::clone(parent)),
        })
    }

    pub(crate) fn parent_node(&self) -> Option<&Rc<PathNode>> {
        match &self.parent {
            Parent::Node(node) => Some(node),
            Parent::Root(_) => None,
        }
    }

    pub(crate) fn is_root(&self) -> bool {
        matches!(self.parent, Parent::Root(_))
    }

    /// Walks to the root and borrows its settings.
    pub(crate) fn settings(&self) -> &RootSettings {
        let mut node = self;
        loop {
            match &node.parent {
                Parent::Root(settings) => return settings,
                Parent::Node(parent) => node = parent,
            }
        }
    }

    /// This node, then each ancestor in turn, ending at the root.
    pub(crate) fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { node: Some(self) }
    }

    /// Segment values in root-to-node order; the root contributes none.
    pub(crate) fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self
            .ancestors()
            .filter(|node| !node.is_root())
            .map(|node| node.value.as_str())
            .collect();
        segments.reverse();
        segments
    }

    /// The platform-native string for this node: the root prefix, then each
    /// segment preceded by the separator. A bare root renders as prefix plus
    /// separator alone.
    pub(crate) fn render(&self) -> String {
        let settings = self.settings();
        let segments = self.segments();
        let mut out = String::new();
        if let Some(drive) = settings.drive() {
            out.push_str(drive);
        }
        if segments.is_empty() {
            out.push_str(settings.separator());
        } else {
            for segment in segments {
                out.push_str(settings.separator());
                out.push_str(segment);
            }
        }
        out
    }
}

pub(crate) struct Ancestors<'a> {
    node: Option<&'a PathNode>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a PathNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.node?;
        self.node = current.parent_node().map(|parent| &**parent);
        Some(current)
    }
}
