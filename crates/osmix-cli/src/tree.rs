//! Hierarchical command registry.
//!
//! Commands live in an arena addressed by stable [`CommandId`]s; the parent
//! is a non-owning back-reference and ownership flows root-to-leaf. A child
//! can only be registered under an id the tree already issued, so the tree
//! is acyclic with exactly one root by construction. It is built once
//! before dispatch and never mutated afterwards.

/// Stable handle addressing a node within a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(usize);

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

/// Arena-backed command hierarchy.
#[derive(Debug)]
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    /// Creates a tree containing only the root command.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                name: root.into(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the id of the root command.
    #[must_use]
    pub const fn root(&self) -> CommandId {
        CommandId(0)
    }

    /// Registers `name` as a child of `parent` and returns its id.
    ///
    /// Registration failures are programmer errors, not runtime conditions:
    /// a duplicate name under the same parent panics, as does an id issued
    /// by a different tree (out-of-range access).
    pub fn register(&mut self, parent: CommandId, name: impl Into<String>) -> CommandId {
        let name = name.into();
        assert!(
            !self
                .children(parent)
                .iter()
                .any(|&child| self.name(child) == name),
            "duplicate command name under {}: {name}",
            self.name(parent),
        );
        let id = CommandId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    /// Returns the name of `id`.
    #[must_use]
    pub fn name(&self, id: CommandId) -> &str {
        &self.nodes[id.0].name
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.nodes[id.0].parent
    }

    /// Returns the children registered under `id`.
    #[must_use]
    pub fn children(&self, id: CommandId) -> &[CommandId] {
        &self.nodes[id.0].children
    }

    /// Iterates from `id` up to the root, starting with `id` itself.
    pub fn ancestry(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.parent(current);
            Some(current)
        })
    }

    /// Returns the full command path from the root, e.g. `osmix init`.
    #[must_use]
    pub fn path(&self, id: CommandId) -> String {
        let mut names: Vec<&str> = self.ancestry(id).map(|node| self.name(node)).collect();
        names.reverse();
        names.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_only_the_root() {
        let tree = CommandTree::new("osmix");
        let root = tree.root();
        assert_eq!(tree.name(root), "osmix");
        assert!(tree.parent(root).is_none());
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn register_links_parent_and_child() {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let init = tree.register(root, "init");

        assert_eq!(tree.name(init), "init");
        assert_eq!(tree.parent(init), Some(root));
        assert_eq!(tree.children(root), &[init]);
    }

    #[test]
    fn ancestry_walks_leaf_to_root() {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let bundles = tree.register(root, "bundles");
        let add = tree.register(bundles, "add");

        let chain: Vec<CommandId> = tree.ancestry(add).collect();
        assert_eq!(chain, vec![add, bundles, root]);
    }

    #[test]
    fn ancestry_of_root_is_just_the_root() {
        let tree = CommandTree::new("osmix");
        let chain: Vec<CommandId> = tree.ancestry(tree.root()).collect();
        assert_eq!(chain, vec![tree.root()]);
    }

    #[test]
    fn path_joins_names_from_the_root() {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let bundles = tree.register(root, "bundles");
        let add = tree.register(bundles, "add");

        assert_eq!(tree.path(add), "osmix bundles add");
        assert_eq!(tree.path(root), "osmix");
    }

    #[test]
    #[should_panic(expected = "duplicate command name")]
    fn duplicate_sibling_name_is_rejected() {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let _ = tree.register(root, "init");
        let _ = tree.register(root, "init");
    }

    #[test]
    fn siblings_do_not_share_children() {
        let mut tree = CommandTree::new("osmix");
        let root = tree.root();
        let init = tree.register(root, "init");
        let rpms = tree.register(root, "add-rpms");

        assert_eq!(tree.children(root), &[init, rpms]);
        assert!(tree.children(init).is_empty());
        assert!(tree.children(rpms).is_empty());
    }
}
