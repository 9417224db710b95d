use std::collections::HashMap;

/// A package manager's dependency listing, before import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyListing {
    /// `npm list --all --json` document
    Json(String),
    /// Indented `npm list --all` text
    Text(String),
    /// Bundler `Gemfile.lock`, read from its `specs:` sections
    GemfileLock(String),
}

/// Handle of a node inside a `DependencyGraph` arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One distinct library in the dependency tree
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyNode {
    name: String,
    version: Option<String>,
    parents: Vec<NodeId>,
}

impl DependencyNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observed version, or `low..high` span when several versions were seen
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Direct dependents, in first-seen order
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// A node without parents is a direct dependency of the project
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// DependencyGraph aggregate: an arena of nodes linked by parent handles
///
/// Edges point from a library to the libraries that depend on it, which is
/// the direction ownership flows in.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<DependencyNode>,
    index: HashMap<String, NodeId>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `name`, inserting a parentless one if needed
    pub fn ensure_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(DependencyNode {
            name: name.to_string(),
            version: None,
            parents: Vec::new(),
        });
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// # Panics
    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &DependencyNode {
        &self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<&DependencyNode> {
        self.node_id(name).map(|id| self.node(id))
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].parents
    }

    /// Adds `parent` to `child`'s parents unless already present.
    /// Returns whether the edge was new.
    pub fn add_parent(&mut self, child: NodeId, parent: NodeId) -> bool {
        let parents = &mut self.nodes[child.0].parents;
        if parents.contains(&parent) {
            return false;
        }
        parents.push(parent);
        true
    }

    /// Removes the `child -> parent` edge. Returns whether it existed.
    pub fn remove_parent(&mut self, child: NodeId, parent: NodeId) -> bool {
        let parents = &mut self.nodes[child.0].parents;
        let before = parents.len();
        parents.retain(|p| *p != parent);
        parents.len() != before
    }

    pub fn set_version(&mut self, id: NodeId, version: String) {
        self.nodes[id.0].version = Some(version);
    }

    /// Node handles in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node handles sorted by library name
    pub fn node_ids_by_name(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.node_ids().collect();
        ids.sort_by(|a, b| self.nodes[a.0].name.cmp(&self.nodes[b.0].name));
        ids
    }

    pub fn nodes(&self) -> &[DependencyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.parents.len()).sum()
    }

    pub fn root_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_root()).count()
    }

    /// Whether any walk along parent pointers can return to its start
    pub fn has_cycle(&self) -> bool {
        // 0 = unvisited, 1 = on stack, 2 = done
        let mut state = vec![0u8; self.nodes.len()];

        for start in 0..self.nodes.len() {
            if state[start] != 0 {
                continue;
            }
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            state[start] = 1;

            while let Some((node, next_parent)) = stack.pop() {
                let parents = &self.nodes[node].parents;
                if next_parent < parents.len() {
                    stack.push((node, next_parent + 1));
                    let parent = parents[next_parent].0;
                    match state[parent] {
                        0 => {
                            state[parent] = 1;
                            stack.push((parent, 0));
                        }
                        1 => return true,
                        _ => {}
                    }
                } else {
                    state[node] = 2;
                }
            }
        }
        false
    }

    /// Flat `(name, parent names)` adjacency, in insertion order
    pub fn adjacency(&self) -> Vec<(String, Vec<String>)> {
        self.nodes
            .iter()
            .map(|node| {
                let parents = node
                    .parents
                    .iter()
                    .map(|p| self.nodes[p.0].name.clone())
                    .collect();
                (node.name.clone(), parents)
            })
            .collect()
    }
}
