use crate::version_analysis::domain::DependencyGraph;

/// A parent edge dropped while breaking cycles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEdge {
    pub child: String,
    pub parent: String,
}

/// Diagnostic record of a cycle-breaking pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    removed_edges: Vec<RemovedEdge>,
}

impl CycleReport {
    pub fn removed_edges(&self) -> &[RemovedEdge] {
        &self.removed_edges
    }

    pub fn is_empty(&self) -> bool {
        self.removed_edges.is_empty()
    }

    pub fn into_removed_edges(self) -> Vec<RemovedEdge> {
        self.removed_edges
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Open,
    Closed,
}

/// CycleBreaker service that makes the parent relation acyclic
///
/// A single depth-first pass over parent pointers, started from every node in
/// name order. An edge that leads back to a node still open on the walk is a
/// back-edge: it is removed and not followed. Earlier edges on the path are
/// kept ("first occurrence wins"), and nodes closed by an earlier walk are
/// never re-entered, so the same input always loses the same edges.
pub struct CycleBreaker;

impl CycleBreaker {
    pub fn break_cycles(graph: &mut DependencyGraph) -> CycleReport {
        let mut marks = vec![Mark::Unvisited; graph.len()];
        let mut report = CycleReport::default();

        for start in graph.node_ids_by_name() {
            if marks[start.index()] != Mark::Unvisited {
                continue;
            }

            marks[start.index()] = Mark::Open;
            let mut stack = vec![(start, 0usize)];

            while let Some(&(node, next)) = stack.last() {
                let Some(&parent) = graph.parents(node).get(next) else {
                    marks[node.index()] = Mark::Closed;
                    stack.pop();
                    continue;
                };

                match marks[parent.index()] {
                    Mark::Open => {
                        // The list shifts left, so `next` already points at the following parent.
                        graph.remove_parent(node, parent);
                        report.removed_edges.push(RemovedEdge {
                            child: graph.node(node).name().to_string(),
                            parent: graph.node(parent).name().to_string(),
                        });
                    }
                    Mark::Unvisited => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                        marks[parent.index()] = Mark::Open;
                        stack.push((parent, 0));
                    }
                    Mark::Closed => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                    }
                }
            }
        }

        report
    }
}
