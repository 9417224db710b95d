use crate::version_analysis::domain::{
    DependencyGraph, LibraryRecord, NodeId, Owner, OwnerReason,
};
use std::collections::BTreeMap;

/// Outcome counts of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Records that inherited a concrete owner from an ancestor
    pub inherited: usize,
    /// Records left with the `unknown` sentinel
    pub unknown: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Search {
    Pending,
    InProgress,
    Done(Option<NodeId>),
}

/// OwnershipResolver service that propagates owners up the dependency graph
///
/// For an unowned library the search walks its parents in graph order: the
/// first parent with a concrete owner wins, otherwise that parent's own
/// ancestors are searched before moving to the next sibling. Only the owners
/// present before the pass are consulted (a frozen seed snapshot) and every
/// node's answer is memoized, so the outcome does not depend on the order
/// records are visited and each node is searched once.
pub struct OwnershipResolver<'a> {
    graph: &'a DependencyGraph,
    seeds: Vec<Option<(Owner, Option<OwnerReason>)>>,
    searches: Vec<Search>,
}

impl<'a> OwnershipResolver<'a> {
    pub fn new(graph: &'a DependencyGraph, records: &BTreeMap<String, LibraryRecord>) -> Self {
        let seeds = graph
            .nodes()
            .iter()
            .map(|node| {
                records
                    .get(node.name())
                    .filter(|record| !record.owner().is_unresolved())
                    .map(|record| (record.owner().clone(), record.owner_reason().cloned()))
            })
            .collect();

        Self {
            graph,
            seeds,
            searches: vec![Search::Pending; graph.len()],
        }
    }

    /// Resolves every unresolved record in place, in name order.
    ///
    /// Records that find no owned ancestor, or have no node in the graph,
    /// end with `Owner::Unknown`.
    pub fn resolve(
        records: &mut BTreeMap<String, LibraryRecord>,
        graph: &DependencyGraph,
    ) -> ResolutionReport {
        let mut resolver = OwnershipResolver::new(graph, records);

        let outcomes: Vec<(String, Option<(Owner, OwnerReason)>)> = records
            .values()
            .filter(|record| record.owner().is_unresolved())
            .map(|record| (record.name().to_string(), resolver.find_owner(record.name())))
            .collect();

        let mut report = ResolutionReport::default();
        for (name, outcome) in outcomes {
            let Some(record) = records.get_mut(&name) else {
                continue;
            };
            match outcome {
                Some((owner, reason)) => {
                    record.set_owner(owner, Some(reason));
                    report.inherited += 1;
                }
                None => {
                    record.set_owner(Owner::Unknown, None);
                    report.unknown += 1;
                }
            }
        }
        report
    }

    /// Finds the owner a library inherits, with the ancestor it came from.
    ///
    /// A library that is itself owned answers with its own owner and reason.
    pub fn find_owner(&mut self, name: &str) -> Option<(Owner, OwnerReason)> {
        let id = self.graph.node_id(name)?;
        if let Some((owner, reason)) = &self.seeds[id.index()] {
            let reason = reason.clone().unwrap_or(OwnerReason::Assigned);
            return Some((owner.clone(), reason));
        }

        let source = self.search_ancestors(id)?;
        Some(self.inherited_from(source))
    }

    fn inherited_from(&self, source: NodeId) -> (Owner, OwnerReason) {
        let (owner, reason) = self.seeds[source.index()]
            .as_ref()
            .map(|(owner, reason)| (owner.clone(), reason.clone()))
            .unwrap_or((Owner::Unknown, None));

        let reason = match reason {
            Some(OwnerReason::Ancestor(ancestor)) => OwnerReason::Ancestor(ancestor),
            _ => OwnerReason::Ancestor(self.graph.node(source).name().to_string()),
        };
        (owner, reason)
    }

    /// Returns the owned node `start` inherits from, memoizing every node
    /// visited on the way. Iterative post-order over parent pointers.
    fn search_ancestors(&mut self, start: NodeId) -> Option<NodeId> {
        if let Search::Done(found) = self.searches[start.index()] {
            return found;
        }

        self.searches[start.index()] = Search::InProgress;
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

        while let Some(&(node, next)) = stack.last() {
            let Some(&parent) = self.graph.parents(node).get(next) else {
                self.searches[node.index()] = Search::Done(None);
                stack.pop();
                continue;
            };

            if self.seeds[parent.index()].is_some() {
                self.finish(&mut stack, Some(parent));
                continue;
            }

            match self.searches[parent.index()] {
                Search::Done(Some(found)) => self.finish(&mut stack, Some(found)),
                // Unowned subtree or a cycle edge still open on this walk: try the next sibling.
                Search::Done(None) | Search::InProgress => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                }
                Search::Pending => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    self.searches[parent.index()] = Search::InProgress;
                    stack.push((parent, 0));
                }
            }
        }

        match self.searches[start.index()] {
            Search::Done(found) => found,
            _ => None,
        }
    }

    /// Records `found` for the top of the stack and pops it.
    ///
    /// A hit short-circuits every ancestor frame below it too, since each of
    /// them was waiting on exactly this branch.
    fn finish(&mut self, stack: &mut Vec<(NodeId, usize)>, found: Option<NodeId>) {
        while let Some((node, _)) = stack.pop() {
            self.searches[node.index()] = Search::Done(found);
        }
    }
}
