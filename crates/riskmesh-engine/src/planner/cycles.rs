//! Cycle detection over the event dependency graph using Tarjan's SCC.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use riskmesh_core::EventId;

/// Find every dependency cycle among `events`.
///
/// `edges` are `(dependent, dependency)` pairs. Returns one group per
/// strongly connected component with more than one member, plus single
/// events that depend on themselves. Members are sorted by id and groups by
/// their first member.
pub fn find_cycles(
    events: impl IntoIterator<Item = EventId>,
    edges: impl IntoIterator<Item = (EventId, EventId)>,
) -> Vec<Vec<EventId>> {
    let mut graph: DiGraph<EventId, ()> = DiGraph::new();
    let mut nodes: FxHashMap<EventId, NodeIndex> = FxHashMap::default();
    for id in events {
        nodes.entry(id).or_insert_with(|| graph.add_node(id));
    }
    for (from, to) in edges {
        if let (Some(&a), Some(&b)) = (nodes.get(&from), nodes.get(&to)) {
            graph.update_edge(a, b, ());
        }
    }

    let mut cycles: Vec<Vec<EventId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut ids: Vec<EventId> = scc.into_iter().map(|n| graph[n]).collect();
            ids.sort_unstable();
            ids
        })
        .collect();
    cycles.sort_unstable();
    cycles
}
