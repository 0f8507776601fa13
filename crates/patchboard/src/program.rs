//! Executable program assembly.
//!
//! The audio runtime consumes a flattened form of the patch: nodes in
//! dependency order, inputs rewritten from shape ids to program slot
//! indices. This module walks the resolved [`Patch`] from its sink,
//! drops unreachable nodes, and emits a serializable [`Program`].
//!
//! The program format is a DAG; a feedback cycle in the wires is a
//! compile error.

use indexmap::IndexMap;
use log::{debug, info};
use petgraph::{
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};
use serde::Serialize;

use patchboard_core::{identifier::Id, patch::Input};

use crate::{compile::Patch, config::RuntimeConfig, error::CompileError};

/// One input port of a program node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    /// A constant parameter value.
    Constant(f64),
    /// The output of an earlier program slot.
    Node(usize),
}

/// One node of the flattened program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramNode {
    kind: String,
    inputs: Vec<Port>,
}

impl ProgramNode {
    /// The node type tag, as the runtime keys its constructors.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The input ports in positional order.
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }
}

/// The flattened, topologically ordered program handed to the audio
/// runtime.
///
/// Inputs of a node only ever reference earlier slots, so the runtime
/// can instantiate nodes in list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    sample_rate: u32,
    nodes: Vec<ProgramNode>,
    root: usize,
}

impl Program {
    /// Sample rate the runtime should render at, in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The program nodes in dependency order.
    pub fn nodes(&self) -> &[ProgramNode] {
        &self.nodes
    }

    /// Slot index of the sink node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Serialize the program to pretty JSON for the runtime.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Flatten a patch into an executable program.
///
/// # Errors
///
/// Returns [`CompileError::CyclicPatch`] when the wires form a cycle and
/// [`CompileError::UnboundInput`] when a reachable input slot has
/// neither a default nor a connection.
pub fn assemble(patch: &Patch, config: &RuntimeConfig) -> Result<Program, CompileError> {
    let reachable = reachable_from_sink(patch);
    debug!(reachable = reachable.len(), total = patch.len(); "Patch flattened from sink");

    // Dependency graph over reachable nodes only; wires run from source
    // to consumer.
    let mut graph: DiGraph<Id, ()> = DiGraph::new();
    let mut indices: IndexMap<Id, NodeIndex> = IndexMap::new();

    for &id in &reachable {
        let idx = graph.add_node(id);
        indices.insert(id, idx);
    }
    for &id in &reachable {
        let node = patch.node(id).expect("reachable node exists in patch");
        for input in node.inputs() {
            if let Input::Wire(source) = input {
                graph.add_edge(indices[source], indices[&id], ());
            }
        }
    }

    let order = toposort(&graph, None).map_err(|cycle| CompileError::CyclicPatch {
        node: graph[cycle.node_id()],
    })?;

    // Program slot for every node, in dependency order.
    let slots: IndexMap<Id, usize> = order
        .iter()
        .enumerate()
        .map(|(slot, idx)| (graph[*idx], slot))
        .collect();

    let mut nodes = Vec::with_capacity(order.len());
    for idx in &order {
        let id = graph[*idx];
        let node = patch.node(id).expect("reachable node exists in patch");

        let mut inputs = Vec::with_capacity(node.inputs().len());
        for input in node.inputs() {
            let port = match input {
                Input::Literal(value) => Port::Constant(*value),
                Input::Wire(source) => Port::Node(slots[source]),
                Input::Unbound(name) => {
                    return Err(CompileError::UnboundInput {
                        node: id,
                        kind: node.kind(),
                        name: *name,
                    });
                }
            };
            inputs.push(port);
        }

        nodes.push(ProgramNode {
            kind: node.kind().to_string(),
            inputs,
        });
    }

    let root = slots[&patch.sink()];
    info!(nodes = nodes.len(), root = root; "Program assembled");

    Ok(Program {
        sample_rate: config.sample_rate(),
        nodes,
        root,
    })
}

/// Depth-first reachability from the sink along wires.
///
/// Visits each node once, so shared nodes appear a single time and a
/// cyclic patch still terminates (the cycle is reported by toposort).
fn reachable_from_sink(patch: &Patch) -> Vec<Id> {
    let mut visited = Vec::new();
    let mut stack = vec![patch.sink()];

    while let Some(id) = stack.pop() {
        if visited.contains(&id) {
            continue;
        }
        visited.push(id);

        if let Some(node) = patch.node(id) {
            for input in node.inputs() {
                if let Input::Wire(source) = input {
                    stack.push(*source);
                }
            }
        }
    }

    visited
}
