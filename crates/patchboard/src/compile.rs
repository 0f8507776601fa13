//! The sketch-to-patch compiler.
//!
//! This module walks a canvas [`Snapshot`] and produces a [`Patch`]: one
//! node per node-candidate shape, with input slots resolved from literal
//! label arguments and arrow connections.
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. Index shapes by id.
//! 2. Extract arrows as [`Connection`]s via the [`BindingSource`] seam.
//! 3. Parse every candidate label into a node spec.
//! 4. Instantiate nodes with their literal defaults.
//! 5. Resolve each connection onto its target inlet, overwriting the
//!    default.
//! 6. Locate the sink node and its root input.
//!
//! Connection resolution is keyed by argument name, never by discovery
//! order: compiling the same snapshot with arrows in any order yields an
//! identical patch.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, info, trace};

use patchboard_core::{
    identifier::Id,
    patch::{Input, PatchNode},
    snapshot::{BindingSource, Shape, Snapshot},
};
use patchboard_parser::{ArgValue, NodeSpec, parse_label};

use crate::{
    config::CompileConfig,
    error::{CompileError, PatchboardError},
};

/// An arrow resolved into a directed connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// The originating arrow shape id.
    pub arrow: Id,
    /// The node the signal comes from.
    pub source: Id,
    /// The node the signal feeds into.
    pub target: Id,
    /// The arrow's label, naming the target inlet. `None` targets
    /// inlet 0.
    pub inlet: Option<String>,
    /// Human-readable description, `<source label> -> <target label>`.
    pub label: String,
}

/// A compiled patch: the resolved node graph of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    nodes: IndexMap<Id, PatchNode>,
    sink: Id,
    root: Id,
}

impl Patch {
    /// Iterate over all nodes in shape order.
    pub fn nodes(&self) -> impl Iterator<Item = &PatchNode> {
        self.nodes.values()
    }

    /// Look up a node by shape id.
    pub fn node(&self, id: Id) -> Option<&PatchNode> {
        self.nodes.get(&id)
    }

    /// Number of nodes in the patch.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the patch has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The sink node's shape id.
    pub fn sink(&self) -> Id {
        self.sink
    }

    /// The node wired into the sink's single input: the root of the
    /// signal path.
    pub fn root(&self) -> Id {
        self.root
    }
}

/// Compile a snapshot into a patch.
///
/// `bindings` resolves arrow endpoints; a [`Snapshot`] resolves its own
/// inlined terminals, an embedding application can pass a live editor
/// seam instead.
///
/// # Errors
///
/// Returns [`CompileError::EmptyCanvas`] for a canvas with no shapes
/// (recoverable), a `Label` error when a shape label fails the grammar,
/// and the structural [`CompileError`] variants described on each.
pub fn compile(
    snapshot: &Snapshot,
    bindings: &impl BindingSource,
    config: &CompileConfig,
) -> Result<Patch, PatchboardError> {
    if snapshot.is_empty() {
        return Err(CompileError::EmptyCanvas.into());
    }

    info!(shapes = snapshot.shapes.len(); "Compiling snapshot");

    // Index all shapes by id; owned by this call only.
    let shapes: HashMap<Id, &Shape> = snapshot
        .shapes
        .iter()
        .map(|shape| (shape.identifier(), shape))
        .collect();

    let connections = extract_connections(snapshot, bindings, &shapes)?;
    debug!(connections = connections.len(); "Arrows resolved");

    let specs = parse_candidates(snapshot)?;
    debug!(nodes = specs.len(); "Labels parsed");

    let mut nodes = instantiate(&specs);
    resolve(&mut nodes, &specs, &connections)?;

    // Sort inbound labels so the patch is independent of arrow order.
    for node in nodes.values_mut() {
        node.sort_in_labels();
    }

    let (sink, root) = locate_sink(&nodes, config)?;

    info!(nodes = nodes.len(), sink = sink.to_string(); "Patch compiled");

    Ok(Patch { nodes, sink, root })
}

/// Extract arrows as connections (step 2).
fn extract_connections(
    snapshot: &Snapshot,
    bindings: &impl BindingSource,
    shapes: &HashMap<Id, &Shape>,
) -> Result<Vec<Connection>, PatchboardError> {
    let mut connections = Vec::new();

    for arrow in snapshot.arrows() {
        let arrow_id = arrow.identifier();

        let binding = bindings
            .resolve(arrow)
            .ok_or(CompileError::DanglingArrow { arrow: arrow_id })?;

        // Both endpoints must be node candidates; an arrow bound to a
        // freehand stroke or another arrow dangles.
        let source = endpoint(shapes, binding.source, arrow_id)?;
        let target = endpoint(shapes, binding.target, arrow_id)?;

        let inlet = match arrow.label() {
            "" => None,
            text => Some(text.to_string()),
        };

        let connection = Connection {
            arrow: arrow_id,
            source: binding.source,
            target: binding.target,
            inlet,
            label: format!("{} -> {}", source.label(), target.label()),
        };
        trace!(connection:? = connection; "Resolved arrow");
        connections.push(connection);
    }

    Ok(connections)
}

fn endpoint<'s>(
    shapes: &HashMap<Id, &'s Shape>,
    id: Id,
    arrow: Id,
) -> Result<&'s Shape, CompileError> {
    shapes
        .get(&id)
        .copied()
        .filter(|shape| shape.kind.is_candidate())
        .ok_or(CompileError::DanglingArrow { arrow })
}

/// Parse every candidate shape's label (steps 3-4).
fn parse_candidates(snapshot: &Snapshot) -> Result<IndexMap<Id, NodeSpec>, PatchboardError> {
    let mut specs = IndexMap::new();

    for shape in snapshot.candidates() {
        let id = shape.identifier();
        let label = shape.label();
        let spec = parse_label(label)
            .map_err(|err| PatchboardError::new_label_error(id, err, label))?;
        specs.insert(id, spec);
    }

    Ok(specs)
}

/// Instantiate one node per spec, with literal defaults in positional
/// order (step 5).
fn instantiate(specs: &IndexMap<Id, NodeSpec>) -> IndexMap<Id, PatchNode> {
    specs
        .iter()
        .map(|(id, spec)| {
            let inputs = spec
                .args()
                .iter()
                .map(|arg| match arg.inner().value() {
                    ArgValue::Literal(value) => Input::Literal(*value),
                    ArgValue::Name(name) => Input::Unbound(*name),
                })
                .collect();
            (*id, PatchNode::new(*id, spec.kind(), inputs))
        })
        .collect()
}

/// Resolve each connection onto its target inlet (step 6).
fn resolve(
    nodes: &mut IndexMap<Id, PatchNode>,
    specs: &IndexMap<Id, NodeSpec>,
    connections: &[Connection],
) -> Result<(), CompileError> {
    let mut claimed: HashSet<(Id, usize)> = HashSet::new();

    for connection in connections {
        let spec = &specs[&connection.target];

        let slot = match &connection.inlet {
            Some(inlet) => {
                spec.arg_index(inlet)
                    .ok_or_else(|| CompileError::UnknownInlet {
                        inlet: inlet.clone(),
                        kind: spec.kind(),
                        available: spec
                            .args()
                            .iter()
                            .map(|arg| arg.inner().raw())
                            .collect::<Vec<_>>()
                            .join(" "),
                    })?
            }
            None => 0,
        };

        if !claimed.insert((connection.target, slot)) {
            return Err(CompileError::InletCollision {
                node: connection.target,
                kind: spec.kind(),
                slot,
            });
        }

        let node = nodes
            .get_mut(&connection.target)
            .expect("connection targets are validated candidates");
        // The wire strictly replaces whatever default the slot held.
        node.set_input(slot, Input::Wire(connection.source));
        node.add_in_label(connection.label.clone());
    }

    Ok(())
}

/// Locate the unique sink node and its root input (step 7).
fn locate_sink(
    nodes: &IndexMap<Id, PatchNode>,
    config: &CompileConfig,
) -> Result<(Id, Id), CompileError> {
    let sink_kind = config.sink_id();

    let mut sinks = nodes.values().filter(|node| node.kind() == sink_kind);
    let sink = sinks
        .next()
        .ok_or(CompileError::MissingSink { sink: sink_kind })?;
    if sinks.next().is_some() {
        return Err(CompileError::MultipleSinks { sink: sink_kind });
    }

    let root = sink
        .input(0)
        .and_then(Input::wire)
        .ok_or(CompileError::UnconnectedRoot { sink: sink_kind })?;

    Ok((sink.id(), root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchboard_core::snapshot::{ShapeKind, ShapeProps, Terminal};

    fn node_shape(id: &str, text: &str) -> Shape {
        Shape {
            id: id.to_string(),
            kind: ShapeKind::Node,
            props: ShapeProps {
                text: text.to_string(),
                start: None,
                end: None,
            },
        }
    }

    fn draw_shape(id: &str, text: &str) -> Shape {
        Shape {
            id: id.to_string(),
            kind: ShapeKind::Draw,
            props: ShapeProps {
                text: text.to_string(),
                start: None,
                end: None,
            },
        }
    }

    fn arrow_shape(id: &str, from: &str, to: &str, text: &str) -> Shape {
        Shape {
            id: id.to_string(),
            kind: ShapeKind::Arrow,
            props: ShapeProps {
                text: text.to_string(),
                start: Some(Terminal {
                    to_id: Some(from.to_string()),
                }),
                end: Some(Terminal {
                    to_id: Some(to.to_string()),
                }),
            },
        }
    }

    fn compile_shapes(shapes: Vec<Shape>) -> Result<Patch, PatchboardError> {
        let snapshot = Snapshot { shapes };
        compile(&snapshot, &snapshot, &CompileConfig::default())
    }

    fn unwrap_compile_error(err: PatchboardError) -> CompileError {
        match err {
            PatchboardError::Compile(err) => err,
            other => panic!("expected a compile error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_canvas() {
        let err = compile_shapes(Vec::new()).unwrap_err();
        assert!(err.is_empty_canvas());
    }

    #[test]
    fn test_sine_to_out() {
        let patch = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:wire", "shape:sine", "shape:out", ""),
        ])
        .expect("patch should compile");

        assert_eq!(patch.len(), 2);
        assert_eq!(patch.sink(), Id::new("shape:out"));
        assert_eq!(patch.root(), Id::new("shape:sine"));

        let sine = patch.node(Id::new("shape:sine")).expect("sine node");
        assert_eq!(sine.kind(), Id::new("sine"));
        assert_eq!(sine.inputs(), &[Input::Literal(440.0)]);

        let out = patch.node(patch.sink()).expect("sink node");
        assert_eq!(out.inputs(), &[Input::Wire(Id::new("shape:sine"))]);
        assert_eq!(out.in_labels(), &["sine 440 -> out".to_string()]);
    }

    #[test]
    fn test_named_inlet_overwrites_literal() {
        let patch = compile_shapes(vec![
            node_shape("shape:lfo", "sine 2"),
            node_shape("shape:lpf", "lpf 800 1"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:mod", "shape:lfo", "shape:lpf", "800"),
            arrow_shape("shape:wire", "shape:lpf", "shape:out", ""),
        ])
        .expect("patch should compile");

        let lpf = patch.node(Id::new("shape:lpf")).expect("lpf node");
        // Slot 0 (`800`) is overwritten by the wire; slot 1 keeps its
        // literal default.
        assert_eq!(
            lpf.inputs(),
            &[Input::Wire(Id::new("shape:lfo")), Input::Literal(1.0)]
        );
    }

    #[test]
    fn test_named_argument_inlet() {
        let patch = compile_shapes(vec![
            node_shape("shape:lfo", "sine 2"),
            node_shape("shape:lpf", "lpf cutoff 1"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:mod", "shape:lfo", "shape:lpf", "cutoff"),
            arrow_shape("shape:wire", "shape:lpf", "shape:out", ""),
        ])
        .expect("patch should compile");

        let lpf = patch.node(Id::new("shape:lpf")).expect("lpf node");
        assert_eq!(lpf.inputs()[0], Input::Wire(Id::new("shape:lfo")));
    }

    #[test]
    fn test_unknown_inlet() {
        let err = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:wire", "shape:sine", "shape:out", "frequency"),
        ])
        .unwrap_err();

        match unwrap_compile_error(err) {
            CompileError::UnknownInlet { inlet, kind, .. } => {
                assert_eq!(inlet, "frequency");
                assert_eq!(kind, Id::new("out"));
            }
            other => panic!("expected UnknownInlet, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_order_is_irrelevant() {
        let forward = vec![
            node_shape("shape:a", "sine 440"),
            node_shape("shape:b", "sine 2"),
            node_shape("shape:mul", "mul in gain"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:w1", "shape:a", "shape:mul", "in"),
            arrow_shape("shape:w2", "shape:b", "shape:mul", "gain"),
            arrow_shape("shape:w3", "shape:mul", "shape:out", ""),
        ];

        let mut reversed = forward.clone();
        reversed.reverse();

        let left = compile_shapes(forward).expect("forward order compiles");
        let right = compile_shapes(reversed).expect("reversed order compiles");

        assert_eq!(left, right);
    }

    #[test]
    fn test_draw_shapes_never_become_nodes() {
        let patch = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
            draw_shape("shape:doodle", "sine 880"),
            arrow_shape("shape:wire", "shape:sine", "shape:out", ""),
        ])
        .expect("patch should compile");

        assert_eq!(patch.len(), 2);
        assert!(patch.node(Id::new("shape:doodle")).is_none());
    }

    #[test]
    fn test_arrow_into_draw_shape_dangles() {
        let err = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
            draw_shape("shape:doodle", ""),
            arrow_shape("shape:w1", "shape:sine", "shape:out", ""),
            arrow_shape("shape:w2", "shape:sine", "shape:doodle", ""),
        ])
        .unwrap_err();

        match unwrap_compile_error(err) {
            CompileError::DanglingArrow { arrow } => {
                assert_eq!(arrow, Id::new("shape:w2"));
            }
            other => panic!("expected DanglingArrow, got {other:?}"),
        }
    }

    #[test]
    fn test_unbound_arrow_endpoint_dangles() {
        let mut arrow = arrow_shape("shape:w1", "shape:sine", "shape:out", "");
        arrow.props.end = Some(Terminal { to_id: None });

        let err = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
            arrow,
        ])
        .unwrap_err();

        assert!(matches!(
            unwrap_compile_error(err),
            CompileError::DanglingArrow { .. }
        ));
    }

    #[test]
    fn test_missing_sink() {
        let err = compile_shapes(vec![node_shape("shape:sine", "sine 440")]).unwrap_err();
        assert!(matches!(
            unwrap_compile_error(err),
            CompileError::MissingSink { .. }
        ));
    }

    #[test]
    fn test_multiple_sinks() {
        let err = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out1", "out"),
            node_shape("shape:out2", "out"),
            arrow_shape("shape:wire", "shape:sine", "shape:out1", ""),
        ])
        .unwrap_err();

        assert!(matches!(
            unwrap_compile_error(err),
            CompileError::MultipleSinks { .. }
        ));
    }

    #[test]
    fn test_unconnected_root() {
        let err = compile_shapes(vec![
            node_shape("shape:sine", "sine 440"),
            node_shape("shape:out", "out"),
        ])
        .unwrap_err();

        assert!(matches!(
            unwrap_compile_error(err),
            CompileError::UnconnectedRoot { .. }
        ));
    }

    #[test]
    fn test_inlet_collision() {
        let err = compile_shapes(vec![
            node_shape("shape:a", "sine 440"),
            node_shape("shape:b", "saw 110"),
            node_shape("shape:out", "out"),
            arrow_shape("shape:w1", "shape:a", "shape:out", ""),
            arrow_shape("shape:w2", "shape:b", "shape:out", ""),
        ])
        .unwrap_err();

        match unwrap_compile_error(err) {
            CompileError::InletCollision { node, slot, .. } => {
                assert_eq!(node, Id::new("shape:out"));
                assert_eq!(slot, 0);
            }
            other => panic!("expected InletCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_label_error_carries_shape_and_source() {
        let err = compile_shapes(vec![
            node_shape("shape:bad", "sine 4a"),
            node_shape("shape:out", "out"),
        ])
        .unwrap_err();

        match err {
            PatchboardError::Label { shape, src, .. } => {
                assert_eq!(shape, Id::new("shape:bad"));
                assert_eq!(src, "sine 4a");
            }
            other => panic!("expected a label error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_sink_type() {
        let snapshot = Snapshot {
            shapes: vec![
                node_shape("shape:sine", "sine 440"),
                node_shape("shape:dac", "dac"),
                arrow_shape("shape:wire", "shape:sine", "shape:dac", ""),
            ],
        };

        let patch = compile(&snapshot, &snapshot, &CompileConfig::new("dac"))
            .expect("patch should compile with a custom sink");
        assert_eq!(patch.sink(), Id::new("shape:dac"));
    }
}
