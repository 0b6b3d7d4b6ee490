//! Element variants and the composite boundary descriptor.

use std::fmt;

use gatework_core::{ElementId, Gate, PortId};
use smallvec::SmallVec;

/// What an element computes.
///
/// Dispatch is a single `match` in `Circuit`'s evaluation step; there is
/// no per-kind trait object except for plugin gates.
pub enum ElementKind<V> {
    /// One output, the conjunction of every input.
    And,
    /// One output, the disjunction of every input.
    Or,
    /// One input, one output, negated.
    Not,
    /// N independent identity channels: `outputs[i] = inputs[i]`.
    Bus,
    /// A user-supplied atomic gate.
    Custom(Box<dyn Gate<V>>),
    /// A sub-circuit hidden behind an input bus and an output bus.
    Composite(CompositeElement),
}

impl<V> ElementKind<V> {
    /// Short lowercase name, used in logs and error messages.
    pub fn name(&self) -> &str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Bus => "bus",
            Self::Custom(gate) => gate.name(),
            Self::Composite(_) => "composite",
        }
    }
}

impl<V> fmt::Debug for ElementKind<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("And"),
            Self::Or => f.write_str("Or"),
            Self::Not => f.write_str("Not"),
            Self::Bus => f.write_str("Bus"),
            Self::Custom(gate) => f.debug_tuple("Custom").field(&gate.name()).finish(),
            Self::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
        }
    }
}

/// Boundary and lifecycle state of a composite element.
///
/// The composite's inputs are the input bus's inputs and its outputs are
/// the output bus's outputs. Everything wired between the two buses is
/// internal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeElement {
    input_bus: ElementId,
    output_bus: ElementId,
    initialized: bool,
}

impl CompositeElement {
    pub(crate) fn new(input_bus: ElementId, output_bus: ElementId) -> Self {
        Self {
            input_bus,
            output_bus,
            initialized: false,
        }
    }

    /// The bus whose inputs are the composite's inputs.
    pub fn input_bus(&self) -> ElementId {
        self.input_bus
    }

    /// The bus whose outputs are the composite's outputs.
    pub fn output_bus(&self) -> ElementId {
        self.output_bus
    }

    /// Whether the reset-then-propagate pass has run. One-way.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

/// A unit of logic with fixed input and output ports.
#[derive(Debug)]
pub struct Element<V> {
    kind: ElementKind<V>,
    inputs: SmallVec<[PortId; 4]>,
    outputs: SmallVec<[PortId; 4]>,
}

impl<V> Element<V> {
    pub(crate) fn new(
        kind: ElementKind<V>,
        inputs: SmallVec<[PortId; 4]>,
        outputs: SmallVec<[PortId; 4]>,
    ) -> Self {
        Self {
            kind,
            inputs,
            outputs,
        }
    }

    /// The element's variant.
    pub fn kind(&self) -> &ElementKind<V> {
        &self.kind
    }

    /// Input ports, in index order.
    pub fn inputs(&self) -> &[PortId] {
        &self.inputs
    }

    /// Output ports, in index order.
    pub fn outputs(&self) -> &[PortId] {
        &self.outputs
    }

    /// `true` for every kind except [`ElementKind::Composite`].
    pub fn is_atomic(&self) -> bool {
        !self.is_composite()
    }

    /// `true` for [`ElementKind::Composite`].
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, ElementKind::Composite(_))
    }

    /// Composite state, if this is a composite.
    pub fn as_composite(&self) -> Option<&CompositeElement> {
        match &self.kind {
            ElementKind::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_composite_mut(&mut self) -> Option<&mut CompositeElement> {
        match &mut self.kind {
            ElementKind::Composite(c) => Some(c),
            _ => None,
        }
    }
}
