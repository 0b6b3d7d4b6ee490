//! A single value slot on an element.

use gatework_core::{ElementId, PortDirection, PortId, Signal};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// Short list of port handles returned by propagation steps.
///
/// Most elements have one or two outputs, so four inline slots avoid a
/// heap allocation on the hot path.
pub type PortList = SmallVec<[PortId; 4]>;

/// An input or output port.
///
/// Ports are created dirty so the first propagation through their element
/// recomputes from defaults. The dirty flag is only cleared by the
/// propagation step that consumes it.
#[derive(Clone, Debug)]
pub struct Port<V> {
    value: V,
    dirty: bool,
    direction: PortDirection,
    owner: ElementId,
    index: usize,
    /// Inputs fed by this port. Always empty for inputs.
    targets: IndexSet<PortId>,
}

impl<V: Signal> Port<V> {
    pub(crate) fn new(owner: ElementId, index: usize, direction: PortDirection, value: V) -> Self {
        Self {
            value,
            dirty: true,
            direction,
            owner,
            index,
            targets: IndexSet::new(),
        }
    }

    /// Current signal value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Whether the value changed since it was last propagated.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Input or output.
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// The element this port belongs to.
    pub fn owner(&self) -> ElementId {
        self.owner
    }

    /// Position within the owner's inputs or outputs.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Inputs this output is wired to, in connection order.
    ///
    /// Empty for input ports; see `Circuit::targets` for the traversal
    /// view that also covers inputs.
    pub fn connected(&self) -> &IndexSet<PortId> {
        &self.targets
    }

    /// Store a value. Marks the port dirty if it differs from the old one;
    /// never clears an existing dirty flag.
    pub(crate) fn set_value(&mut self, value: V) {
        self.dirty |= self.value != value;
        self.value = value;
    }

    pub(crate) fn make_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag, returning its previous state.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn add_target(&mut self, target: PortId) {
        self.targets.insert(target);
    }

    pub(crate) fn remove_target(&mut self, target: PortId) {
        self.targets.shift_remove(&target);
    }
}
