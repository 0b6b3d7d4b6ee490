//! Value and plugin traits: [`Signal`] and [`Gate`].

use std::fmt;

/// A value that can travel over a wire.
///
/// Gates never inspect values directly; AND, OR and NOT delegate to the
/// value type. `bool` is the reference implementation. The unsigned
/// integer implementations are bitwise, so each bit lane simulates an
/// independent boolean circuit.
///
/// Equality drives dirty tracking: a port only becomes dirty when the
/// new value compares unequal to the old one.
pub trait Signal: Clone + PartialEq + fmt::Debug + 'static {
    /// Logical conjunction of two values.
    fn and(&self, rhs: &Self) -> Self;

    /// Logical disjunction of two values.
    fn or(&self, rhs: &Self) -> Self;

    /// Logical negation.
    fn negate(&self) -> Self;
}

impl Signal for bool {
    fn and(&self, rhs: &Self) -> Self {
        *self && *rhs
    }

    fn or(&self, rhs: &Self) -> Self {
        *self || *rhs
    }

    fn negate(&self) -> Self {
        !*self
    }
}

macro_rules! bitwise_signal {
    ($($t:ty),*) => {
        $(
            impl Signal for $t {
                fn and(&self, rhs: &Self) -> Self {
                    *self & *rhs
                }

                fn or(&self, rhs: &Self) -> Self {
                    *self | *rhs
                }

                fn negate(&self) -> Self {
                    !*self
                }
            }
        )*
    };
}

bitwise_signal!(u8, u16, u32, u64);

/// A user-defined atomic element.
///
/// Registered with a circuit through `Circuit::add_gate`. The circuit
/// allocates `input_count()` inputs and `output_count()` outputs and calls
/// [`evaluate`](Gate::evaluate) whenever one of the inputs is propagated.
///
/// # Contract
///
/// - `evaluate()` recomputes every output from the full input slice; it
///   is not told which input changed.
/// - `input_count()` and `output_count()` are read once, at registration.
///
/// # Examples
///
/// A two-input exclusive-or:
///
/// ```
/// use gatework_core::Gate;
///
/// struct Xor;
///
/// impl Gate<bool> for Xor {
///     fn name(&self) -> &str { "xor" }
///     fn input_count(&self) -> usize { 2 }
///     fn output_count(&self) -> usize { 1 }
///     fn evaluate(&self, inputs: &[bool], outputs: &mut [bool]) {
///         outputs[0] = inputs[0] != inputs[1];
///     }
/// }
///
/// let mut out = [false];
/// Xor.evaluate(&[true, false], &mut out);
/// assert!(out[0]);
/// ```
pub trait Gate<V> {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Number of inputs the gate reads.
    fn input_count(&self) -> usize;

    /// Number of outputs the gate writes.
    fn output_count(&self) -> usize;

    /// Recompute `outputs` from `inputs`.
    ///
    /// `outputs` holds the current output values on entry, so a gate
    /// may leave some of them untouched.
    fn evaluate(&self, inputs: &[V], outputs: &mut [V]);
}
