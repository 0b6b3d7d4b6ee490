//! Ready-made composite elements for Gatework circuits.
//!
//! [`CompositeFactory`] assembles gates, buses and wiring into composites
//! that hide their interior behind an input bus and an output bus:
//!
//! | Builder | Inputs | Outputs | Interior |
//! |---------|--------|---------|----------|
//! | [`not_or`](CompositeFactory::not_or) | n | 1 | OR(n) → NOT |
//! | [`not_and`](CompositeFactory::not_and) | n | 1 | AND(n) → NOT |
//! | [`xor`](CompositeFactory::xor) | n | 1 | OR(n) ∧ ¬AND(n) |
//! | [`rs_trigger_nor`](CompositeFactory::rs_trigger_nor) | 2 (R, S) | 2 (Q, ¬Q) | two cross-coupled NORs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod factory;

pub use error::BuildError;
pub use factory::CompositeFactory;
