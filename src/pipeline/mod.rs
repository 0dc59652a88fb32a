// End-to-end flows: analogy resolution followed by per-candidate comparison.
//
// resolve -> for each candidate: fetch document -> extract features ->
// score + explain. Candidates are compared concurrently and independently;
// one candidate's failure only drops that candidate's comparison.

pub mod equivalents;
pub mod report;

pub use equivalents::EquivalenceEngine;
pub use report::{Equivalent, EquivalenceReport};
