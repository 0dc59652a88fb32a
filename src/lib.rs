// Crossover: cross-genre artist equivalents
//
// This is the library root. Each module corresponds to one stage of the
// resolve -> extract -> score -> explain flow, plus the ports it talks to.

pub mod analogy;
pub mod config;
pub mod deadline;
pub mod documents;
pub mod explain;
pub mod features;
pub mod index;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod similarity;
