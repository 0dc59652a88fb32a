// Natural-language explanations of equivalences.

pub mod composer;

pub use composer::ExplanationComposer;
