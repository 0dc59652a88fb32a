// Language model access — text generation and model-backed feature extraction.
//
// TextGenerator is the only seam to the model. The chat completions client
// implements it for hosted APIs; OfflineGenerator stands in when no key is
// configured so every caller falls back deterministically.

pub mod client;
pub mod extractor;
pub mod traits;
