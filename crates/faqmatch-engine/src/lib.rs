//! faqmatch-engine
//!
//! Ties the two strategies together behind [`FaqEngine`]: strategy selection
//! by [`Method`](faqmatch_core::Method), the semantic matcher and the
//! threshold policy that turns a best hit into a [`MatchResult`](faqmatch_core::MatchResult).

pub mod bootstrap;
pub mod engine;
pub mod policy;
pub mod semantic;

pub use bootstrap::{build_engine, load_corpus};
pub use engine::FaqEngine;
pub use policy::ThresholdPolicy;
pub use semantic::SemanticMatcher;
