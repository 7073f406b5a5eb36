#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use types::{Corpus, Entry, Hit, MatchResult, Method};
