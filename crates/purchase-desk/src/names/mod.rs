//! Canonical handling of free-text human names: scrubbing, parsing into
//! structured parts, canonical rendering, and fuzzy roster matching.

pub mod canonical;
pub mod matcher;
pub mod parser;

pub use canonical::{first_last, first_last_with, normalize, normalize_with};
pub use matcher::{NameMatch, NameMatcher};
pub use parser::{HeuristicNameParser, NameParser, ParsedName};
