pub mod matcher;
pub mod similarity;

pub use matcher::{
    MatchCancelled, MatchCandidate, MatchOptions, MatchRecord, MatchWeights, find_best_matches,
};
pub use similarity::{normalize_email, normalize_name, normalize_phone, similarity};
