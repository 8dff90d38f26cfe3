//! # Utilities
//!
//! Small pieces of behavior shared across modules that don't belong to any
//! one of them.

/// Returns the most similar string to `model` in `all`, by Damerau-Levenshtein
/// distance. Used to suggest a close role or player-type name when a client
/// or operator typos one. Assumes `all` is not empty.
pub fn most_similar(model: &str, all: &[&str]) -> String {
    all.iter()
        .min_by_key(|candidate| strsim::damerau_levenshtein(model, candidate))
        .expect("all must be non-empty")
        .to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_the_closest_match() {
        assert_eq!(most_similar("robto", &["human", "robot", "random"]), "robot");
    }
}
