//! In-memory table of unit-normalized word embeddings, loaded from a
//! whitespace text file (`word v1 v2 .. vN` per line), plus brute-force
//! cosine nearest-neighbor search over the whole vocabulary.

use crate::vector::{dot, normalize};
use anyhow::Context;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct Embeddings {
    vectors: HashMap<String, Vec<f32>>,
    dims: usize, // established by the first loaded entry
}

impl Embeddings {
    /// Read word vectors from a text file - normalises vectors it reads to
    /// unit length.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Embeddings> {
        let path = path.as_ref();
        let file = fs::File::open(path)
            .with_context(|| format!("cannot open embeddings file '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Consume `word v1 v2 .. vN` lines, fields separated by single ASCII
    /// spaces. Parsing is permissive: a non-numeric field becomes NaN, a
    /// duplicate word overwrites the earlier entry, and per-line dimension
    /// is not checked against the first line's.
    pub fn from_reader(reader: impl BufRead) -> anyhow::Result<Embeddings> {
        let mut vectors: HashMap<String, Vec<f32>> = HashMap::new();
        let mut dims: usize = 0;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.context("failed to read embeddings line")?;
            let mut parts = line.split(' ');

            if let Some(key) = parts.next() {
                let values: Vec<f32> = parts
                    .map(|s| s.parse::<f32>().unwrap_or(f32::NAN))
                    .collect();

                if index == 0 {
                    // Dimensionality comes from the first entry
                    dims = values.len();
                }

                vectors.insert(key.to_string(), normalize(&values));
            }
        }

        Ok(Embeddings { vectors, dims })
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn has(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Rank the `n` entries most similar to `query` by cosine similarity,
    /// skipping any word in `exclude`. The query is normalized here and the
    /// stored vectors are already unit length, so the dot product is a
    /// genuine cosine. Scans the whole vocabulary - O(len) by design.
    pub fn nearest(
        &self,
        query: &[f32],
        n: usize,
        exclude: &HashSet<String>,
    ) -> Vec<(&str, f32)> {
        let query = normalize(query);

        let mut scores: Vec<(&str, f32)> = self
            .vectors
            .iter()
            .filter(|(word, _)| !exclude.contains(*word))
            .map(|(word, v)| (word.as_str(), dot(&query, v)))
            .collect();

        // Sort by score in descending order
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Take the top N results
        scores.truncate(n);

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::magnitude;
    use std::io::Cursor;
    use std::io::Write;

    const FIXTURE: &str = "king 0.5 0.5 0.0\n\
                           queen 0.5 -0.5 0.0\n\
                           man 0.0 0.5 0.5\n\
                           woman 0.0 -0.5 0.5\n\
                           cat 0.0 0.0 1.0";

    fn fixture() -> Embeddings {
        Embeddings::from_reader(Cursor::new(FIXTURE)).unwrap()
    }

    #[test]
    fn loads_all_entries_and_dims() {
        let emb = fixture();
        assert_eq!(emb.len(), 5);
        assert_eq!(emb.dims(), 3);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let emb = Embeddings::from_file(file.path()).unwrap();
        assert_eq!(emb.len(), 5);
        assert!(emb.has("queen"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Embeddings::from_file("/nonexistent/vectors.txt").is_err());
    }

    #[test]
    fn stored_vectors_are_unit_length() {
        let emb = fixture();
        let king = emb.get("king").unwrap();
        assert_eq!(king.len(), 3);
        assert!((magnitude(king) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn unknown_word_is_none() {
        let emb = fixture();
        assert_eq!(emb.get("dragon"), None);
        assert!(!emb.has("dragon"));
    }

    #[test]
    fn duplicate_word_last_occurrence_wins() {
        let data = "cat 1.0 0.0\ncat 0.0 1.0";
        let emb = Embeddings::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(emb.len(), 1);
        let cat = emb.get("cat").unwrap();
        assert!((cat[1] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn non_numeric_field_parses_to_nan() {
        let data = "junk 1.0 oops 0.0";
        let emb = Embeddings::from_reader(Cursor::new(data)).unwrap();
        assert!(emb.get("junk").unwrap()[1].is_nan());
    }

    #[test]
    fn nearest_ranks_the_word_itself_first() {
        let emb = fixture();
        let king = emb.get("king").unwrap().to_vec();
        let top = emb.nearest(&king, 3, &HashSet::new());
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, "king");
        assert!((top[0].1 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn nearest_is_sorted_descending() {
        let emb = fixture();
        let king = emb.get("king").unwrap().to_vec();
        let top = emb.nearest(&king, 5, &HashSet::new());
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn nearest_honors_exclusions() {
        let emb = fixture();
        let king = emb.get("king").unwrap().to_vec();
        let exclude: HashSet<String> = ["king".to_string()].into();
        let top = emb.nearest(&king, 5, &exclude);
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|(w, _)| *w != "king"));
    }

    #[test]
    fn nearest_tolerates_oversized_n() {
        let emb = fixture();
        let king = emb.get("king").unwrap().to_vec();
        assert_eq!(emb.nearest(&king, 100, &HashSet::new()).len(), 5);
    }

    #[test]
    fn nearest_with_zero_n_is_empty() {
        let emb = fixture();
        let king = emb.get("king").unwrap().to_vec();
        assert!(emb.nearest(&king, 0, &HashSet::new()).is_empty());
    }
}
