use std::fs;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("vocabulary file not found or unreadable at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("vocabulary is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("vocabulary must be a JSON object mapping words to lists of replacements")]
    NotAnObject,
    #[error("could not build a matcher for '{word}': {source}")]
    Pattern {
        word: String,
        #[source]
        source: regex::Error,
    },
}

struct Entry {
    word: String,
    replacement: String,
    pattern: Regex,
}

/// Word-to-pronunciation substitutions applied to text before synthesis.
///
/// Matching is whole-word and case-sensitive; longer words are replaced
/// before shorter ones so a word never clobbers part of a longer phrase.
pub struct PronunciationVocabulary {
    entries: Vec<Entry>,
}

impl PronunciationVocabulary {
    /// Parses `{"word": ["replacement", ...], ...}`. Only the first candidate
    /// of each list is used; entries without a string first candidate are skipped.
    /// Words of equal length are applied in file order.
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let value: Value = serde_json::from_str(json).map_err(VocabularyError::Parse)?;
        let map = match value {
            Value::Object(map) => map,
            _ => return Err(VocabularyError::NotAnObject),
        };
        Self::from_map(map)
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let json = fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_pairs<I, W, R>(pairs: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (W, R)>,
        W: Into<String>,
        R: Into<String>,
    {
        let mut entries = pairs
            .into_iter()
            .map(|(w, r)| Entry::new(w.into(), r.into()))
            .collect::<Result<Vec<_>, _>>()?;
        // Stable sort: equal lengths keep their input order.
        entries.sort_by_key(|e| std::cmp::Reverse(e.word.chars().count()));
        Ok(Self { entries })
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, VocabularyError> {
        let pairs = map.into_iter().filter_map(|(word, candidates)| {
            let first = candidates.as_array()?.first()?.as_str()?.to_string();
            Some((word, first))
        });
        Self::from_pairs(pairs)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in the order they are applied.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in &self.entries {
            let replaced = entry
                .pattern
                .replace_all(&result, NoExpand(&entry.replacement))
                .into_owned();
            result = replaced;
        }
        result
    }
}

impl Entry {
    fn new(word: String, replacement: String) -> Result<Self, VocabularyError> {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&word))).map_err(|source| {
            VocabularyError::Pattern {
                word: word.clone(),
                source,
            }
        })?;
        Ok(Self {
            word,
            replacement,
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_replaces_whole_words_only() {
        let vocab = PronunciationVocabulary::from_pairs([("Roma", "Rrooma")]).unwrap();
        assert_eq!(vocab.apply("Roma e Romano"), "Rrooma e Romano");
    }

    #[test]
    fn test_case_sensitive() {
        let vocab = PronunciationVocabulary::from_pairs([("Roma", "Rrooma")]).unwrap();
        assert_eq!(vocab.apply("roma"), "roma");
    }

    #[test]
    fn test_longest_key_applied_first() {
        let vocab = PronunciationVocabulary::from_pairs([
            ("San", "Sann"),
            ("San Pietro", "Sampietro"),
        ])
        .unwrap();
        assert_eq!(vocab.words().collect::<Vec<_>>(), vec!["San Pietro", "San"]);
        assert_eq!(vocab.apply("San Pietro e San Marco"), "Sampietro e Sann Marco");
    }

    #[test]
    fn test_unknown_words_pass_through() {
        let vocab = PronunciationVocabulary::from_pairs([("Kyrie", "Chirie")]).unwrap();
        assert_eq!(vocab.apply("Gloria in excelsis"), "Gloria in excelsis");
    }

    #[test]
    fn test_regex_characters_are_literal() {
        let vocab = PronunciationVocabulary::from_pairs([("a.b", "x")]).unwrap();
        assert_eq!(vocab.apply("a.b e acb"), "x e acb");
    }

    #[test]
    fn test_replacement_is_not_expanded() {
        let vocab = PronunciationVocabulary::from_pairs([("prezzo", "$1 euro")]).unwrap();
        assert_eq!(vocab.apply("il prezzo"), "il $1 euro");
    }

    #[test]
    fn test_unicode_word_boundaries() {
        let vocab = PronunciationVocabulary::from_pairs([("più", "pjù")]).unwrap();
        assert_eq!(vocab.apply("di più, piùttosto"), "di pjù, piùttosto");
    }

    #[test]
    fn test_json_uses_first_candidate_and_skips_invalid() {
        let json = r#"{
            "Gesù": ["Gesú", "Jesus"],
            "vuoto": [],
            "numero": [42],
            "stringa": "non una lista"
        }"#;
        let vocab = PronunciationVocabulary::from_json_str(json).unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.apply("Gesù disse"), "Gesú disse");
    }

    #[test]
    fn test_json_equal_length_keys_follow_file_order() {
        let vocab = PronunciationVocabulary::from_json_str(r#"{"b c": ["X"], "a b": ["Y"]}"#)
            .unwrap();
        assert_eq!(vocab.words().collect::<Vec<_>>(), vec!["b c", "a b"]);
        assert_eq!(vocab.apply("a b c"), "a X");

        let reversed =
            PronunciationVocabulary::from_json_str(r#"{"a b": ["Y"], "b c": ["X"]}"#).unwrap();
        assert_eq!(reversed.apply("a b c"), "Y c");
    }

    #[test]
    fn test_json_must_be_object() {
        let result = PronunciationVocabulary::from_json_str("[1, 2]");
        assert!(matches!(result, Err(VocabularyError::NotAnObject)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = PronunciationVocabulary::from_json_str("{not json");
        assert!(matches!(result, Err(VocabularyError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocabolario.json");
        fs::write(&path, r#"{"Amen": ["Ammen"]}"#).unwrap();
        let vocab = PronunciationVocabulary::load(&path).unwrap();
        assert_eq!(vocab.apply("Amen."), "Ammen.");
    }

    #[test]
    fn test_load_missing_file() {
        let result = PronunciationVocabulary::load(Path::new("/nonexistent/vocabolario.json"));
        assert!(matches!(result, Err(VocabularyError::Read { .. })));
    }
}
