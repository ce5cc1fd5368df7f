//! Keyword validation and case-insensitive substring matching.

use crate::error::ScanError;

#[derive(Debug, Clone)]
struct Keyword {
    original: String,
    pattern: String,
}

/// A validated, non-empty keyword list.
///
/// Keywords keep their caller order and original spelling; duplicates are
/// not removed here.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Validate `keywords`: the list must be non-empty and no entry may be
    /// blank after trimming.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, ScanError> {
        if keywords.is_empty() {
            return Err(ScanError::NoKeywords);
        }

        let keywords = keywords
            .iter()
            .enumerate()
            .map(|(index, keyword)| {
                let original = keyword.as_ref();
                let pattern = original.trim().to_lowercase();
                if pattern.is_empty() {
                    return Err(ScanError::EmptyKeyword { index });
                }
                Ok(Keyword {
                    original: original.to_string(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keywords })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords whose lowercased form occurs in the lowercased `text`, in list order.
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| haystack.contains(&keyword.pattern))
            .map(|keyword| keyword.original.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_rejected() {
        let keywords: [&str; 0] = [];
        assert_eq!(KeywordSet::new(&keywords).unwrap_err(), ScanError::NoKeywords);
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let err = KeywordSet::new(&["news", "   "]).unwrap_err();
        assert_eq!(err, ScanError::EmptyKeyword { index: 1 });
    }

    #[test]
    fn test_case_insensitive_substring() {
        let set = KeywordSet::new(&["NEWS", "offers", " Premium "]).unwrap();
        assert_eq!(
            set.find_matches("Subscribe to Newsletter and premium plans"),
            vec!["NEWS".to_string(), " Premium ".to_string()]
        );
    }

    #[test]
    fn test_all_matches_recorded() {
        let set = KeywordSet::new(&["sport", "sports", "sport"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.find_matches("Sports package").len(), 3);
    }

    #[test]
    fn test_no_match_on_empty_text() {
        let set = KeywordSet::new(&["a"]).unwrap();
        assert!(set.find_matches("").is_empty());
    }
}
