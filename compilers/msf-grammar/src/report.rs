use std::collections::BTreeMap;

use serde::Serialize;

use crate::driver::Annotation;

/// Per-run tally of accepted and rejected sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sentences: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Input blocks that could not be read as sentences.
    pub malformed: usize,
    /// Rejections per failure family (`TAM_UNTREATED`, `VER`, ...).
    pub by_kind: BTreeMap<String, usize>,
}

impl Summary {
    pub fn record(&mut self, annotation: &Annotation) {
        self.sentences += 1;
        match annotation.reason() {
            None => self.accepted += 1,
            Some(reason) => {
                self.rejected += 1;
                *self.by_kind.entry(reason.kind().to_string()).or_default() += 1;
            }
        }
    }

    pub fn record_malformed(&mut self) {
        self.malformed += 1;
    }
}

impl<'a> FromIterator<&'a Annotation> for Summary {
    fn from_iter<T: IntoIterator<Item = &'a Annotation>>(iter: T) -> Self {
        let mut summary = Summary::default();
        for annotation in iter {
            summary.record(annotation);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Annotator;
    use crate::testing::word;
    use msf_protocol::{Sentence, Upos};

    #[test]
    fn test_summary_counts_by_kind() {
        let annotator = Annotator::swedish();
        let annotations = vec![
            annotator.annotate(Sentence::new(vec![word(1, "Hej", "hej", Upos::Intj, 0, "root", "")])),
            annotator.annotate(Sentence::new(vec![
                word(1, "Hej", "hej", Upos::Intj, 0, "root", ""),
                word(2, "du", "du", Upos::Pron, 0, "root", ""),
            ])),
            annotator.annotate(Sentence::new(vec![word(1, "Hej", "hej", Upos::Intj, 1, "root", "")])),
        ];
        let summary: Summary = annotations.iter().collect();
        assert_eq!(summary.sentences, 3);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.by_kind.get("TREE"), Some(&2));
    }
}
