use msf_conllu::{annotated_to_string, write_rejected, ConlluReader};
use msf_grammar::{Annotation, Annotator, Summary};
use msf_lexicon::Lexicon;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One sentence as sent back to JavaScript.
#[derive(Serialize)]
pub struct SentenceReport {
    pub sent_id: Option<String>,
    pub accepted: bool,
    /// Failure code of a rejected sentence.
    pub error: Option<String>,
    /// The sentence re-serialized, with the derived column when accepted.
    pub conllu: String,
}

#[derive(Serialize)]
pub struct AnnotationReport {
    pub sentences: Vec<SentenceReport>,
    /// Reader errors, one per skipped block.
    pub parse_errors: Vec<String>,
    pub summary: Summary,
}

impl From<&Annotation> for SentenceReport {
    fn from(annotation: &Annotation) -> Self {
        let sentence = annotation.sentence();
        let (error, conllu) = match annotation {
            Annotation::Accepted { sentence, features } => (None, annotated_to_string(sentence, features)),
            Annotation::Rejected { sentence, reason } => {
                let code = reason.code();
                let mut buf = Vec::new();
                // Writing into a Vec cannot fail.
                let _ = write_rejected(&mut buf, sentence, &code);
                (Some(code), String::from_utf8_lossy(&buf).into_owned())
            }
        };
        Self {
            sent_id: sentence.sent_id().map(str::to_string),
            accepted: annotation.is_accepted(),
            error,
            conllu,
        }
    }
}

/// The annotator instance living in the browser.
#[wasm_bindgen]
pub struct MsfEngine {
    annotator: Annotator,
}

impl Default for MsfEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MsfEngine {
    /// Engine with the built-in Swedish tables.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            annotator: Annotator::swedish(),
        }
    }

    /// Engine with tables loaded from JSON (as written by `msf-annotate tables dump`).
    #[wasm_bindgen(js_name = withTables)]
    pub fn with_tables(json: &str) -> Result<MsfEngine, JsValue> {
        let lexicon = Lexicon::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            annotator: Annotator::new(lexicon),
        })
    }

    /// CoNLL-U text -> annotated sentences + summary
    pub fn annotate(&self, conllu: &str) -> Result<JsValue, JsValue> {
        let report = self.report(conllu);
        serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl MsfEngine {
    pub fn report(&self, conllu: &str) -> AnnotationReport {
        let mut sentences = Vec::new();
        let mut parse_errors = Vec::new();
        let mut summary = Summary::default();

        for item in ConlluReader::new(conllu.as_bytes()) {
            match item {
                Ok(sentence) => {
                    let annotation = self.annotator.annotate(sentence);
                    summary.record(&annotation);
                    sentences.push(SentenceReport::from(&annotation));
                }
                Err(err) => {
                    summary.record_malformed();
                    parse_errors.push(err.to_string());
                }
            }
        }

        AnnotationReport {
            sentences,
            parse_errors,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
# sent_id = a
1\tHon\thon\tPRON\t_\t_\t3\tnsubj\t_\t_
2\thar\tha\tAUX\t_\tMood=Ind|Tense=Pres|VerbForm=Fin\t3\taux\t_\t_
3\tläst\tläsa\tVERB\t_\tVerbForm=Sup\t0\troot\t_\t_

# sent_id = b
1\tpå\tpå\tADP\t_\t_\t2\tcase\t_\t_
2\tspringa\tspringa\tVERB\t_\tVerbForm=Inf\t0\troot\t_\t_

# sent_id = c
1\tx\tx\tNOPE\t_\t_\t0\troot\t_\t_
";

    #[test]
    fn test_report_covers_every_block() {
        let report = MsfEngine::new().report(INPUT);

        assert_eq!(report.sentences.len(), 2);
        assert_eq!(report.parse_errors.len(), 1);
        assert_eq!(report.summary.accepted, 1);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.malformed, 1);

        let accepted = &report.sentences[0];
        assert_eq!(accepted.sent_id.as_deref(), Some("a"));
        assert!(accepted.conllu.contains("\tAspect=Perf|Mood=Ind|Polarity=Pos|Tense=Pres|VerbForm=Fin|Voice=Act"));

        let rejected = &report.sentences[1];
        assert_eq!(rejected.error.as_deref(), Some("REL_CASE_VERB_1->2"));
        assert!(rejected.conllu.starts_with("# error_type = REL_CASE_VERB_1->2\n"));
    }
}
