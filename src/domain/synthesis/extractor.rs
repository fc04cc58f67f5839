//! JSON extraction and repair for oracle replies.
//!
//! Oracle output is untrusted free text that should carry one JSON object.
//! Recovery runs in a fixed order:
//!
//! 1. Labeled sections (`LABEL: {json} MESSAGE: text`) are split on the
//!    trailing label when both labels are present.
//! 2. A leading or trailing code fence is stripped.
//! 3. The outermost `{` ... `}` span is taken as the candidate.
//! 4. Commas directly before `}` or `]` are dropped outside of strings.
//! 5. The candidate is parsed strictly.

use serde_json::Value;

use super::errors::ExtractionError;

/// Labels of the `LABEL: {json}\nMESSAGE: text` reply convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLabels {
    pub leading: &'static str,
    pub trailing: &'static str,
}

impl SectionLabels {
    pub const fn new(leading: &'static str, trailing: &'static str) -> Self {
        Self { leading, trailing }
    }
}

/// A document recovered from oracle text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub document: Value,
    /// Human-readable text that followed the trailing label, if any.
    pub message: Option<String>,
}

/// Recovers JSON documents from oracle replies.
#[derive(Debug, Clone, Copy)]
pub struct DocumentExtractor {
    labels: Option<SectionLabels>,
}

impl DocumentExtractor {
    /// Extractor that also understands the given labeled-section convention.
    pub fn new(labels: SectionLabels) -> Self {
        Self {
            labels: Some(labels),
        }
    }

    /// Extractor for replies that are expected to be bare JSON.
    pub fn unlabeled() -> Self {
        Self { labels: None }
    }

    /// Extracts one JSON object from `raw`.
    ///
    /// # Errors
    ///
    /// - `MalformedDocument` when no brace span exists
    /// - `JsonParseError` when the span does not parse after repair
    pub fn extract(&self, raw: &str) -> Result<ExtractedDocument, ExtractionError> {
        let (body, message) = self.split_sections(raw.trim());
        let body = strip_fence(body);
        let candidate = outermost_object(body).ok_or(ExtractionError::MalformedDocument)?;
        let repaired = remove_trailing_commas(candidate);

        let document: Value =
            serde_json::from_str(&repaired).map_err(|e| ExtractionError::JsonParseError {
                message: e.to_string(),
                candidate: candidate.to_string(),
            })?;

        Ok(ExtractedDocument {
            document,
            message: message.map(str::to_string),
        })
    }

    fn split_sections<'a>(&self, raw: &'a str) -> (&'a str, Option<&'a str>) {
        let Some(labels) = self.labels else {
            return (raw, None);
        };
        if !raw.contains(labels.leading) || !raw.contains(labels.trailing) {
            return (raw, None);
        }
        let Some((before, after)) = raw.split_once(labels.trailing) else {
            return (raw, None);
        };

        let body = match before.find(labels.leading) {
            Some(pos) => &before[pos + labels.leading.len()..],
            None => before,
        };
        let message = after.trim();
        let message = (!message.is_empty()).then_some(message);

        (body.trim(), message)
    }
}

/// Strips one leading ```` ```json ```` / ```` ``` ```` marker and one trailing
/// ```` ``` ```` marker.
fn strip_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Greedy span from the first `{` to the last `}`.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Drops commas that directly precede `}` or `]`, ignoring string contents.
fn remove_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if closes_next(&chars[i + 1..]) => {}
            _ => out.push(c),
        }
    }

    out
}

fn closes_next(rest: &[char]) -> bool {
    rest.iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| matches!(c, '}' | ']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const PLAN: SectionLabels = SectionLabels::new("PROJECT_PLAN:", "MESSAGE:");

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::new(PLAN)
    }

    mod labeled_sections {
        use super::*;

        #[test]
        fn splits_document_and_message() {
            let raw = "PROJECT_PLAN: {\"name\": \"Courier\"}\nMESSAGE: Added a courier app.";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"name": "Courier"}));
            assert_eq!(extracted.message.as_deref(), Some("Added a courier app."));
        }

        #[test]
        fn fenced_json_inside_labels() {
            let raw = "PROJECT_PLAN: ```json\n{\"a\": [1, 2]}\n```\nMESSAGE: done";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": [1, 2]}));
            assert_eq!(extracted.message.as_deref(), Some("done"));
        }

        #[test]
        fn empty_message_is_absent() {
            let raw = "PROJECT_PLAN: {\"a\": 1}\nMESSAGE:   ";
            let extracted = extractor().extract(raw).unwrap();
            assert!(extracted.message.is_none());
        }

        #[test]
        fn trailing_label_alone_falls_back_to_brace_span() {
            let raw = "Here you go {\"a\": 1} MESSAGE: hi";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": 1}));
            assert!(extracted.message.is_none());
        }

        #[test]
        fn unlabeled_extractor_ignores_labels() {
            let raw = "PROJECT_PLAN: {\"a\": 1}\nMESSAGE: text";
            let extracted = DocumentExtractor::unlabeled().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": 1}));
            assert!(extracted.message.is_none());
        }
    }

    mod brace_span {
        use super::*;

        #[test]
        fn prose_around_object_is_ignored() {
            let raw = "Sure! Here is the plan:\n{\"a\": {\"b\": 2}}\nLet me know.";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": {"b": 2}}));
        }

        #[test]
        fn no_braces_is_malformed() {
            let result = extractor().extract("I cannot help with that.");
            assert_eq!(result, Err(ExtractionError::MalformedDocument));
        }

        #[test]
        fn empty_reply_is_malformed() {
            assert_eq!(
                extractor().extract(""),
                Err(ExtractionError::MalformedDocument)
            );
        }

        #[test]
        fn reversed_braces_are_malformed() {
            assert_eq!(
                extractor().extract("} nothing here {"),
                Err(ExtractionError::MalformedDocument)
            );
        }

        #[test]
        fn unparseable_span_reports_candidate() {
            let result = extractor().extract("text {\"a\": } more");
            match result {
                Err(ExtractionError::JsonParseError { candidate, message }) => {
                    assert_eq!(candidate, "{\"a\": }");
                    assert!(!message.is_empty());
                }
                other => panic!("expected parse error, got {:?}", other),
            }
        }
    }

    mod repair {
        use super::*;

        #[test]
        fn trailing_commas_are_removed() {
            let raw = "{\"a\": [1, 2,], \"b\": {\"c\": 3,},}";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": [1, 2], "b": {"c": 3}}));
        }

        #[test]
        fn commas_inside_strings_survive() {
            let raw = "{\"a\": \"x,}\", \"b\": \"y,]\"}";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": "x,}", "b": "y,]"}));
        }

        #[test]
        fn escaped_quotes_do_not_end_strings() {
            let raw = "{\"a\": \"say \\\",}\\\" now\",}";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": "say \",}\" now"}));
        }

        #[test]
        fn fence_without_language_is_stripped() {
            let raw = "```\n{\"a\": 1}\n```";
            let extracted = extractor().extract(raw).unwrap();
            assert_eq!(extracted.document, json!({"a": 1}));
        }
    }

    fn json_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-zA-Z0-9 ,:{}\\[\\]]{0,12}".prop_map(Value::from),
        ]
    }

    fn json_object() -> impl Strategy<Value = Value> {
        let value = json_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        });
        prop::collection::btree_map("[a-z_]{1,8}", value, 1..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    /// Inserts a comma before the final closing brace.
    fn with_trailing_comma(json: &str) -> String {
        let end = json.len() - 1;
        format!("{},{}", &json[..end], &json[end..])
    }

    proptest! {
        #[test]
        fn recovers_objects_from_wrapped_replies(
            doc in json_object(),
            fenced in any::<bool>(),
            labeled in any::<bool>(),
            trailing_comma in any::<bool>(),
        ) {
            let mut body = serde_json::to_string_pretty(&doc).unwrap();
            if trailing_comma {
                body = with_trailing_comma(&body);
            }
            if fenced {
                body = format!("```json\n{}\n```", body);
            }
            let raw = if labeled {
                format!("PROJECT_PLAN: {}\nMESSAGE: Updated.", body)
            } else {
                format!("Here is the result:\n{}\nThanks.", body)
            };

            let extracted = extractor().extract(&raw).unwrap();
            prop_assert_eq!(extracted.document, doc);
        }
    }
}
