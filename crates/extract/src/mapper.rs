//! Turns the model's `[{label, text}]` answer into character-offset spans.
//!
//! Each entity's text is located at its first literal occurrence in the
//! source. Labels are not checked against the taxonomy and overlapping or
//! repeated spans are emitted as-is.

use crate::error::Result;
use crate::schema::{AnnotationSpan, ExtractedEntity};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapOutcome {
    pub spans: Vec<AnnotationSpan>,
    /// Entities with a missing or empty `label` or `text`.
    pub skipped: usize,
    /// Entities whose text does not appear verbatim in the source.
    pub unmatched: usize,
}

pub fn parse_entities(raw: &str) -> Result<Vec<ExtractedEntity>> {
    Ok(serde_json::from_str(raw)?)
}

/// Offset of the first occurrence of `needle`, counted in chars.
pub fn find_char_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

pub fn map_entities(entities: Vec<ExtractedEntity>, source: &str) -> MapOutcome {
    let mut outcome = MapOutcome::default();

    for entity in entities {
        let (label, text) = match (entity.label, entity.text) {
            (Some(label), Some(text)) if !label.is_empty() && !text.is_empty() => (label, text),
            _ => {
                outcome.skipped += 1;
                continue;
            }
        };

        let Some(start) = find_char_offset(source, &text) else {
            outcome.unmatched += 1;
            continue;
        };

        outcome.spans.push(AnnotationSpan {
            start,
            end: start + text.chars().count(),
            text,
            labels: vec![label],
        });
    }

    outcome
}

/// Parse then map. Parse errors propagate.
pub fn map_response(raw: &str, source: &str) -> Result<MapOutcome> {
    let entities = parse_entities(raw)?;
    Ok(map_entities(entities, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NerError;

    const SOURCE: &str = "tài xế Nguyễn Văn A điều khiển xe máy";

    #[test]
    fn test_offsets_are_character_based() {
        let raw = r#"[{"label":"PER_DRIVER","text":"tài xế"}, {"label":"VEH","text":"xe máy"}]"#;
        let outcome = map_response(raw, SOURCE).unwrap();

        assert_eq!(outcome.spans.len(), 2);
        assert_eq!(outcome.spans[0].start, 0);
        assert_eq!(outcome.spans[0].end, 6);
        assert_eq!(outcome.spans[0].labels, ["PER_DRIVER"]);

        let veh = &outcome.spans[1];
        assert_eq!(veh.start, 31);
        assert_eq!(veh.end, veh.start + 6);
        let located: String = SOURCE.chars().skip(veh.start).take(veh.end - veh.start).collect();
        assert_eq!(located, "xe máy");
    }

    #[test]
    fn test_hallucinated_text_is_dropped() {
        let raw = r#"[
            {"label":"LOC","text":"Quốc lộ 1A"},
            {"label":"VEH","text":"xe máy"}
        ]"#;
        let outcome = map_response(raw, SOURCE).unwrap();

        assert_eq!(outcome.unmatched, 1);
        assert_eq!(outcome.spans.len(), 1);
        assert_eq!(outcome.spans[0].text, "xe máy");
    }

    #[test]
    fn test_incomplete_entities_are_skipped() {
        let raw = r#"[
            {"label":"VEH"},
            {"text":"tài xế"},
            {"label":"","text":"tài xế"},
            {"label":"PER_DRIVER","text":""},
            {"label":null,"text":"xe máy"},
            {"label":"PER_DRIVER","text":"tài xế"}
        ]"#;
        let outcome = map_response(raw, SOURCE).unwrap();

        assert_eq!(outcome.skipped, 5);
        assert_eq!(outcome.unmatched, 0);
        assert_eq!(outcome.spans.len(), 1);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let outcome = map_response(r#"[{"label":"VEH","text":"Xe máy"}]"#, SOURCE).unwrap();
        assert!(outcome.spans.is_empty());
        assert_eq!(outcome.unmatched, 1);
    }

    #[test]
    fn test_repeated_text_maps_to_first_occurrence() {
        let source = "xe tải tông xe tải";
        let raw = r#"[{"label":"VEH","text":"xe tải"},{"label":"VEH","text":"xe tải"}]"#;
        let outcome = map_response(raw, source).unwrap();

        assert_eq!(outcome.spans.len(), 2);
        assert_eq!(outcome.spans[0], outcome.spans[1]);
        assert_eq!(outcome.spans[1].start, 0);
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        let outcome = map_response(r#"[{"label":"WEATHER","text":"xe máy"}]"#, SOURCE).unwrap();
        assert_eq!(outcome.spans[0].labels, ["WEATHER"]);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(map_response("not json", SOURCE), Err(NerError::Parse(_))));
        assert!(matches!(
            map_response(r#"{"label":"VEH","text":"xe máy"}"#, SOURCE),
            Err(NerError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_array_yields_no_spans() {
        assert_eq!(map_response("[]", SOURCE).unwrap(), MapOutcome::default());
    }
}
