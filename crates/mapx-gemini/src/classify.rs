//! Classification of raw Gemini responses into `mapx_core` domain types.
//!
//! This is the only place that inspects raw grounding records. Each record
//! becomes a [`GroundingCitation::Maps`] or [`GroundingCitation::Web`], or is
//! dropped when it carries neither descriptor.

use mapx_core::{GroundingCitation, MapsCitation, PlaceAnswerSource, QueryResult, WebCitation};

use crate::response::{Candidate, GenerateContentResponse, GroundingChunk, PlaceAnswerSources};

/// Converts a response into answer text plus citations, both taken from the
/// first candidate only.
///
/// A response with no candidate yields empty text and no citations.
#[must_use]
pub fn classify_response(response: GenerateContentResponse) -> QueryResult {
    let Some(candidate) = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
    else {
        return QueryResult::default();
    };

    let text = candidate_text(&candidate);
    let citations = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(classify_chunk)
        .collect();

    QueryResult { text, citations }
}

/// Classifies one record. `maps` is checked first, so a record carrying
/// both descriptors becomes a single maps citation.
#[must_use]
pub fn classify_chunk(chunk: GroundingChunk) -> Option<GroundingCitation> {
    if let Some(maps) = chunk.maps {
        return Some(GroundingCitation::Maps(MapsCitation {
            uri: maps.uri.unwrap_or_default(),
            title: maps.title.unwrap_or_default(),
            place_answer_sources: maps
                .place_answer_sources
                .map(flatten_sources)
                .unwrap_or_default(),
        }));
    }

    chunk.web.map(|web| {
        GroundingCitation::Web(WebCitation {
            uri: web.uri.unwrap_or_default(),
            title: web.title.unwrap_or_default(),
        })
    })
}

fn flatten_sources(sources: PlaceAnswerSources) -> Vec<PlaceAnswerSource> {
    match sources {
        PlaceAnswerSources::List(list) => list
            .into_iter()
            .map(|source| PlaceAnswerSource {
                title: source.title.unwrap_or_default(),
                uri: source.uri.unwrap_or_default(),
            })
            .collect(),
        PlaceAnswerSources::Snippets(snippets) => snippets
            .review_snippets
            .unwrap_or_default()
            .into_iter()
            .map(|snippet| PlaceAnswerSource {
                title: snippet.title.unwrap_or_default(),
                uri: snippet
                    .google_maps_uri
                    .or(snippet.uri)
                    .unwrap_or_default(),
            })
            .collect(),
    }
}

/// Concatenated text of the candidate's answer parts, skipping thoughts.
fn candidate_text(candidate: &Candidate) -> String {
    candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn classify(body: serde_json::Value) -> QueryResult {
        let response: GenerateContentResponse =
            serde_json::from_value(body).expect("fixture should deserialize");
        classify_response(response)
    }

    fn with_chunks(chunks: serde_json::Value) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Here are some places." }] },
                "groundingMetadata": { "groundingChunks": chunks }
            }]
        })
    }

    fn kinds(result: &QueryResult) -> Vec<&'static str> {
        result
            .citations
            .iter()
            .map(|c| match c {
                GroundingCitation::Maps(_) => "maps",
                GroundingCitation::Web(_) => "web",
            })
            .collect()
    }

    #[test]
    fn interleaved_records_keep_order_and_kind() {
        let result = classify(with_chunks(json!([
            { "maps": { "uri": "https://maps.example/1", "title": "Cafe One" } },
            { "web": { "uri": "https://web.example/a", "title": "Guide A" } },
            { "web": { "uri": "https://web.example/b", "title": "Guide B" } },
            { "maps": { "uri": "https://maps.example/2", "title": "Cafe Two" } }
        ])));

        assert_eq!(kinds(&result), vec!["maps", "web", "web", "maps"]);
        let uris: Vec<&str> = result.citations.iter().map(GroundingCitation::uri).collect();
        assert_eq!(
            uris,
            vec![
                "https://maps.example/1",
                "https://web.example/a",
                "https://web.example/b",
                "https://maps.example/2",
            ]
        );
    }

    #[test]
    fn records_without_known_descriptor_are_dropped() {
        let result = classify(with_chunks(json!([
            { "maps": { "uri": "m1", "title": "M1" } },
            { "retrievedContext": { "uri": "gs://bucket/doc", "title": "Doc" } },
            {},
            { "web": { "uri": "w1", "title": "W1" } }
        ])));

        assert_eq!(kinds(&result), vec!["maps", "web"]);
    }

    #[test]
    fn record_with_both_descriptors_is_classified_once_as_maps() {
        let result = classify(with_chunks(json!([
            { "maps": { "uri": "m", "title": "Place" }, "web": { "uri": "w", "title": "Page" } }
        ])));

        assert_eq!(result.citations.len(), 1);
        assert_eq!(kinds(&result), vec!["maps"]);
    }

    #[test]
    fn place_answer_sources_list_is_preserved_in_order() {
        let result = classify(with_chunks(json!([
            { "maps": {
                "uri": "https://maps.example/roma",
                "title": "Trattoria Roma",
                "placeAnswerSources": [
                    { "title": "Great carbonara", "uri": "https://maps.example/review/1" },
                    { "title": "Friendly staff", "uri": "https://maps.example/review/2" }
                ]
            } }
        ])));

        let GroundingCitation::Maps(maps) = &result.citations[0] else {
            panic!("expected maps citation");
        };
        assert_eq!(
            maps.place_answer_sources,
            vec![
                PlaceAnswerSource {
                    title: "Great carbonara".to_string(),
                    uri: "https://maps.example/review/1".to_string(),
                },
                PlaceAnswerSource {
                    title: "Friendly staff".to_string(),
                    uri: "https://maps.example/review/2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn review_snippets_object_form_is_flattened() {
        let result = classify(with_chunks(json!([
            { "maps": {
                "uri": "https://maps.example/uno",
                "title": "Pizzeria Uno",
                "placeId": "places/abc",
                "placeAnswerSources": {
                    "reviewSnippets": [
                        { "reviewId": "r1", "title": "Crispy crust", "googleMapsUri": "https://maps.example/r1" }
                    ]
                }
            } }
        ])));

        let GroundingCitation::Maps(maps) = &result.citations[0] else {
            panic!("expected maps citation");
        };
        assert_eq!(maps.place_answer_sources.len(), 1);
        assert_eq!(maps.place_answer_sources[0].title, "Crispy crust");
        assert_eq!(maps.place_answer_sources[0].uri, "https://maps.example/r1");
    }

    #[test]
    fn missing_titles_become_empty_strings() {
        let result = classify(with_chunks(json!([
            { "maps": { "uri": "https://maps.example/1" } }
        ])));

        assert_eq!(result.citations[0].title(), "");
        assert_eq!(result.citations[0].uri(), "https://maps.example/1");
    }

    #[test]
    fn text_parts_are_concatenated_and_thoughts_skipped() {
        let result = classify(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "Try " },
                    { "text": "the noodle bar." }
                ] }
            }]
        }));

        assert_eq!(result.text, "Try the noodle bar.");
        assert!(result.citations.is_empty());
    }

    #[test]
    fn only_first_candidate_is_used() {
        let result = classify(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                {
                    "content": { "parts": [{ "text": "second" }] },
                    "groundingMetadata": { "groundingChunks": [{ "web": { "uri": "w", "title": "W" } }] }
                }
            ]
        }));

        assert_eq!(result.text, "first");
        assert!(result.citations.is_empty());
    }

    #[test]
    fn no_candidates_yields_empty_result() {
        assert_eq!(classify(json!({})), QueryResult::default());
        assert_eq!(classify(json!({ "candidates": [] })), QueryResult::default());
    }
}
