//! Projection of classified citations into a flat list of display rows.

use serde::Serialize;

use crate::types::GroundingCitation;

pub const MAPS_FALLBACK_LABEL: &str = "Google Maps Link";
pub const WEB_FALLBACK_LABEL: &str = "Web Source Link";
pub const REVIEW_LABEL_PREFIX: &str = "Review: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Place,
    /// A sub-source of the preceding `Place` row.
    Review,
    Web,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    pub label: String,
    pub link: String,
    pub kind: RowKind,
}

/// Flattens citations into display rows, preserving input order.
///
/// A maps citation yields its place row followed immediately by one row per
/// sub-source; a web citation yields exactly one row.
#[must_use]
pub fn render(citations: &[GroundingCitation]) -> Vec<SourceRow> {
    let mut rows = Vec::with_capacity(citations.len());

    for citation in citations {
        match citation {
            GroundingCitation::Maps(maps) => {
                rows.push(SourceRow {
                    label: label_or(&maps.title, MAPS_FALLBACK_LABEL),
                    link: maps.uri.clone(),
                    kind: RowKind::Place,
                });
                rows.extend(maps.place_answer_sources.iter().map(|source| SourceRow {
                    label: format!("{REVIEW_LABEL_PREFIX}{}", source.title),
                    link: source.uri.clone(),
                    kind: RowKind::Review,
                }));
            }
            GroundingCitation::Web(web) => rows.push(SourceRow {
                label: label_or(&web.title, WEB_FALLBACK_LABEL),
                link: web.uri.clone(),
                kind: RowKind::Web,
            }),
        }
    }

    rows
}

fn label_or(title: &str, fallback: &str) -> String {
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MapsCitation, PlaceAnswerSource, WebCitation};

    fn maps(title: &str, uri: &str, reviews: &[(&str, &str)]) -> GroundingCitation {
        GroundingCitation::Maps(MapsCitation {
            uri: uri.to_string(),
            title: title.to_string(),
            place_answer_sources: reviews
                .iter()
                .map(|(title, uri)| PlaceAnswerSource {
                    title: (*title).to_string(),
                    uri: (*uri).to_string(),
                })
                .collect(),
        })
    }

    fn web(title: &str, uri: &str) -> GroundingCitation {
        GroundingCitation::Web(WebCitation {
            uri: uri.to_string(),
            title: title.to_string(),
        })
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn untitled_maps_citation_uses_fallback_label() {
        let rows = render(&[maps("", "https://maps.example/1", &[])]);
        assert_eq!(
            rows,
            vec![SourceRow {
                label: "Google Maps Link".to_string(),
                link: "https://maps.example/1".to_string(),
                kind: RowKind::Place,
            }]
        );
    }

    #[test]
    fn untitled_web_citation_uses_fallback_label() {
        let rows = render(&[web("", "https://example.com/guide")]);
        assert_eq!(rows[0].label, "Web Source Link");
        assert_eq!(rows[0].kind, RowKind::Web);
    }

    #[test]
    fn maps_citation_expands_reviews_directly_after_place() {
        let citations = vec![
            maps(
                "Trattoria Roma",
                "https://maps.example/roma",
                &[
                    ("Great pasta", "https://maps.example/r/1"),
                    ("Cozy", "https://maps.example/r/2"),
                ],
            ),
            web("Eater guide", "https://eater.example/italian"),
            maps("Pizzeria Uno", "https://maps.example/uno", &[]),
        ];

        let rows = render(&citations);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Trattoria Roma",
                "Review: Great pasta",
                "Review: Cozy",
                "Eater guide",
                "Pizzeria Uno",
            ]
        );
        assert_eq!(rows[1].link, "https://maps.example/r/1");
        assert_eq!(rows[2].kind, RowKind::Review);
    }

    #[test]
    fn row_count_is_one_plus_reviews_per_place() {
        let citations = vec![
            maps("A", "a", &[("x", "1"), ("y", "2"), ("z", "3")]),
            web("B", "b"),
            maps("C", "c", &[("w", "4")]),
        ];
        assert_eq!(render(&citations).len(), (1 + 3) + 1 + (1 + 1));
    }

    #[test]
    fn rendering_is_repeatable() {
        let citations = vec![maps("A", "a", &[("x", "1")]), web("", "b")];
        assert_eq!(render(&citations), render(&citations));
    }
}
