use super::normalizer::normalize_label;
use std::collections::HashMap;
use std::sync::OnceLock;

static ATTRIBUTE_LABEL_MAP: OnceLock<HashMap<String, (&'static str, &'static str)>> =
    OnceLock::new();

/// Resolves a normalized feed label to a canonical `(attribute type, code)`
/// pair. Labels the registrar has not published a mapping for resolve to
/// `None` and are skipped by the importer.
pub(crate) fn attribute_for_normalized(
    normalized_label: &str,
) -> Option<(&'static str, &'static str)> {
    attribute_label_map().get(normalized_label).copied()
}

fn attribute_label_map() -> &'static HashMap<String, (&'static str, &'static str)> {
    ATTRIBUTE_LABEL_MAP.get_or_init(|| {
        const LABEL_TO_ATTRIBUTE: &[(&str, (&str, &str))] = &[
            // Arts & Sciences core designations
            (
                "arts & sciences core: natural science",
                ("core", "NATSCI"),
            ),
            (
                "arts and sciences core: natural science",
                ("core", "NATSCI"),
            ),
            (
                "arts & sciences core: quantitative reasoning",
                ("core", "QRMS"),
            ),
            (
                "arts and sciences core: quantitative reasoning",
                ("core", "QRMS"),
            ),
            (
                "arts & sciences core: literature & the arts",
                ("core", "LITART"),
            ),
            (
                "arts and sciences core: literature and the arts",
                ("core", "LITART"),
            ),
            (
                "arts & sciences core: historical context",
                ("core", "HIST"),
            ),
            (
                "arts & sciences core: human diversity",
                ("core", "DIVR"),
            ),
            (
                "arts & sciences core: global perspectives",
                ("core", "GLBL"),
            ),
            ("global perspectives", ("core", "GLBL")),
            // Course flags
            ("writing intensive", ("flag", "WRIT")),
            ("writing-intensive", ("flag", "WRIT")),
            ("honors", ("flag", "HONR")),
            ("honors section", ("flag", "HONR")),
            ("laboratory science", ("flag", "LAB")),
            ("lab science", ("flag", "LAB")),
            ("service learning", ("flag", "SRVC")),
            ("service-learning", ("flag", "SRVC")),
        ];

        let mut map = HashMap::with_capacity(LABEL_TO_ATTRIBUTE.len());
        for (label, attribute) in LABEL_TO_ATTRIBUTE {
            map.insert(normalize_label(label), *attribute);
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(label: &str) -> Option<(&'static str, &'static str)> {
    let normalized = normalize_label(label);
    attribute_for_normalized(&normalized)
}
