use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub String);

/// Identifier wrapper for a semester-specific class offering. Offerings
/// scraped mid-term sometimes lack a catalog course id, so the two spaces
/// are kept distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub String);

/// A catalog course as published by the registrar.
///
/// `attributes` maps an attribute category (e.g. `"core"`) to the codes the
/// course carries in that category (e.g. `["NATSCI"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub subject: String,
    pub number: String,
    pub title: String,
    pub credits: f32,
    pub attributes: BTreeMap<String, Vec<String>>,
    pub effective_from: Option<NaiveDate>,
}

impl Course {
    /// Canonical `"SUBJECT NUMBER"` label, e.g. `"MATH 1300"`.
    pub fn subject_number(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    pub fn attribute_codes(&self, attribute_type: &str) -> &[String] {
        self.attributes
            .get(attribute_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
