use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::mapping;
use super::normalizer::normalize_label;

#[derive(Debug)]
pub(crate) struct FeedRecord {
    pub(crate) course_id: Option<String>,
    pub(crate) subject: String,
    pub(crate) number: String,
    pub(crate) title: String,
    pub(crate) credits: Option<f32>,
    pub(crate) attributes: Vec<(&'static str, &'static str)>,
    pub(crate) effective_from: Option<NaiveDate>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<FeedRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<FeedRow>() {
        let row = record?;
        records.push(FeedRecord {
            course_id: row.course_id.clone(),
            subject: row.subject.trim().to_ascii_uppercase(),
            number: row.number.trim().to_string(),
            title: row.title.trim().to_string(),
            credits: row.parsed_credits(),
            attributes: row.parsed_attributes(),
            effective_from: row.effective_date(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct FeedRow {
    #[serde(rename = "Course Id", default, deserialize_with = "empty_string_as_none")]
    course_id: Option<String>,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Number")]
    number: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(
        rename = "Credit Hours",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    credit_hours: Option<String>,
    #[serde(rename = "Attributes", default, deserialize_with = "empty_string_as_none")]
    attributes: Option<String>,
    #[serde(
        rename = "Effective Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    effective_date: Option<String>,
}

impl FeedRow {
    fn parsed_credits(&self) -> Option<f32> {
        self.credit_hours
            .as_deref()
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|credits| credits.is_finite() && *credits >= 0.0)
    }

    fn parsed_attributes(&self) -> Vec<(&'static str, &'static str)> {
        let Some(raw) = self.attributes.as_deref() else {
            return Vec::new();
        };

        raw.split(';')
            .map(normalize_label)
            .filter(|label| !label.is_empty())
            .filter_map(|label| mapping::attribute_for_normalized(&label))
            .collect()
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        self.effective_date.as_deref().and_then(parse_date)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
