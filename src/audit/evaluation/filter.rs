use crate::audit::domain::{CourseFilter, CourseRecord};

/// Specificity of filters that match everything (`any`, legacy
/// placeholders).
pub(crate) const BROAD_FILTER_SPECIFICITY: u32 = 1;

/// Specificity of filters that name subjects, number suffixes, or
/// attributes. Scores are only ever compared within one course's rule
/// evaluation, never across unrelated filters.
pub(crate) const TARGETED_FILTER_SPECIFICITY: u32 = 10;

pub(crate) fn filter_matches(filter: &CourseFilter, course: &CourseRecord) -> bool {
    match filter {
        CourseFilter::Any | CourseFilter::Placeholder => true,
        CourseFilter::SubjectNumber { subjects } => subjects.contains(&course.subject),
        CourseFilter::CourseNumberSuffix { suffixes } => suffixes
            .iter()
            .any(|suffix| course.number.ends_with(suffix.as_str())),
        CourseFilter::Attribute {
            attributes,
            attribute_type,
        } => course
            .attribute_codes(attribute_type)
            .iter()
            .any(|code| attributes.contains(code)),
        CourseFilter::Unknown => false,
    }
}

pub(crate) fn filter_specificity(filter: &CourseFilter) -> u32 {
    match filter {
        CourseFilter::Any | CourseFilter::Placeholder => BROAD_FILTER_SPECIFICITY,
        CourseFilter::SubjectNumber { .. }
        | CourseFilter::CourseNumberSuffix { .. }
        | CourseFilter::Attribute { .. } => TARGETED_FILTER_SPECIFICITY,
        CourseFilter::Unknown => 0,
    }
}
