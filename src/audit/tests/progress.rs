use super::common::course;
use crate::audit::domain::{CountType, CourseFilter, CourseRecord, GroupOperator, Rule};
use crate::audit::evaluation::{rule_progress, ProgressDetail, ProgressStatus};

fn take(courses: &[&str]) -> Rule {
    Rule::TakeCourses {
        courses: courses.iter().map(|id| id.to_string()).collect(),
    }
}

#[test]
fn take_courses_percentage_is_exact_fraction_of_list() {
    let rule = take(&["CS 1400", "CS 1410", "CS 2420", "CS 3500"]);

    let assigned = [course("CS", "1400", 4.0), course("CS", "2420", 4.0)];
    let refs: Vec<&CourseRecord> = assigned.iter().collect();
    let progress = rule_progress(&rule, &refs);

    assert_eq!(progress.percentage, 50.0);
    assert_eq!(progress.status, ProgressStatus::InProgress);
    assert_eq!(
        progress.detail,
        ProgressDetail::Courses {
            matched: 2,
            required: 4
        }
    );

    assert_eq!(rule_progress(&rule, &[]).status, ProgressStatus::NotStarted);

    let all = [
        course("CS", "1400", 4.0),
        course("CS", "1410", 4.0),
        course("CS", "2420", 4.0),
        course("CS", "3500", 4.0),
    ];
    let refs: Vec<&CourseRecord> = all.iter().collect();
    let done = rule_progress(&rule, &refs);
    assert_eq!(done.percentage, 100.0);
    assert_eq!(done.status, ProgressStatus::Completed);
}

#[test]
fn empty_take_courses_is_vacuously_complete() {
    let progress = rule_progress(&take(&[]), &[]);
    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.status, ProgressStatus::Completed);
}

#[test]
fn take_from_list_counts_credits_when_configured() {
    let rule = Rule::TakeFromList {
        courses: vec!["BIOL 2020".to_string(), "BIOL 2021".to_string()],
        count: 6,
        count_type: CountType::Credits,
    };

    let assigned = [course("BIOL", "2020", 4.0), course("CHEM", "1210", 4.0)];
    let refs: Vec<&CourseRecord> = assigned.iter().collect();
    let progress = rule_progress(&rule, &refs);

    // Only the listed course counts toward the six credits.
    assert_eq!(
        progress.detail,
        ProgressDetail::List {
            fulfilled: 4.0,
            required: 6.0,
            count_type: CountType::Credits
        }
    );
    assert_eq!(progress.status, ProgressStatus::InProgress);
    assert!((progress.percentage - (4.0 / 6.0 * 100.0)).abs() < f32::EPSILON * 100.0);
}

#[test]
fn take_any_courses_caps_percentage_at_one_hundred() {
    let rule = Rule::TakeAnyCourses {
        credits: 3.0,
        filter: CourseFilter::SubjectNumber {
            subjects: ["ART".to_string()].into_iter().collect(),
        },
    };

    let assigned = [course("ART", "2200", 3.0), course("ART", "2210", 3.0)];
    let refs: Vec<&CourseRecord> = assigned.iter().collect();
    let progress = rule_progress(&rule, &refs);

    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.status, ProgressStatus::Completed);
    assert_eq!(
        progress.detail,
        ProgressDetail::Credits {
            fulfilled: 6.0,
            required: 3.0
        }
    );
}

#[test]
fn and_group_percentage_is_arithmetic_mean() {
    let rule = Rule::Group {
        operator: GroupOperator::And,
        rules: vec![take(&["CS 1400"]), take(&["CS 1410"]), take(&["CS 2420"])],
    };

    let assigned = [course("CS", "1400", 4.0)];
    let refs: Vec<&CourseRecord> = assigned.iter().collect();
    let progress = rule_progress(&rule, &refs);

    assert!((progress.percentage - 100.0 / 3.0).abs() < 0.001);
    assert_eq!(progress.status, ProgressStatus::InProgress);
}

#[test]
fn and_group_completes_only_when_every_arm_does() {
    let rule = Rule::Group {
        operator: GroupOperator::And,
        rules: vec![take(&["CS 1400"]), take(&["CS 1410"])],
    };

    let partial = [course("CS", "1400", 4.0)];
    let refs: Vec<&CourseRecord> = partial.iter().collect();
    assert_eq!(rule_progress(&rule, &refs).status, ProgressStatus::InProgress);

    let full = [course("CS", "1400", 4.0), course("CS", "1410", 4.0)];
    let refs: Vec<&CourseRecord> = full.iter().collect();
    assert_eq!(rule_progress(&rule, &refs).status, ProgressStatus::Completed);
}

#[test]
fn or_group_takes_the_best_arm_and_reports_it() {
    let rule = Rule::Group {
        operator: GroupOperator::Or,
        rules: vec![
            take(&["PHIL 1000", "PHIL 2000"]),
            take(&["HIST 1700"]),
        ],
    };

    let assigned = [course("HIST", "1700", 3.0)];
    let refs: Vec<&CourseRecord> = assigned.iter().collect();
    let progress = rule_progress(&rule, &refs);

    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.status, ProgressStatus::Completed);
    match progress.detail {
        ProgressDetail::Group {
            active_option: Some(index),
            ref options,
            ..
        } => {
            assert_eq!(options[index].percentage, 100.0);
            assert_eq!(index, 1);
        }
        ref other => panic!("expected group detail, got {other:?}"),
    }
}

#[test]
fn empty_group_is_vacuously_complete_for_both_operators() {
    for operator in [GroupOperator::And, GroupOperator::Or] {
        let rule = Rule::Group {
            operator,
            rules: Vec::new(),
        };
        let progress = rule_progress(&rule, &[]);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.status, ProgressStatus::Completed);
    }
}

#[test]
fn unknown_rule_reports_no_progress() {
    let progress = rule_progress(&Rule::Unknown, &[]);
    assert_eq!(progress.percentage, 0.0);
    assert_eq!(progress.status, ProgressStatus::NotStarted);
    assert_eq!(progress.detail, ProgressDetail::Unknown);
}
