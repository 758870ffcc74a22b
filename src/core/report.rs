use crate::config::AgeDifferenceQuery;
use crate::core::{AddressBook, Gender};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeDifference {
    pub first: String,
    pub second: String,
    /// `None` when either name is missing from the book.
    pub days: Option<i64>,
}

/// Answers to the standard address book questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub by_gender: BTreeMap<String, usize>,
    pub oldest: Option<String>,
    pub age_differences: Vec<AgeDifference>,
}

impl Report {
    pub fn build(book: &AddressBook, queries: &[AgeDifferenceQuery]) -> Self {
        let by_gender = Gender::ALL
            .into_iter()
            .map(|gender| (gender.to_string(), book.count(gender)))
            .collect();

        let age_differences = queries
            .iter()
            .map(|query| {
                let days = match book.age_difference(&query.first, &query.second) {
                    Ok(days) => Some(days),
                    Err(e) => {
                        tracing::warn!("Age difference query skipped: {}", e);
                        None
                    }
                };
                AgeDifference {
                    first: query.first.clone(),
                    second: query.second.clone(),
                    days,
                }
            })
            .collect();

        Self {
            total: book.len(),
            by_gender,
            oldest: book.find_oldest().map(str::to_string),
            age_differences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(first: &str, second: &str) -> AgeDifferenceQuery {
        AgeDifferenceQuery {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    #[test]
    fn test_report_on_empty_book() {
        let report = Report::build(&AddressBook::new(), &[]);

        assert_eq!(report.total, 0);
        assert_eq!(report.by_gender["MALE"], 0);
        assert_eq!(report.by_gender["FEMALE"], 0);
        assert_eq!(report.oldest, None);
        assert!(report.age_differences.is_empty());
    }

    #[test]
    fn test_report_answers_queries() {
        let mut book = AddressBook::new();
        book.add("Johnny Stone", Gender::Male, NaiveDate::from_ymd_opt(1950, 3, 22).unwrap())
            .unwrap();
        book.add("Gemma Lane", Gender::Female, NaiveDate::from_ymd_opt(1950, 3, 30).unwrap())
            .unwrap();

        let report = Report::build(
            &book,
            &[query("Johnny Stone", "Gemma Lane"), query("Johnny Stone", "Nobody")],
        );

        assert_eq!(report.total, 2);
        assert_eq!(report.by_gender["MALE"], 1);
        assert_eq!(report.by_gender["FEMALE"], 1);
        assert_eq!(report.oldest.as_deref(), Some("Johnny Stone"));
        assert_eq!(report.age_differences[0].days, Some(8));
        assert_eq!(report.age_differences[1].days, None);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["age_differences"][0]["second"], "Gemma Lane");
    }
}
