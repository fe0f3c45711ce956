//! "Which year was the picture taken?" questions.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::rng::Rng;

/// A multiple-choice question travelling with an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Quiz {
    pub question: String,
    pub answers: Vec<String>,
    /// Index into `answers`.
    pub correct: usize,
}

/// Three consecutive years, the true one first or second.
pub fn year_question(taken: &NaiveDateTime, rng: &mut Rng) -> Quiz {
    let year = taken.date().year();
    let offset = rng.next_index(2) as i32;
    Quiz {
        question: "Which year was the picture taken?".into(),
        answers: (year - offset..year - offset + 3).map(|y| y.to_string()).collect(),
        correct: offset as usize,
    }
}

/// EXIF-style timestamp, e.g. `2019-07-14 16:02:11`.
pub fn parse_taken(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").ok()
}
