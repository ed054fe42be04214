//! Folds the "Text" bucket into Python and refreshes the derived fields.

use super::duration::format_duration;
use super::types::{LanguageStat, Seconds};

const TEXT_BUCKET: &str = "text";
const PYTHON: &str = "python";
const PYTHON_DISPLAY_NAME: &str = "Python";

/// Percentage of `grand_total`, or `None` when there is no total to divide by.
pub fn percent_of(seconds: f64, grand_total: f64) -> Option<f64> {
    if grand_total == 0.0 {
        None
    } else {
        Some(seconds / grand_total * 100.0)
    }
}

impl LanguageStat {
    /// Sets `total_seconds` and recomputes every derived field from it.
    ///
    /// `percent` is only overwritten when `grand_total` is non-zero.
    pub fn set_seconds(&mut self, seconds: f64, grand_total: f64) {
        let parts = format_duration(seconds);
        self.total_seconds = Seconds::from_f64(seconds);
        self.text = Some(parts.text);
        self.hours = Some(parts.hours);
        self.minutes = Some(parts.minutes);
        self.digital = Some(parts.digital);
        if let Some(percent) = percent_of(seconds, grand_total) {
            self.percent = Some(percent);
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name)
    }
}

/// Removes every "Text" entry and credits its seconds to Python.
///
/// Entries keep their original order. When several entries are named Python
/// the last one receives the text time. With no Python entry, a new one is
/// appended. Percentages use `grand_total` as reported by the API, so after a
/// merge they need not sum to 100.
pub fn normalize_languages(languages: Vec<LanguageStat>, grand_total: f64) -> Vec<LanguageStat> {
    let mut text_seconds = 0.0;
    let mut python_index = None;
    let mut kept = Vec::with_capacity(languages.len() + 1);

    for lang in languages {
        if lang.is_named(TEXT_BUCKET) {
            text_seconds += lang.total_seconds.as_f64();
            continue;
        }
        if lang.is_named(PYTHON) {
            python_index = Some(kept.len());
        }
        kept.push(lang);
    }

    if text_seconds > 0.0 {
        match python_index {
            Some(i) => {
                let python = &mut kept[i];
                let merged = python.total_seconds.as_f64() + text_seconds;
                python.set_seconds(merged, grand_total);
                tracing::debug!("Merged {}s of Text into {}", text_seconds, python.name);
            }
            None => {
                let mut python = LanguageStat::new(PYTHON_DISPLAY_NAME, 0.0);
                python.set_seconds(text_seconds, grand_total);
                tracing::debug!("Created Python entry from {}s of Text", text_seconds);
                kept.push(python);
            }
        }
    }

    kept
}

#[cfg(test)]
#[path = "tests/languages_tests.rs"]
mod tests;
