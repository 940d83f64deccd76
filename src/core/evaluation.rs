//! Display form of a tutor evaluation.
//!
//! The backend may omit any field or send empty lists. The report never shows
//! an empty section: every gap is filled with a fixed encouraging or neutral
//! placeholder, and the renderer only ever sees the filled-in form.

use crate::api::{Evaluation, Mistake};

pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_STRENGTHS: &str = "No specific strengths identified.";
pub const NO_MISTAKES: &str = "No mistakes found! Great job!";
pub const NO_EXPLANATION: &str = "No explanation provided.";
pub const NO_SUGGESTIONS: &str = "Keep practicing!";
pub const NO_IMPROVEMENT_AREAS: &str = "Continue practicing to maintain your skills!";

/// A list section that either carries items or a placeholder line.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Items(Vec<T>),
    Placeholder(&'static str),
}

impl<T> Section<T> {
    fn from_list(items: Option<Vec<T>>, placeholder: &'static str) -> Self {
        match items {
            Some(items) if !items.is_empty() => Section::Items(items),
            _ => Section::Placeholder(placeholder),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Section::Placeholder(_))
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Section::Placeholder(text) => Some(*text),
            Section::Items(_) => None,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Section::Items(items) => items,
            Section::Placeholder(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MistakeEntry {
    pub original: String,
    pub correction: String,
    pub explanation: String,
    pub kind: Option<String>,
}

impl From<Mistake> for MistakeEntry {
    fn from(mistake: Mistake) -> Self {
        let explanation = mistake
            .explanation
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_EXPLANATION.to_string());
        Self {
            original: mistake.message.unwrap_or_default(),
            correction: mistake.correction.unwrap_or_default(),
            explanation,
            kind: mistake.kind.filter(|kind| !kind.trim().is_empty()),
        }
    }
}

impl MistakeEntry {
    /// Neither the original text nor a correction; nothing worth showing.
    fn is_blank(&self) -> bool {
        self.original.trim().is_empty() && self.correction.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub score: f64,
    pub summary: String,
    pub strengths: Section<String>,
    pub mistakes: Section<MistakeEntry>,
    pub suggestions: Section<String>,
    pub areas_for_improvement: Section<String>,
}

impl EvaluationReport {
    pub fn from_evaluation(evaluation: Evaluation) -> Self {
        let summary = evaluation
            .summary
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        let mistakes = evaluation
            .mistakes
            .map(|list| {
                list.into_iter()
                    .map(MistakeEntry::from)
                    .filter(|entry| !entry.is_blank())
                    .collect()
            });

        Self {
            score: evaluation
                .overall_score
                .filter(|score| score.is_finite())
                .unwrap_or(0.0),
            summary,
            strengths: Section::from_list(evaluation.strengths, NO_STRENGTHS),
            mistakes: Section::from_list(mistakes, NO_MISTAKES),
            suggestions: Section::from_list(evaluation.suggestions, NO_SUGGESTIONS),
            areas_for_improvement: Section::from_list(
                evaluation.areas_for_improvement,
                NO_IMPROVEMENT_AREAS,
            ),
        }
    }

    /// Score as shown to the user: whole numbers without a fraction.
    pub fn score_label(&self) -> String {
        if self.score.fract() == 0.0 {
            format!("{:.0}", self.score)
        } else {
            format!("{:.1}", self.score)
        }
    }
}
