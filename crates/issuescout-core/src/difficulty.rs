// Difficulty classification from issue labels
use crate::models::{DifficultyLevel, IssueContent, Label};
use tracing::debug;

// Checked top to bottom; the first level with any matching label wins. An
// issue tagged both "good first issue" and "hard" is advanced.
const DIFFICULTY_RULES: &[(DifficultyLevel, &[&str])] = &[
    (
        DifficultyLevel::Advanced,
        &["expert", "advanced", "hard", "difficult", "complex", "challenging"],
    ),
    (
        DifficultyLevel::Beginner,
        &[
            "good first issue",
            "good-first-issue",
            "first-timers-only",
            "first timers only",
            "beginner",
            "easy",
            "starter",
            "newcomer",
            "good-for-beginners",
            "good for beginners",
        ],
    ),
    (
        DifficultyLevel::Intermediate,
        &["help wanted", "help-wanted", "medium", "intermediate", "moderate"],
    ),
];

/// Classify an issue by its labels
///
/// Matching is case-insensitive substring containment, so `intermediate-level`
/// counts as intermediate. No labels, or no matching label, is `None`.
pub fn classify(labels: &[Label]) -> Option<DifficultyLevel> {
    if labels.is_empty() {
        return None;
    }

    let names: Vec<String> = labels.iter().map(|l| l.name.to_lowercase()).collect();

    DIFFICULTY_RULES
        .iter()
        .find(|(_, keywords)| {
            names
                .iter()
                .any(|name| keywords.iter().any(|kw| name.contains(kw)))
        })
        .map(|(level, _)| *level)
}

/// Keep issues whose labels classify to `level`; `None` keeps everything
pub fn filter_by_difficulty<T: IssueContent>(items: Vec<T>, level: Option<DifficultyLevel>) -> Vec<T> {
    let Some(wanted) = level else {
        return items;
    };

    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| classify(item.labels()) == Some(wanted))
        .collect();

    debug!("Difficulty filter {} kept {}/{} items", wanted, kept.len(), before);
    kept
}
