//! Flashcard, quiz and learning-path generation from an analysis.
//!
//! Everything except the generated ids is a pure function of the inputs.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{ContentAnalysis, Flashcard, LearningPath, Milestone, Quiz};

const SECONDS_PER_DAY: i64 = 86_400;
const QUIZ_OPTION_COUNT: usize = 4;

/// Distractor pool for quiz options, used after the analysis' own topics.
const SUBJECT_POOL: &[&str] = &[
    "mathematics",
    "physics",
    "chemistry",
    "biology",
    "programming",
    "history",
    "economics",
    "literature",
    "geography",
    "philosophy",
];

/// One flashcard per topic, in topic order.
pub fn generate_flashcards(analysis: &ContentAnalysis) -> Vec<Flashcard> {
    analysis
        .topics
        .iter()
        .map(|topic| Flashcard {
            id: Uuid::new_v4(),
            topic: topic.clone(),
            front: format!("What are the key concepts of {}?", topic),
            back: format!(
                "Summarise the core principles of {} covered in this material and give one example of each.",
                topic
            ),
            difficulty: analysis.difficulty,
        })
        .collect()
}

fn quiz_options(analysis: &ContentAnalysis, index: usize) -> Vec<String> {
    let correct = &analysis.topics[index];

    let distractors = analysis
        .topics
        .iter()
        .map(String::as_str)
        .chain(SUBJECT_POOL.iter().copied())
        .filter(|candidate| !candidate.eq_ignore_ascii_case(correct));

    let mut options: Vec<String> = Vec::with_capacity(QUIZ_OPTION_COUNT);
    for candidate in distractors {
        if options.len() == QUIZ_OPTION_COUNT - 1 {
            break;
        }
        if !options.iter().any(|o| o.eq_ignore_ascii_case(candidate)) {
            options.push(candidate.to_string());
        }
    }

    // Rotate the correct answer's slot so it is not always first.
    let slot = index % (options.len() + 1);
    options.insert(slot, correct.clone());
    options
}

/// One multiple-choice question per topic; the correct answer is always one of the options.
pub fn generate_quizzes(analysis: &ContentAnalysis) -> Vec<Quiz> {
    (0..analysis.topics.len())
        .map(|index| {
            let topic = &analysis.topics[index];
            Quiz {
                id: Uuid::new_v4(),
                topic: topic.clone(),
                question: format!(
                    "Which subject area does part {} of this material focus on?",
                    index + 1
                ),
                options: quiz_options(analysis, index),
                correct_answer: topic.clone(),
                difficulty: analysis.difficulty,
            }
        })
        .collect()
}

/// Whole days between `now` and `exam_date`, rounded up, at least 1.
pub fn days_until(exam_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (exam_date - now).num_seconds();
    let days = (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY);
    days.max(1)
}

/// Schedule relative to an explicit `now`.
///
/// Topic milestones are spread evenly over the available days and a final
/// review lands on the exam day.
pub fn create_learning_path_at(
    analysis: &ContentAnalysis,
    exam_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> LearningPath {
    let days_until_exam = days_until(exam_date, now);
    let topic_count = analysis.topics.len().max(1);

    // Saturates instead of wrapping for oversized deserialized analyses.
    let topic_count = u32::try_from(topic_count).unwrap_or(u32::MAX);
    let total_study_time = analysis.estimated_study_time.max(1).saturating_mul(topic_count);
    let daily_study_time = (total_study_time as i64 + days_until_exam - 1) / days_until_exam;
    let daily_study_time = (daily_study_time as u32).max(1);

    let slots = analysis.topics.len() as i64 + 1;
    let mut milestones: Vec<Milestone> = analysis
        .topics
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let day = ((i as i64 + 1) * days_until_exam + slots - 1) / slots;
            let day = day.max(1);
            Milestone {
                day,
                date: (now + Duration::days(day)).date_naive(),
                title: format!("Complete {}", topic),
                topics: vec![topic.clone()],
            }
        })
        .collect();

    milestones.push(Milestone {
        day: days_until_exam,
        date: (now + Duration::days(days_until_exam)).date_naive(),
        title: "Final review".to_string(),
        topics: analysis.topics.clone(),
    });

    LearningPath {
        exam_date,
        days_until_exam,
        total_study_time,
        daily_study_time,
        milestones,
    }
}

/// Schedule relative to the current time.
pub fn create_learning_path(analysis: &ContentAnalysis, exam_date: DateTime<Utc>) -> LearningPath {
    create_learning_path_at(analysis, exam_date, Utc::now())
}
