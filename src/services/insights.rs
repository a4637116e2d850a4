use std::collections::HashMap;

use crate::database::models::{JournalEntry, Situation};
use crate::utils::datetime::window_cutoff;
use crate::utils::formatting::format_frequency_list;

/// Emotions that flag an emotional-management growth area when recurring.
const DIFFICULT_EMOTIONS: [&str; 3] = ["Anxious 😰", "Overwhelmed 😫", "Frustrated 😤"];

/// How many of the newest/oldest mood ratings feed the trend comparison.
const TREND_SAMPLE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodDirection {
    Improving,
    Stable,
    Declining,
}

impl MoodDirection {
    pub fn label(&self) -> &'static str {
        match self {
            MoodDirection::Improving => "Improving",
            MoodDirection::Stable => "Stable",
            MoodDirection::Declining => "Declining",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodTrend {
    pub direction: MoodDirection,
    pub average: f64,
    pub change: f64,
}

#[derive(Debug, Clone)]
pub struct GrowthArea {
    pub area: String,
    pub frequency: usize,
    pub suggestion: String,
}

/// Aggregated view of a user's situations and journal history.
#[derive(Debug, Clone)]
pub struct ProgressReport {
    pub mood: MoodTrend,
    pub common_emotions: Vec<(String, usize)>,
    pub common_topics: Vec<(String, usize)>,
    pub resolution_rate: f64,
    pub total_situations: usize,
    pub entries_last_month: usize,
    pub growth_areas: Vec<GrowthArea>,
}

impl ProgressReport {
    /// Fetches the user's records and analyzes them. None when there is
    /// nothing to analyze yet.
    pub async fn for_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let situations = Situation::find_all_for_user(pool, user_id).await?;
        let entries = JournalEntry::find_all_for_user(pool, user_id).await?;
        Ok(analyze(&situations, &entries))
    }

    /// Renders the report for Telegram, top 3 per section.
    pub fn render(&self) -> String {
        let mut report = format!(
            "📊 Your Progress Report\n\n\
             Mood Trend: {} (Average: {:.1}/10)\n\n",
            self.mood.direction.label(),
            self.mood.average,
        );

        if !self.common_emotions.is_empty() {
            report.push_str(&format!(
                "Common Emotions:\n{}\n\n",
                format_frequency_list(&self.common_emotions, 3)
            ));
        }
        if !self.common_topics.is_empty() {
            report.push_str(&format!(
                "Frequent Topics:\n{}\n\n",
                format_frequency_list(&self.common_topics, 3)
            ));
        }

        report.push_str(&format!(
            "Resolution Rate: {:.1}%\nJournal Entries (last 30 days): {}\n",
            self.resolution_rate, self.entries_last_month,
        ));

        if !self.growth_areas.is_empty() {
            report.push_str("\nGrowth Areas:\n");
            for area in self.growth_areas.iter().take(3) {
                report.push_str(&format!("• {}: {}\n", area.area, area.suggestion));
            }
        }

        report
    }
}

/// Analyzes a user's records. Entries are expected newest first, as the
/// model queries return them. Returns None when both lists are empty.
pub fn analyze(situations: &[Situation], entries: &[JournalEntry]) -> Option<ProgressReport> {
    if situations.is_empty() && entries.is_empty() {
        return None;
    }

    let topics: Vec<String> = situations.iter().map(|s| s.topic.clone()).collect();
    let emotions: Vec<String> = situations.iter().flat_map(|s| s.emotion_list()).collect();
    let mood_ratings: Vec<i64> = entries.iter().map(|e| e.mood_rating).collect();

    let common_topics = count_frequency(&topics);
    let common_emotions = count_frequency(&emotions);

    Some(ProgressReport {
        mood: mood_trend(&mood_ratings),
        growth_areas: growth_areas(&common_topics, &common_emotions),
        resolution_rate: resolution_rate(situations),
        total_situations: situations.len(),
        entries_last_month: entries_last_month(entries),
        common_emotions,
        common_topics,
    })
}

/// Frequency count, most frequent first; ties break alphabetically so the
/// ordering is stable.
pub fn count_frequency(items: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Trend over mood ratings given newest first: compare the mean of the 7
/// newest against the 7 oldest; |change| > 0.5 tips the direction.
pub fn mood_trend(ratings: &[i64]) -> MoodTrend {
    if ratings.is_empty() {
        return MoodTrend {
            direction: MoodDirection::Stable,
            average: 0.0,
            change: 0.0,
        };
    }

    let average = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;

    let change = if ratings.len() >= 2 {
        let recent: Vec<i64> = ratings.iter().take(TREND_SAMPLE).copied().collect();
        let older: Vec<i64> = ratings.iter().rev().take(TREND_SAMPLE).copied().collect();
        let recent_avg = recent.iter().sum::<i64>() as f64 / recent.len() as f64;
        let older_avg = older.iter().sum::<i64>() as f64 / older.len() as f64;
        recent_avg - older_avg
    } else {
        0.0
    };

    let direction = if change > 0.5 {
        MoodDirection::Improving
    } else if change < -0.5 {
        MoodDirection::Declining
    } else {
        MoodDirection::Stable
    };

    MoodTrend {
        direction,
        average,
        change,
    }
}

pub fn resolution_rate(situations: &[Situation]) -> f64 {
    if situations.is_empty() {
        return 0.0;
    }
    let resolved = situations.iter().filter(|s| s.is_resolved()).count();
    resolved as f64 / situations.len() as f64 * 100.0
}

fn entries_last_month(entries: &[JournalEntry]) -> usize {
    let cutoff = window_cutoff(30);
    entries.iter().filter(|e| e.created_at >= cutoff).count()
}

/// Flags recurring difficult emotions (3+ occurrences) and repeated topics
/// (2+ occurrences) as areas to focus on.
pub fn growth_areas(
    topic_freq: &[(String, usize)],
    emotion_freq: &[(String, usize)],
) -> Vec<GrowthArea> {
    let mut areas = Vec::new();

    for (emotion, count) in emotion_freq {
        if *count >= 3 && DIFFICULT_EMOTIONS.contains(&emotion.as_str()) {
            areas.push(GrowthArea {
                area: format!("Emotional Management: {}", emotion),
                frequency: *count,
                suggestion: "Consider stress management techniques and emotional regulation \
                             strategies"
                    .to_string(),
            });
        }
    }

    for (topic, count) in topic_freq {
        if *count >= 2 {
            areas.push(GrowthArea {
                area: format!("Recurring Challenge: {}", topic),
                frequency: *count,
                suggestion: "This might be a core area for focused personal development"
                    .to_string(),
            });
        }
    }

    areas
}
