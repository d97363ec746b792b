//! Prompt templates for study guides and daily devotionals.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

const DEFAULT_FOCUS_AREA: &str = "spiritual growth";

/// Depth requested for a study guide.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StudyLevel {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl StudyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyLevel::Basic => "basic",
            StudyLevel::Intermediate => "intermediate",
            StudyLevel::Advanced => "advanced",
        }
    }

    fn guidance(&self) -> &'static str {
        match self {
            StudyLevel::Basic => {
                "Keep the language simple and suitable for someone new to reading the Bible."
            }
            StudyLevel::Intermediate => {
                "Assume familiarity with the main biblical narratives and connect related passages."
            }
            StudyLevel::Advanced => {
                "Engage original-language terms, literary structure, and major interpretive positions."
            }
        }
    }
}

/// Arguments for `bible_study`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BibleStudyArgs {
    /// Topic (e.g. 'faith') or passage (e.g. 'Romans 8:28') to study.
    pub topic_or_passage: String,
    /// Study depth: basic, intermediate (default), or advanced.
    #[serde(default)]
    pub study_level: Option<StudyLevel>,
}

/// Arguments for `daily_reflection`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DailyReflectionArgs {
    /// Verse reference or spiritual theme to reflect on.
    pub verse_or_theme: String,
    /// Life area to focus on, e.g. 'relationships', 'challenges', 'gratitude'.
    #[serde(default)]
    pub focus_area: Option<String>,
}

pub fn render_bible_study(args: &BibleStudyArgs) -> String {
    let level = args.study_level.unwrap_or_default();
    format!(
        "Create a comprehensive Bible study guide for: {subject}

Study Level: {level}
{guidance}

Please include:
1. **Key Verses**: 3-5 relevant Bible verses with references
2. **Context**: Historical and cultural background
3. **Main Themes**: Core theological concepts
4. **Application**: How this applies to modern life
5. **Discussion Questions**: 3-4 thought-provoking questions
6. **Prayer Points**: Suggested areas for prayer
7. **Further Study**: Related passages or topics to explore

Use the get_verse and get_chapter tools to quote Scripture accurately. \
Make this study guide practical and accessible for personal or group study.",
        subject = args.topic_or_passage.trim(),
        level = level.as_str(),
        guidance = level.guidance(),
    )
}

pub fn render_daily_reflection(args: &DailyReflectionArgs, today: NaiveDate) -> String {
    let focus = args
        .focus_area
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_FOCUS_AREA);
    format!(
        "Daily Devotional Reflection ({date})

**Scripture Focus**: {subject}
**Life Focus**: {focus}

Create a meaningful daily devotional that includes:

1. **Opening Prayer**: A brief prayer to center the heart
2. **Scripture Reading**: The full text of the verse(s)
3. **Reflection**: 2-3 paragraphs exploring the meaning and relevance
4. **Personal Application**: Specific ways to apply this truth today
5. **Closing Prayer**: A prayer incorporating the day's lesson
6. **Action Step**: One concrete step to take today

Write in a warm, encouraging tone that speaks to both heart and mind.",
        date = today.format("%A, %B %-d, %Y"),
        subject = args.verse_or_theme.trim(),
    )
}
