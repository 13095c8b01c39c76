use std::collections::HashMap;

use colored::*;

use crate::memory::{EmotionalSummary, InteractionRecord};

/// Emoji for a mood label. Unknown labels fall into the default bucket
/// rather than erroring; the core accepts an open label set and only the
/// presentation layer knows the fixed palette.
pub fn mood_emoji(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "joy" | "happy" => "😊",
        "sadness" | "sad" => "😢",
        "anger" => "😠",
        "fear" => "😨",
        "surprise" => "😲",
        "love" => "💖",
        "neutral" => "😐",
        _ => "🤔",
    }
}

/// Chart color hex for a mood label, with a default bucket for labels
/// outside the palette.
pub fn mood_color(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "joy" | "happy" => "#FFA726",
        "sadness" | "sad" => "#003366",
        "anger" => "#E53935",
        "fear" => "#6A0DAD",
        "surprise" => "#FF7043",
        "neutral" => "#B0BEC5",
        _ => "#ADD8E6",
    }
}

/// Count occurrences of each mood label.
pub fn mood_counts(moods: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for mood in moods {
        *counts.entry(mood.clone()).or_insert(0) += 1;
    }
    counts
}

/// Integer percentage (rounded) for each mood, out of all observed moods.
pub fn mood_percentages(moods: &[String]) -> Vec<(String, usize)> {
    let counts = mood_counts(moods);
    let total = moods.len();
    if total == 0 {
        return Vec::new();
    }
    let mut breakdown: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(mood, count)| (mood, (count * 100 + total / 2) / total))
        .collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    breakdown
}

pub fn print_summary(summary: &EmotionalSummary) {
    println!("{}", "Emotional Summary".cyan().bold());

    match &summary.current_mood {
        Some(mood) => println!(
            "Current Mood: {} {}",
            mood_emoji(mood),
            mood.yellow()
        ),
        None => println!("Current Mood: {}", "none yet".dimmed()),
    }

    match summary.emotional_trend {
        Some(trend) => println!("Emotional Trend: {}", trend.to_string().yellow()),
        None => println!("Emotional Trend: {}", "none yet".dimmed()),
    }

    if summary.recent_moods.is_empty() {
        println!("Recent Moods: {}", "start chatting to build a history".dimmed());
    } else {
        println!("Recent Moods: {}", summary.recent_moods.join(", "));
    }
}

pub fn print_history(records: &[&InteractionRecord]) {
    if records.is_empty() {
        println!("{}", "No interactions recorded yet.".yellow());
        return;
    }

    println!("{}", "Recent Interactions".cyan().bold());
    for record in records {
        println!(
            "{} {} {}",
            record.timestamp.format("%H:%M:%S").to_string().dimmed(),
            mood_emoji(&record.emotion.label),
            format!("({}, {})", record.emotion.label, record.emotion.intensity).dimmed()
        );
        println!("  {} {}", "You:".cyan(), record.user_input);
        println!("  {} {}", "Bot:".green(), record.bot_response);
    }
}

pub fn print_mood_breakdown(moods: &[String]) {
    if moods.is_empty() {
        println!("{}", "Start chatting to see your emotional breakdown!".yellow());
        return;
    }

    println!("{}", "Mood Breakdown".cyan().bold());
    for (mood, percentage) in mood_percentages(moods) {
        let (r, g, b) = hex_to_rgb(mood_color(&mood));
        println!(
            "  {} {} {:>3}%",
            mood_emoji(&mood),
            format!("{:<10}", mood).truecolor(r, g, b),
            percentage
        );
    }
}

fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let parse = |range| u8::from_str_radix(hex.get(range).unwrap_or("0"), 16).unwrap_or(0);
    (parse(0..2), parse(2..4), parse(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_known_palette() {
        assert_eq!(mood_emoji("joy"), "😊");
        assert_eq!(mood_emoji("Sadness"), "😢");
        assert_eq!(mood_color("anger"), "#E53935");
    }

    #[test]
    fn test_unknown_label_gets_default_bucket() {
        assert_eq!(mood_emoji("saudade"), "🤔");
        assert_eq!(mood_color("saudade"), "#ADD8E6");
    }

    #[test]
    fn test_mood_counts() {
        let counts = mood_counts(&moods(&["joy", "joy", "anger"]));
        assert_eq!(counts["joy"], 2);
        assert_eq!(counts["anger"], 1);
    }

    #[test]
    fn test_percentages_sorted_descending() {
        let breakdown = mood_percentages(&moods(&["joy", "joy", "joy", "anger"]));
        assert_eq!(breakdown[0], ("joy".to_string(), 75));
        assert_eq!(breakdown[1], ("anger".to_string(), 25));
    }

    #[test]
    fn test_percentages_empty() {
        assert!(mood_percentages(&[]).is_empty());
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FFA726"), (0xFF, 0xA7, 0x26));
        assert_eq!(hex_to_rgb("#003366"), (0x00, 0x33, 0x66));
    }
}
