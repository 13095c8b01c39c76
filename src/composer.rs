use crate::memory::{EmotionalSummary, EmotionalTrend};

/// Assemble the final reply from a base empathetic utterance, a follow-up
/// question, and a trailer conditioned on the emotional trend.
///
/// Reads the summary only; recording the resulting turn into the memory is
/// the caller's responsibility.
pub fn compose_response(base: &str, follow_up: &str, summary: &EmotionalSummary) -> String {
    let mut response = format!("{} {}", base, follow_up);

    match summary.emotional_trend {
        Some(EmotionalTrend::Changing) => {
            response.push_str(
                " I notice your mood has been changing lately. Would you like to talk about that?",
            );
        }
        Some(EmotionalTrend::Stable) if summary.recent_moods.len() > 1 => {
            let mood = summary.current_mood.as_deref().unwrap_or("this way");
            response.push_str(&format!(
                " You've been feeling {} consistently. Is there anything specific on your mind?",
                mood
            ));
        }
        _ => {}
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(
        mood: Option<&str>,
        trend: Option<EmotionalTrend>,
        recent: &[&str],
    ) -> EmotionalSummary {
        EmotionalSummary {
            current_mood: mood.map(|m| m.to_string()),
            emotional_trend: trend,
            recent_moods: recent.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_changing_trend_appends_shift_trailer() {
        let s = summary(
            Some("anger"),
            Some(EmotionalTrend::Changing),
            &["joy", "sadness", "anger"],
        );
        let out = compose_response("I hear you.", "What happened?", &s);
        assert!(out.starts_with("I hear you. What happened?"));
        assert!(out.contains("your mood has been changing"));
    }

    #[test]
    fn test_stable_trend_names_current_mood() {
        let s = summary(Some("joy"), Some(EmotionalTrend::Stable), &["joy", "joy"]);
        let out = compose_response("That's great.", "Tell me more?", &s);
        assert!(out.contains("feeling joy consistently"));
    }

    #[test]
    fn test_stable_single_mood_adds_nothing() {
        let s = summary(Some("joy"), Some(EmotionalTrend::Stable), &["joy"]);
        let out = compose_response("That's great.", "Tell me more?", &s);
        assert_eq!(out, "That's great. Tell me more?");
    }

    #[test]
    fn test_fresh_session_adds_nothing() {
        let s = summary(None, None, &[]);
        let out = compose_response("Hello!", "How are you feeling today?", &s);
        assert_eq!(out, "Hello! How are you feeling today?");
    }
}
