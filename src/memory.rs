use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categorical emotion intensity. Numeric classifier scores are converted
/// to this tri-state at the classifier boundary and nothing numeric is
/// stored past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Convert a classifier confidence score into an intensity bucket.
    /// Thresholds: >= 0.7 high, >= 0.4 medium, else low.
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 0.7 => Intensity::High,
            s if s >= 0.4 => Intensity::Medium,
            _ => Intensity::Low,
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::Low => write!(f, "low"),
            Intensity::Medium => write!(f, "medium"),
            Intensity::High => write!(f, "high"),
        }
    }
}

/// Whether recent mood labels are steady or shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTrend {
    Stable,
    Changing,
}

impl std::fmt::Display for EmotionalTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmotionalTrend::Stable => write!(f, "stable"),
            EmotionalTrend::Changing => write!(f, "changing"),
        }
    }
}

/// One emotion classification for a unit of text.
///
/// The label is an open set: whatever string the classifier emits is stored
/// verbatim. Any fixed-palette mapping belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionClassification {
    pub label: String,
    pub intensity: Intensity,
    /// Classifier confidence, clamped to [0.0, 1.0] at construction.
    pub confidence: f32,
}

impl EmotionClassification {
    pub fn new(label: impl Into<String>, intensity: Intensity, confidence: f32) -> Self {
        Self {
            label: label.into(),
            intensity,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Immutable log entry pairing one user turn with its detected emotion and
/// the system's reply. Created exactly once per completed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_input: String,
    pub emotion: EmotionClassification,
    pub bot_response: String,
}

impl InteractionRecord {
    fn new(user_input: &str, emotion: EmotionClassification, bot_response: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_input: user_input.to_string(),
            emotion,
            bot_response: bot_response.to_string(),
        }
    }
}

/// Snapshot of the current emotional state, consumed by the response
/// composer and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalSummary {
    pub current_mood: Option<String>,
    pub emotional_trend: Option<EmotionalTrend>,
    /// Last up to 3 mood labels, oldest first.
    pub recent_moods: Vec<String>,
}

/// Classify the trend over the most recent mood labels (up to 3).
///
/// Ordered rules, first match wins:
/// 1. fewer than 2 moods -> stable
/// 2. all examined moods identical -> stable
/// 3. the two most recent moods identical -> stable
/// 4. otherwise -> changing
///
/// Rule 3 is deliberate: a repeated latest mood masks an earlier swing, so
/// `[a, b, b]` is stable. This is not a majority vote over the window.
pub fn classify_trend(recent_moods: &[String]) -> EmotionalTrend {
    if recent_moods.len() < 2 {
        return EmotionalTrend::Stable;
    }
    if recent_moods.iter().all(|m| m == &recent_moods[0]) {
        return EmotionalTrend::Stable;
    }
    if recent_moods[recent_moods.len() - 1] == recent_moods[recent_moods.len() - 2] {
        return EmotionalTrend::Stable;
    }
    EmotionalTrend::Changing
}

pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Bounded, trend-aware memory of one conversation session.
///
/// Owns a FIFO of interaction records capped at `max_history` (oldest
/// evicted first). The mood history is a projection over that FIFO, so the
/// two views cannot drift apart in length. Mutated only through
/// `add_interaction`; lives and dies with the session.
#[derive(Debug, Clone)]
pub struct EmotionalMemory {
    max_history: usize,
    history: VecDeque<InteractionRecord>,
    current_mood: Option<String>,
    emotional_trend: Option<EmotionalTrend>,
}

impl Default for EmotionalMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl EmotionalMemory {
    /// Create a memory with the given capacity. A zero capacity is a
    /// programmer error and is clamped to 1.
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            max_history,
            history: VecDeque::with_capacity(max_history),
            current_mood: None,
            emotional_trend: None,
        }
    }

    /// Record one completed turn: append the record (evicting the oldest at
    /// capacity), update the current mood, and recompute the trend. One
    /// atomic step per turn; always succeeds.
    pub fn add_interaction(
        &mut self,
        user_input: &str,
        emotion: EmotionClassification,
        bot_response: &str,
    ) {
        let mood = emotion.label.clone();
        self.history
            .push_back(InteractionRecord::new(user_input, emotion, bot_response));
        if self.history.len() > self.max_history {
            self.history.pop_front();
        }
        self.current_mood = Some(mood);
        let recent = self.recent_moods(3);
        self.emotional_trend = Some(classify_trend(&recent));
    }

    /// The last `n` interactions in chronological order. Returns fewer than
    /// `n` if the history is shorter; empty before any interaction.
    pub fn get_recent_context(&self, n: usize) -> Vec<&InteractionRecord> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).collect()
    }

    /// Current mood, trend, and the last up to 3 moods. All unset/empty
    /// before the first interaction.
    pub fn get_emotional_summary(&self) -> EmotionalSummary {
        EmotionalSummary {
            current_mood: self.current_mood.clone(),
            emotional_trend: self.emotional_trend,
            recent_moods: self.recent_moods(3),
        }
    }

    /// Mood labels in turn order, derived from the interaction FIFO.
    pub fn mood_history(&self) -> Vec<String> {
        self.history.iter().map(|r| r.emotion.label.clone()).collect()
    }

    fn recent_moods(&self, n: usize) -> Vec<String> {
        let skip = self.history.len().saturating_sub(n);
        self.history
            .iter()
            .skip(skip)
            .map(|r| r.emotion.label.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_history
    }

    /// Full retained history, oldest first. Read-only view for the
    /// presentation layer.
    pub fn interactions(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.history.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emotion(label: &str) -> EmotionClassification {
        EmotionClassification::new(label, Intensity::Medium, 0.5)
    }

    fn add(memory: &mut EmotionalMemory, label: &str) {
        memory.add_interaction("input", emotion(label), "response");
    }

    fn moods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_empty_memory() {
        let memory = EmotionalMemory::default();
        let summary = memory.get_emotional_summary();
        assert!(summary.current_mood.is_none());
        assert!(summary.emotional_trend.is_none());
        assert!(summary.recent_moods.is_empty());
        assert!(memory.get_recent_context(3).is_empty());
    }

    #[test]
    fn test_capacity_eviction_keeps_last_in_order() {
        let mut memory = EmotionalMemory::new(3);
        for i in 0..8 {
            memory.add_interaction(&format!("msg {}", i), emotion("joy"), "ok");
        }
        assert_eq!(memory.len(), 3);
        let inputs: Vec<_> = memory
            .interactions()
            .map(|r| r.user_input.clone())
            .collect();
        assert_eq!(inputs, vec!["msg 5", "msg 6", "msg 7"]);
    }

    #[test]
    fn test_mood_history_cap_matches_fifo() {
        let capacity = 4;
        let mut memory = EmotionalMemory::new(capacity);
        let labels: Vec<String> = (0..capacity + 5).map(|i| format!("mood{}", i)).collect();
        for label in &labels {
            add(&mut memory, label);
        }
        assert_eq!(memory.mood_history().len(), capacity);
        assert_eq!(memory.mood_history(), labels[labels.len() - capacity..]);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut memory = EmotionalMemory::new(5);
        add(&mut memory, "joy");
        add(&mut memory, "sadness");
        let first = memory.get_emotional_summary();
        let second = memory.get_emotional_summary();
        assert_eq!(first, second);
        let a: Vec<_> = memory
            .get_recent_context(2)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        let b: Vec<_> = memory
            .get_recent_context(2)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trend_all_identical_is_stable() {
        assert_eq!(classify_trend(&moods(&["a", "a", "a"])), EmotionalTrend::Stable);
    }

    #[test]
    fn test_trend_latest_pair_repeat_is_stable() {
        // An earlier swing is masked by the repeated latest mood.
        assert_eq!(classify_trend(&moods(&["a", "b", "b"])), EmotionalTrend::Stable);
    }

    #[test]
    fn test_trend_pairwise_distinct_is_changing() {
        assert_eq!(classify_trend(&moods(&["a", "b", "c"])), EmotionalTrend::Changing);
    }

    #[test]
    fn test_trend_short_history_is_stable() {
        assert_eq!(classify_trend(&moods(&["a"])), EmotionalTrend::Stable);
        assert_eq!(classify_trend(&[]), EmotionalTrend::Stable);
    }

    #[test]
    fn test_trend_unset_before_first_interaction() {
        let mut memory = EmotionalMemory::new(3);
        assert!(memory.get_emotional_summary().emotional_trend.is_none());
        add(&mut memory, "joy");
        assert_eq!(
            memory.get_emotional_summary().emotional_trend,
            Some(EmotionalTrend::Stable)
        );
    }

    #[test]
    fn test_scenario_capacity_three_changing() {
        let mut memory = EmotionalMemory::new(3);
        for label in ["joy", "joy", "sadness", "anger"] {
            add(&mut memory, label);
        }
        let summary = memory.get_emotional_summary();
        assert_eq!(summary.recent_moods, moods(&["joy", "sadness", "anger"]));
        assert_eq!(summary.current_mood.as_deref(), Some("anger"));
        assert_eq!(summary.emotional_trend, Some(EmotionalTrend::Changing));
    }

    #[test]
    fn test_scenario_two_neutral_stable() {
        let mut memory = EmotionalMemory::new(10);
        add(&mut memory, "neutral");
        add(&mut memory, "neutral");
        let summary = memory.get_emotional_summary();
        assert_eq!(summary.current_mood.as_deref(), Some("neutral"));
        assert_eq!(summary.emotional_trend, Some(EmotionalTrend::Stable));
    }

    #[test]
    fn test_round_trip_preserves_turn_text() {
        let mut memory = EmotionalMemory::new(10);
        memory.add_interaction("how are you?", emotion("surprise"), "doing well!");
        let recent = memory.get_recent_context(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].user_input, "how are you?");
        assert_eq!(recent[0].bot_response, "doing well!");
        assert_eq!(recent[0].emotion.label, "surprise");
    }

    #[test]
    fn test_open_set_labels_accepted() {
        let mut memory = EmotionalMemory::new(5);
        add(&mut memory, "saudade");
        assert_eq!(
            memory.get_emotional_summary().current_mood.as_deref(),
            Some("saudade")
        );
    }

    #[test]
    fn test_confidence_clamped() {
        let c = EmotionClassification::new("joy", Intensity::High, 1.7);
        assert_eq!(c.confidence, 1.0);
        let c = EmotionClassification::new("joy", Intensity::Low, -0.2);
        assert_eq!(c.confidence, 0.0);
    }

    #[test]
    fn test_intensity_thresholds() {
        assert_eq!(Intensity::from_score(0.9), Intensity::High);
        assert_eq!(Intensity::from_score(0.7), Intensity::High);
        assert_eq!(Intensity::from_score(0.5), Intensity::Medium);
        assert_eq!(Intensity::from_score(0.4), Intensity::Medium);
        assert_eq!(Intensity::from_score(0.1), Intensity::Low);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut memory = EmotionalMemory::new(0);
        add(&mut memory, "joy");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.capacity(), 1);
    }
}
