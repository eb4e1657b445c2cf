use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Neutral,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Disgust => "disgust",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" | "happiness" => Ok(Emotion::Happy),
            "sad" | "sadness" => Ok(Emotion::Sad),
            "angry" | "anger" => Ok(Emotion::Angry),
            "fear" => Ok(Emotion::Fear),
            "surprise" => Ok(Emotion::Surprise),
            "neutral" => Ok(Emotion::Neutral),
            "disgust" => Ok(Emotion::Disgust),
            other => Err(format!("Unknown emotion label '{}'", other)),
        }
    }
}

/// Ordered emotion → score mapping.
///
/// Iteration order is insertion order, which is also the tie-break order used
/// by [`EmotionScores::dominant`]. Serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmotionScores {
    entries: Vec<(Emotion, f32)>,
}

impl EmotionScores {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Every label present with a score of zero.
    pub fn zeroed(labels: &[Emotion]) -> Self {
        let mut scores = Self::new();
        for &label in labels {
            scores.set(label, 0.0);
        }
        scores
    }

    /// The `{neutral: 1.0}` mapping returned for degenerate or failed input.
    pub fn neutral_fallback() -> Self {
        Self {
            entries: vec![(Emotion::Neutral, 1.0)],
        }
    }

    pub fn get(&self, emotion: Emotion) -> Option<f32> {
        self.entries
            .iter()
            .find(|(label, _)| *label == emotion)
            .map(|(_, score)| *score)
    }

    pub fn set(&mut self, emotion: Emotion, score: f32) {
        match self.entries.iter_mut().find(|(label, _)| *label == emotion) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((emotion, score)),
        }
    }

    pub fn add(&mut self, emotion: Emotion, bonus: f32) {
        let current = self.get(emotion).unwrap_or(0.0);
        self.set(emotion, current + bonus);
    }

    pub fn total(&self) -> f32 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    /// Scales every score so they sum to 1.0. A zero (or non-finite) total
    /// yields the neutral fallback.
    pub fn normalized(self) -> Self {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return Self::neutral_fallback();
        }

        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(label, score)| (label, score / total))
                .collect(),
        }
    }

    /// Label with the highest score; the first label wins ties. An empty
    /// mapping reports neutral with zero confidence.
    pub fn dominant(&self) -> (Emotion, f32) {
        let mut best: Option<(Emotion, f32)> = None;
        for &(label, score) in &self.entries {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }
        best.unwrap_or((Emotion::Neutral, 0.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Emotion, f32)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, score) in &self.entries {
            map.serialize_entry(label.as_str(), score)?;
        }
        map.end()
    }
}
