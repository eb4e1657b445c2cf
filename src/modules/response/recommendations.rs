use serde::Serialize;

use crate::modules::emotion::Emotion;

/// Suggested activities grouped by the page they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub exercise: Vec<&'static str>,
    pub checkin: Vec<&'static str>,
    pub general: Vec<&'static str>,
}

impl Recommendations {
    fn from_table(exercise: [&'static str; 3], checkin: [&'static str; 3], general: [&'static str; 3]) -> Self {
        Self {
            exercise: exercise.to_vec(),
            checkin: checkin.to_vec(),
            general: general.to_vec(),
        }
    }
}

/// Sad, angry and happy have their own tables; every other emotion shares the
/// default one.
pub fn recommendations_for(emotion: Emotion) -> Recommendations {
    match emotion {
        Emotion::Sad => Recommendations::from_table(
            ["Gentle yoga or stretching", "Light walking in nature", "Breathing exercises"],
            ["Journal about your feelings", "Practice gratitude", "Connect with a friend"],
            ["Listen to uplifting music", "Watch a funny video", "Do something creative"],
        ),
        Emotion::Angry => Recommendations::from_table(
            ["High-intensity cardio", "Boxing or martial arts", "Running or cycling"],
            ["Write down what's bothering you", "Practice deep breathing", "Take a break and cool down"],
            ["Count to 10 slowly", "Squeeze a stress ball", "Go for a walk"],
        ),
        Emotion::Happy => Recommendations::from_table(
            ["Try a new workout", "Dance to your favorite music", "Outdoor activities"],
            ["Share your positive mood", "Set new goals", "Help someone else"],
            ["Share your happiness", "Try something new", "Celebrate your wins"],
        ),
        Emotion::Fear | Emotion::Surprise | Emotion::Neutral | Emotion::Disgust => {
            Recommendations::from_table(
                ["Regular workout routine", "Try a new exercise", "Group fitness class"],
                ["Daily mood tracking", "Reflect on your day", "Set small goals"],
                ["Stay consistent", "Explore new interests", "Maintain healthy habits"],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_three_entries_each() {
        for emotion in Emotion::ALL {
            let recs = recommendations_for(emotion);
            assert_eq!(recs.exercise.len(), 3);
            assert_eq!(recs.checkin.len(), 3);
            assert_eq!(recs.general.len(), 3);
        }
    }

    #[test]
    fn test_default_table_is_shared() {
        let neutral = recommendations_for(Emotion::Neutral);
        assert_eq!(recommendations_for(Emotion::Fear), neutral);
        assert_eq!(recommendations_for(Emotion::Surprise), neutral);
        assert_eq!(recommendations_for(Emotion::Disgust), neutral);
        assert_ne!(recommendations_for(Emotion::Sad), neutral);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(recommendations_for(Emotion::Angry)).unwrap();
        assert_eq!(json["exercise"][0], "High-intensity cardio");
        assert_eq!(json["general"][2], "Go for a walk");
    }
}
