use crate::modules::emotion::Emotion;

use super::page::Page;

/// Canned companion reply for a detected emotion on a given page.
pub fn chat_response(emotion: Emotion, page: Page) -> &'static str {
    match (emotion, page) {
        (Emotion::Happy, Page::Exercise) => "Great mood! Let's try a fun new exercise today 🎉",
        (Emotion::Happy, Page::Checkin) => "You're doing amazing! Let's log your progress 🌟",
        (Emotion::Happy, Page::Chat) => "Glad to see you happy! How can I help today?",

        (Emotion::Sad, Page::Exercise) => {
            "I sense you're a bit down. How about a short relaxation exercise? 🧘"
        }
        (Emotion::Sad, Page::Checkin) => {
            "It's okay to have tough days. Want to talk about it or check in together?"
        }
        (Emotion::Sad, Page::Chat) => {
            "I'm here for you 💙 Want me to suggest some uplifting activities?"
        }

        (Emotion::Angry, Page::Exercise) => {
            "Feeling frustrated? Let's try some breathing exercises to help you feel better 🧘‍♀️"
        }
        (Emotion::Angry, Page::Checkin) => {
            "I can see you're upset. Would you like to talk about what's bothering you?"
        }
        (Emotion::Angry, Page::Chat) => {
            "I understand you're feeling angry. Let's work through this together 💪"
        }

        (Emotion::Fear, Page::Exercise) => "Feeling anxious? Let's try some gentle grounding exercises 🌱",
        (Emotion::Fear, Page::Checkin) => "It's okay to feel scared sometimes. You're safe here 💙",
        (Emotion::Fear, Page::Chat) => "I'm here to support you. What's making you feel anxious?",

        (Emotion::Disgust, Page::Exercise) => {
            "Not feeling great? Let's try a light, refreshing activity 🌿"
        }
        (Emotion::Disgust, Page::Checkin) => {
            "Sometimes we feel off. That's completely normal. Want to explore what's going on?"
        }
        (Emotion::Disgust, Page::Chat) => {
            "I can sense you're not feeling your best. How can I help you feel better?"
        }

        (Emotion::Surprise, Page::Exercise) => {
            "Something unexpected happened? Let's channel that energy into something positive! ⚡"
        }
        (Emotion::Surprise, Page::Checkin) => "Surprised by something? Let's process this together 🤔",
        (Emotion::Surprise, Page::Chat) => "I can see something surprised you! Tell me more about it",

        (Emotion::Neutral, Page::Exercise) => "Ready for some exercises? Let's get started! 💪",
        (Emotion::Neutral, Page::Checkin) => "How are you feeling today? Let's check in together 📝",
        (Emotion::Neutral, Page::Chat) => "I'm here. How are you feeling right now?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_a_reply() {
        for emotion in Emotion::ALL {
            for page in [Page::Chat, Page::Exercise, Page::Checkin] {
                assert!(!chat_response(emotion, page).is_empty());
            }
        }
    }

    #[test]
    fn test_page_specific_replies() {
        assert_eq!(
            chat_response(Emotion::Neutral, Page::Chat),
            "I'm here. How are you feeling right now?"
        );
        assert!(chat_response(Emotion::Sad, Page::Exercise).contains("relaxation exercise"));
        assert!(chat_response(Emotion::Happy, Page::Checkin).contains("log your progress"));
    }
}
