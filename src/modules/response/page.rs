use serde::{Deserialize, Serialize};
use std::fmt;

/// UI context a detection request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Chat,
    Exercise,
    Checkin,
}

impl Page {
    /// Request parameter parse. Only the exact names `exercise` and `checkin`
    /// select those pages; anything else, including other casings, is chat.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("exercise") => Page::Exercise,
            Some("checkin") => Page::Checkin,
            _ => Page::Chat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Chat => "chat",
            Page::Exercise => "exercise",
            Page::Checkin => "checkin",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn test_from_param() {
        assert_eq!(Page::from_param(Some("exercise")), Page::Exercise);
        assert_eq!(Page::from_param(Some("checkin")), Page::Checkin);
        assert_eq!(Page::from_param(Some(" CheckIn ")), Page::Chat);
        assert_eq!(Page::from_param(Some("EXERCISE")), Page::Chat);
        assert_eq!(Page::from_param(Some("chat")), Page::Chat);
        assert_eq!(Page::from_param(Some("dashboard")), Page::Chat);
        assert_eq!(Page::from_param(None), Page::Chat);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Page::Checkin).unwrap(), "\"checkin\"");
        let page: Page = serde_json::from_str("\"exercise\"").unwrap();
        assert_eq!(page, Page::Exercise);
    }
}
