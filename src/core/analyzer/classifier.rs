/// Process-name substrings that indicate a game or game launcher.
pub const DEFAULT_GAMING_KEYWORDS: &[&str] = &[
    "game", "steam", "epic", "origin", "uplay", "battlenet", "gog", "valorant", "league", "dota",
    "csgo", "fortnite", "apex", "warzone", "minecraft", "roblox", "amongus", "fallguys",
    "destiny", "overwatch", "rainbow6", "siege", "pubg", "tarkov", "hunt", "division",
];

/// Process-name substrings that indicate streaming or capture software.
pub const DEFAULT_STREAMING_KEYWORDS: &[&str] = &[
    "obs",
    "streamlabs",
    "xsplit",
    "discord",
    "twitch",
    "youtube",
    "nvidia broadcast",
    "nvbroadcast",
    "amdlink",
    "encoder",
];

pub fn default_gaming_keywords() -> Vec<String> {
    DEFAULT_GAMING_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

pub fn default_streaming_keywords() -> Vec<String> {
    DEFAULT_STREAMING_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Classifies process names by case-insensitive substring match.
#[derive(Debug, Clone)]
pub struct ProcessClassifier {
    gaming: Vec<String>,
    streaming: Vec<String>,
}

impl ProcessClassifier {
    pub fn new<I, J, S, T>(gaming: I, streaming: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            gaming: normalize(gaming),
            streaming: normalize(streaming),
        }
    }

    pub fn is_gaming_process(&self, process_name: &str) -> bool {
        matches_any(&process_name.to_lowercase(), &self.gaming)
    }

    pub fn is_streaming_process(&self, process_name: &str) -> bool {
        matches_any(&process_name.to_lowercase(), &self.streaming)
    }

    /// Test one name against both sets, lower-casing it once.
    pub fn classify(&self, process_name: &str) -> (bool, bool) {
        let lower = process_name.to_lowercase();
        (
            matches_any(&lower, &self.gaming),
            matches_any(&lower, &self.streaming),
        )
    }
}

impl Default for ProcessClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GAMING_KEYWORDS, DEFAULT_STREAMING_KEYWORDS)
    }
}

fn normalize<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn matches_any(lower_name: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| lower_name.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaming_processes() {
        let classifier = ProcessClassifier::default();
        assert!(classifier.is_gaming_process("Steam.exe"));
        assert!(classifier.is_gaming_process("VALORANT-Win64-Shipping.exe"));
        assert!(classifier.is_gaming_process("EscapeFromTarkov.exe"));
        assert!(!classifier.is_gaming_process("notepad.exe"));
    }

    #[test]
    fn test_streaming_processes() {
        let classifier = ProcessClassifier::default();
        assert!(classifier.is_streaming_process("obs64.exe"));
        assert!(classifier.is_streaming_process("Discord.exe"));
        assert!(classifier.is_streaming_process("NVIDIA Broadcast.exe"));
        assert!(!classifier.is_streaming_process("explorer.exe"));
    }

    #[test]
    fn test_substring_not_token_match() {
        // "hunt" inside an unrelated word still counts
        let classifier = ProcessClassifier::default();
        assert!(classifier.is_gaming_process("ShuntService.exe"));
    }

    #[test]
    fn test_custom_keywords_replace_defaults() {
        let classifier = ProcessClassifier::new(["  Factorio "], Vec::<String>::new());
        assert!(classifier.is_gaming_process("factorio.exe"));
        assert!(!classifier.is_gaming_process("steam.exe"));
        assert!(!classifier.is_streaming_process("obs64.exe"));
    }

    #[test]
    fn test_blank_keywords_ignored() {
        let classifier = ProcessClassifier::new(["", "   "], [""]);
        assert_eq!(classifier.classify("anything.exe"), (false, false));
    }

    #[test]
    fn test_default_keyword_counts() {
        assert_eq!(DEFAULT_GAMING_KEYWORDS.len(), 26);
        assert_eq!(DEFAULT_STREAMING_KEYWORDS.len(), 10);
    }
}
