//! Static sound design cheat-sheets exposed as read-only resources

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

pub const MIME_TYPE: &str = "text/plain";

pub const SOUND_DESIGN: Resource = Resource {
    uri: "lore://sound_design",
    name: "sound_design",
    description: "Cheat sheet for configuring standard synth archetypes with synthesize_sawtooth_lead_bass.",
    text: SOUND_DESIGN_TEXT,
};

pub const DRUM_DESIGN: Resource = Resource {
    uri: "lore://drum_design",
    name: "drum_design",
    description: "Cheat sheet for configuring standard kick drums with synthesize_kick_drum.",
    text: DRUM_DESIGN_TEXT,
};

pub static RESOURCES: [Resource; 2] = [SOUND_DESIGN, DRUM_DESIGN];

/// Look up by full URI (`lore://drum_design`) or bare name (`drum_design`).
pub fn find(key: &str) -> Option<&'static Resource> {
    RESOURCES.iter().find(|r| r.uri == key || r.name == key)
}

const SOUND_DESIGN_TEXT: &str = "
SOUND DESIGN CHEATSHEET for synthesize_sawtooth_lead_bass

1. BASS PLUCK / PERCUSSION
Description: Short, punchy, dark, dies away quickly.
Parameters:
- pitch: Low (30Hz - 80Hz)
- cutoff_hz: Low to Medium (200 - 800)
- attack: Very Low (0-10)
- decay: Medium Low (50-100)
- sustain: Zero (0) - It should not hold!
- release: Medium Low (30-80)

2. WARM PAD / AMBIENCE
Description: Slow building, warm, sustains forever, long fade out.
Parameters:
- pitch: Mid (150Hz - 400Hz)
- cutoff_hz: Medium (800 - 1500)
- attack: High (150-255)
- decay: Medium (100)
- sustain: High (150-255)
- release: High (150-255)

3. AGGRESSIVE LEAD
Description: Bright, fast attacking, holds steady for melodies.
Parameters:
- pitch: High (400Hz - 1000Hz)
- cutoff_hz: High (3000 - 5000)
- attack: Low (0-20)
- decay: Low (50)
- sustain: Max (255)
- release: Low (20-50)
";

const DRUM_DESIGN_TEXT: &str = "
SOUND DESIGN CHEATSHEET for synthesize_kick_drum

1. 808 SUB BASS
Description: Long booming low end, soft transient.
Parameters:
- fundamental_hz: 45.0
- punch: 20
- decay: 220
- drive: 10

2. PUNCHY HOUSE KICK
Description: Tight, thumping, hits you in the chest.
Parameters:
- fundamental_hz: 55.0
- punch: 150
- decay: 80
- drive: 50

3. HARDSTYLE / INDUSTRIAL KICK
Description: Heavily distorted, aggressive click, massive tail.
Parameters:
- fundamental_hz: 50.0
- punch: 200
- decay: 150
- drive: 220
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_uri_and_name() {
        assert_eq!(find("lore://drum_design"), Some(&DRUM_DESIGN));
        assert_eq!(find("sound_design"), Some(&SOUND_DESIGN));
        assert!(find("lore://snare_design").is_none());
    }

    #[test]
    fn test_sheets_cover_archetypes() {
        for archetype in ["BASS PLUCK", "WARM PAD", "AGGRESSIVE LEAD"] {
            assert!(SOUND_DESIGN.text.contains(archetype));
        }
        for archetype in ["808 SUB BASS", "PUNCHY HOUSE KICK", "HARDSTYLE"] {
            assert!(DRUM_DESIGN.text.contains(archetype));
        }
    }
}
