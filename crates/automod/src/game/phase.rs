use strum::{Display, IntoStaticStr};

/// Bytes of phase string read per tick; covers the longest identifier we
/// compare against, with room for the ones we don't.
pub const PHASE_RAW_LEN: usize = 32;

/// Scripted areas the checker reacts to.
///
/// The strum serialization of each variant is the exact in-game phase
/// identifier. Detection is a prefix compare over the identifier's byte
/// length, no terminator handling, matching how the game stores the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Phase {
    /// The pit after the Adam factory fight, where VC3 materials are granted
    #[strum(serialize = "58_AB_BossArea_Fall")]
    AdamBossFall,

    /// Abandoned housing complex, where Taunt+2 chips are topped up
    #[strum(serialize = "52_AB_Danchi_Haikyo")]
    AbandonedHousing,

    /// The fishing tutorial used for the mackerel swap
    #[strum(serialize = "00_60_A_RobotM_Pro_Tutorial")]
    MackerelTutorial,
}

impl Phase {
    const ALL: [Phase; 3] = [
        Phase::AdamBossFall,
        Phase::AbandonedHousing,
        Phase::MackerelTutorial,
    ];

    /// The in-game phase identifier for this variant
    pub fn literal(&self) -> &'static str {
        self.into()
    }

    /// Prefix-match raw phase bytes against this variant's identifier
    pub fn matches(&self, raw: &[u8]) -> bool {
        let literal = self.literal().as_bytes();
        raw.len() >= literal.len() && &raw[..literal.len()] == literal
    }

    /// Identify which (if any) known phase the raw bytes name
    pub fn detect(raw: &[u8]) -> Option<Phase> {
        Self::ALL.into_iter().find(|phase| phase.matches(raw))
    }
}
