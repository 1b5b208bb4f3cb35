/// Per-key classification, re-derived every tick from "is the key down"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPhase {
    #[default]
    Idle,
    /// Went down this tick
    Pressed,
    /// Down for at least the second consecutive tick
    Held,
    /// Went up this tick
    Released,
}

impl KeyPhase {
    /// Advance the state machine by one tick
    pub fn next(self, down: bool) -> KeyPhase {
        match (self, down) {
            (KeyPhase::Idle, true) | (KeyPhase::Released, true) => KeyPhase::Pressed,
            (KeyPhase::Pressed, true) | (KeyPhase::Held, true) => KeyPhase::Held,
            (KeyPhase::Pressed, false) | (KeyPhase::Held, false) => KeyPhase::Released,
            (KeyPhase::Idle, false) | (KeyPhase::Released, false) => KeyPhase::Idle,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, KeyPhase::Pressed | KeyPhase::Held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        let cases = [
            (KeyPhase::Idle, true, KeyPhase::Pressed),
            (KeyPhase::Idle, false, KeyPhase::Idle),
            (KeyPhase::Pressed, true, KeyPhase::Held),
            (KeyPhase::Pressed, false, KeyPhase::Released),
            (KeyPhase::Held, true, KeyPhase::Held),
            (KeyPhase::Held, false, KeyPhase::Released),
            (KeyPhase::Released, true, KeyPhase::Pressed),
            (KeyPhase::Released, false, KeyPhase::Idle),
        ];

        for (from, down, to) in cases {
            assert_eq!(from.next(down), to, "{:?} with down={}", from, down);
        }
    }

    #[test]
    fn press_hold_release_sequence() {
        let samples = [true, true, true, false, false];
        let mut phase = KeyPhase::default();
        let phases: Vec<_> = samples
            .iter()
            .map(|&down| {
                phase = phase.next(down);
                phase
            })
            .collect();

        assert_eq!(
            phases,
            vec![
                KeyPhase::Pressed,
                KeyPhase::Held,
                KeyPhase::Held,
                KeyPhase::Released,
                KeyPhase::Idle,
            ]
        );
    }

    #[test]
    fn is_down_matches_phase() {
        assert!(KeyPhase::Pressed.is_down());
        assert!(KeyPhase::Held.is_down());
        assert!(!KeyPhase::Released.is_down());
        assert!(!KeyPhase::Idle.is_down());
    }
}
