//! Regulation states and per-state score records.

use serde::{Deserialize, Serialize};

/// One of the three regulation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulationState {
    /// Hypoarousal (shut down, numb, frozen).
    Hypo,
    /// Hyperarousal (anxious, restless, angry).
    Hyper,
    /// Regulated / window of tolerance.
    Flow,
}

impl RegulationState {
    /// Fixed iteration order. Also the tie-break order for dominant-state selection.
    pub const ALL: [RegulationState; 3] = [
        RegulationState::Hypo,
        RegulationState::Hyper,
        RegulationState::Flow,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            RegulationState::Hypo => "hypo",
            RegulationState::Hyper => "hyper",
            RegulationState::Flow => "flow",
        }
    }

    /// Parses a state name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hypo" => Some(RegulationState::Hypo),
            "hyper" => Some(RegulationState::Hyper),
            "flow" => Some(RegulationState::Flow),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{hypo, hyper, flow}` triple.
///
/// Used for lexicon weights, running accumulators and normalized percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateScores {
    pub hypo: f64,
    pub hyper: f64,
    pub flow: f64,
}

impl StateScores {
    pub const ZERO: StateScores = StateScores {
        hypo: 0.0,
        hyper: 0.0,
        flow: 0.0,
    };

    pub fn new(hypo: f64, hyper: f64, flow: f64) -> Self {
        Self { hypo, hyper, flow }
    }

    #[inline]
    pub fn get(&self, state: RegulationState) -> f64 {
        match state {
            RegulationState::Hypo => self.hypo,
            RegulationState::Hyper => self.hyper,
            RegulationState::Flow => self.flow,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, state: RegulationState) -> &mut f64 {
        match state {
            RegulationState::Hypo => &mut self.hypo,
            RegulationState::Hyper => &mut self.hyper,
            RegulationState::Flow => &mut self.flow,
        }
    }

    /// Adds `other * factor` component-wise.
    #[inline]
    pub fn add_scaled(&mut self, other: &StateScores, factor: f64) {
        self.hypo += other.hypo * factor;
        self.hyper += other.hyper * factor;
        self.flow += other.flow * factor;
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.hypo + self.hyper + self.flow
    }

    /// Converts accumulated scores into percentages rounded to two decimals.
    ///
    /// Returns `None` when the total is zero.
    pub fn to_percentages(&self) -> Option<StateScores> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }

        let pct = |v: f64| round2(v / total * 100.0);
        Some(StateScores {
            hypo: pct(self.hypo),
            hyper: pct(self.hyper),
            flow: pct(self.flow),
        })
    }

    /// Highest-valued state; ties resolve to the earliest in [`RegulationState::ALL`].
    pub fn dominant(&self) -> RegulationState {
        let mut best = RegulationState::Hypo;
        for state in RegulationState::ALL {
            if self.get(state) > self.get(best) {
                best = state;
            }
        }
        best
    }
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_names() {
        assert_eq!(RegulationState::parse("hypo"), Some(RegulationState::Hypo));
        assert_eq!(RegulationState::parse(" HYPER "), Some(RegulationState::Hyper));
        assert_eq!(RegulationState::parse("Flow"), Some(RegulationState::Flow));
        assert_eq!(RegulationState::parse("calm"), None);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&RegulationState::Hyper).unwrap();
        assert_eq!(json, "\"hyper\"");
    }

    #[test]
    fn test_percentages_zero_total() {
        assert!(StateScores::ZERO.to_percentages().is_none());
    }

    #[test]
    fn test_percentages_rounded_to_two_decimals() {
        let pct = StateScores::new(1.0, 1.0, 1.0).to_percentages().unwrap();
        assert_eq!(pct.hypo, 33.33);
        assert_eq!(pct.hyper, 33.33);
        assert_eq!(pct.flow, 33.33);
        assert!((pct.total() - 100.0).abs() <= 0.015);
    }

    #[test]
    fn test_dominant_tie_breaks_in_fixed_order() {
        assert_eq!(
            StateScores::new(50.0, 50.0, 0.0).dominant(),
            RegulationState::Hypo
        );
        assert_eq!(
            StateScores::new(0.0, 50.0, 50.0).dominant(),
            RegulationState::Hyper
        );
        assert_eq!(
            StateScores::new(10.0, 20.0, 70.0).dominant(),
            RegulationState::Flow
        );
    }

    #[test]
    fn test_add_scaled() {
        let mut acc = StateScores::ZERO;
        acc.add_scaled(&StateScores::new(1.0, 0.5, 0.0), 0.8);
        assert!((acc.hypo - 0.8).abs() < 1e-12);
        assert!((acc.hyper - 0.4).abs() < 1e-12);
        assert_eq!(acc.flow, 0.0);
    }
}
