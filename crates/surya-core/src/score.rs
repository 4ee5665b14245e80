//! Accuracy scores, bands and grades
//!
//! The canonical scale is an integer percentage in 0..=100. Ratios in
//! 0..1 (as used by threshold configuration) are converted on entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pose accuracy as an integer percentage.
///
/// Deserialization clamps to 100, so out-of-range persisted scores never
/// escape the canonical scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Accuracy(u8);

impl Accuracy {
    pub const ZERO: Accuracy = Accuracy(0);
    pub const PERFECT: Accuracy = Accuracy(100);

    /// Percentage, clamped to 100
    pub fn from_percent(percent: u8) -> Self {
        Accuracy(percent.min(100))
    }

    /// Ratio in 0..1, rounded half-up to a whole percent
    pub fn from_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Accuracy::ZERO;
        }
        Accuracy((ratio * 100.0 + 0.5).floor().min(100.0) as u8)
    }

    /// `round_half_up(100 * correct / total)` in integer arithmetic.
    /// An empty check list scores zero.
    pub fn from_counts(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Accuracy::ZERO;
        }
        let correct = correct.min(total);
        Accuracy(((200 * correct + total) / (2 * total)) as u8)
    }

    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn ratio(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Overall coaching line shown first in the feedback list
    pub fn overall_feedback(self) -> &'static str {
        match self.0 {
            90..=100 => "Excellent pose! Great alignment.",
            70..=89 => "Good pose! Minor adjustments needed.",
            50..=69 => "Getting there! Focus on the highlighted areas.",
            _ => "Keep practicing! Check your form.",
        }
    }

    /// Encouragement line for the results view
    pub fn results_message(self) -> &'static str {
        match self.0 {
            90..=100 => "Excellent! You've mastered this pose!",
            70..=89 => "Great job! You're doing well!",
            50..=69 => "Good effort! Keep practicing!",
            _ => "Don't worry, practice makes perfect!",
        }
    }

    pub fn band(self) -> AccuracyBand {
        AccuracyBand::from(self)
    }

    pub fn grade(self) -> Grade {
        Grade::from(self)
    }
}

impl From<u8> for Accuracy {
    fn from(percent: u8) -> Self {
        Accuracy::from_percent(percent)
    }
}

impl From<Accuracy> for u8 {
    fn from(a: Accuracy) -> Self {
        a.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Skeleton overlay colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyBand {
    /// Green, >= 80
    Good,
    /// Yellow, >= 60
    Fair,
    /// Red
    Poor,
}

impl AccuracyBand {
    /// Overlay colour as a hex string
    pub fn color(self) -> &'static str {
        match self {
            AccuracyBand::Good => "#4CAF50",
            AccuracyBand::Fair => "#FFC107",
            AccuracyBand::Poor => "#F44336",
        }
    }
}

impl From<Accuracy> for AccuracyBand {
    fn from(a: Accuracy) -> Self {
        match a.percent() {
            80..=100 => AccuracyBand::Good,
            60..=79 => AccuracyBand::Fair,
            _ => AccuracyBand::Poor,
        }
    }
}

/// Letter grade for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    C,
    CPlus,
    B,
    BPlus,
    A,
    APlus,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
        }
    }
}

impl From<Accuracy> for Grade {
    fn from(a: Accuracy) -> Self {
        match a.percent() {
            90..=100 => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::BPlus,
            60..=69 => Grade::B,
            50..=59 => Grade::CPlus,
            _ => Grade::C,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_round_half_up() {
        assert_eq!(Accuracy::from_counts(0, 5).percent(), 0);
        assert_eq!(Accuracy::from_counts(2, 3).percent(), 67);
        assert_eq!(Accuracy::from_counts(1, 3).percent(), 33);
        assert_eq!(Accuracy::from_counts(1, 8).percent(), 13); // 12.5 rounds up
        assert_eq!(Accuracy::from_counts(5, 5).percent(), 100);
        assert_eq!(Accuracy::from_counts(0, 0).percent(), 0);
    }

    #[test]
    fn test_ratio_conversion() {
        assert_eq!(Accuracy::from_ratio(0.8).percent(), 80);
        assert_eq!(Accuracy::from_ratio(0.9).percent(), 90);
        assert_eq!(Accuracy::from_ratio(0.125).percent(), 13);
        assert_eq!(Accuracy::from_ratio(1.7).percent(), 100);
        assert_eq!(Accuracy::from_ratio(-0.2).percent(), 0);
        assert_eq!(Accuracy::from_ratio(f64::NAN).percent(), 0);
    }

    #[test]
    fn test_overall_feedback_bands() {
        assert_eq!(Accuracy::from_percent(90).overall_feedback(), "Excellent pose! Great alignment.");
        assert_eq!(Accuracy::from_percent(89).overall_feedback(), "Good pose! Minor adjustments needed.");
        assert_eq!(
            Accuracy::from_percent(50).overall_feedback(),
            "Getting there! Focus on the highlighted areas."
        );
        assert_eq!(Accuracy::from_percent(49).overall_feedback(), "Keep practicing! Check your form.");
    }

    #[test]
    fn test_color_band() {
        assert_eq!(Accuracy::from_percent(80).band(), AccuracyBand::Good);
        assert_eq!(Accuracy::from_percent(60).band(), AccuracyBand::Fair);
        assert_eq!(Accuracy::from_percent(59).band().color(), "#F44336");
    }

    #[test]
    fn test_grades() {
        assert_eq!(Accuracy::from_percent(95).grade().as_str(), "A+");
        assert_eq!(Accuracy::from_percent(80).grade(), Grade::A);
        assert_eq!(Accuracy::from_percent(72).grade(), Grade::BPlus);
        assert_eq!(Accuracy::from_percent(55).grade(), Grade::CPlus);
        assert_eq!(Accuracy::from_percent(10).grade(), Grade::C);
        assert!(Grade::APlus > Grade::B);
    }

    #[test]
    fn test_deserialize_clamps_out_of_range() {
        let a: Accuracy = serde_json::from_str("250").unwrap();
        assert_eq!(a, Accuracy::PERFECT);
        assert_eq!(a.grade(), Grade::APlus);

        let json = serde_json::to_string(&Accuracy::from_percent(87)).unwrap();
        assert_eq!(json, "87");
        assert!(serde_json::from_str::<Accuracy>("-3").is_err());
    }
}
