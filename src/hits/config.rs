use serde::Deserialize;

use crate::aoi::GazeLabel;

/// Which half of a fraction an AOI belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionPart {
    Numerator,
    Denominator,
}

/// AOI names that make up the numerator and denominator sides for
/// transition counting.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FractionParts {
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

impl Default for FractionParts {
    fn default() -> Self {
        Self {
            numerator: vec!["H_N1".into(), "H_N2".into()],
            denominator: vec!["H_D1".into(), "H_D2".into()],
        }
    }
}

impl FractionParts {
    /// Numerator membership is checked first.
    pub fn part_of(&self, label: &GazeLabel) -> Option<FractionPart> {
        let GazeLabel::Named(name) = label else {
            return None;
        };
        if self.numerator.iter().any(|n| n == name) {
            Some(FractionPart::Numerator)
        } else if self.denominator.iter().any(|d| d == name) {
            Some(FractionPart::Denominator)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parts() {
        let parts = FractionParts::default();
        assert_eq!(
            parts.part_of(&GazeLabel::Named("H_N2".into())),
            Some(FractionPart::Numerator)
        );
        assert_eq!(
            parts.part_of(&GazeLabel::Named("H_D1".into())),
            Some(FractionPart::Denominator)
        );
        assert_eq!(parts.part_of(&GazeLabel::Named("H_W1".into())), None);
        assert_eq!(parts.part_of(&GazeLabel::OutsideAois), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let parts: FractionParts = serde_json::from_str(r#"{"numerator":["N"]}"#).unwrap();
        assert_eq!(parts.numerator, vec!["N".to_string()]);
        assert_eq!(parts.denominator, FractionParts::default().denominator);
    }
}
