/// Three-tier usage classification for a percentage reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

/// Lower bounds (inclusive) of the warning and critical tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning:  f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warning: 60.0, critical: 80.0 }
    }
}

impl Thresholds {
    /// Classify `value`.  Boundaries belong to the higher tier; non-finite
    /// values are `Normal`.
    #[must_use]
    pub fn classify(&self, value: f64) -> UsageLevel {
        if !value.is_finite() {
            UsageLevel::Normal
        } else if value >= self.critical {
            UsageLevel::Critical
        } else if value >= self.warning {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_take_the_higher_tier() {
        let t = Thresholds::default();
        assert_eq!(t.classify(80.0), UsageLevel::Critical);
        assert_eq!(t.classify(60.0), UsageLevel::Warning);
        assert_eq!(t.classify(79.99), UsageLevel::Warning);
        assert_eq!(t.classify(59.99), UsageLevel::Normal);
    }

    #[test]
    fn sweep_matches_tier_definition() {
        let t = Thresholds::default();
        for tenth in 0..=1000 {
            let v = f64::from(tenth) / 10.0;
            let expected = if v >= 80.0 {
                UsageLevel::Critical
            } else if v >= 60.0 {
                UsageLevel::Warning
            } else {
                UsageLevel::Normal
            };
            assert_eq!(t.classify(v), expected, "value {v}");
        }
    }

    #[test]
    fn non_finite_is_normal() {
        let t = Thresholds::default();
        assert_eq!(t.classify(f64::NAN), UsageLevel::Normal);
        assert_eq!(t.classify(f64::INFINITY), UsageLevel::Normal);
    }
}
