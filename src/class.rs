use serde::Serialize;

/// One of the five ordered classes an indicator value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorClass {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl IndicatorClass {
    pub const COUNT: usize = 5;

    /// Ordinal position, 0 (lowest) through 4 (highest).
    #[inline] pub fn index(self) -> usize { self as usize }

    /// Lowercase label used by narrative text and legends.
    pub fn label(self) -> &'static str {
        match self {
            IndicatorClass::Lowest => "lowest",
            IndicatorClass::Low => "low",
            IndicatorClass::Medium => "medium",
            IndicatorClass::High => "high",
            IndicatorClass::Highest => "highest",
        }
    }

    pub(crate) fn from_index(index: usize) -> IndicatorClass {
        match index {
            0 => IndicatorClass::Lowest,
            1 => IndicatorClass::Low,
            2 => IndicatorClass::Medium,
            3 => IndicatorClass::High,
            _ => IndicatorClass::Highest,
        }
    }
}

/// Four ascending thresholds separating the five classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breaks(pub [f64; 4]);

impl Breaks {
    /// Fixed thresholds, ascending.
    pub fn fixed(breaks: [f64; 4]) -> Self {
        Self(breaks)
    }

    /// Five equal bins over [min, max].
    pub fn equal_interval(min: f64, max: f64) -> Self {
        let step = (max - min) / 5.0;
        Self([min + step, min + step * 2.0, min + step * 3.0, min + step * 4.0])
    }

    /// Thresholds at a quarter, half, three quarters, and the whole of `max`.
    pub fn quarters_of(max: f64) -> Self {
        Self([max * 0.25, max * 0.5, max * 0.75, max])
    }

    /// Classify a value: the class index is the number of thresholds the
    /// value reaches, so each boundary belongs to the upper class.
    /// Non-finite values classify as if they were 0, so missing data lands
    /// in the lowest class rather than poisoning the aggregation.
    pub fn classify(&self, value: f64) -> IndicatorClass {
        let v = if value.is_finite() { value } else { 0.0 };
        IndicatorClass::from_index(self.0.iter().filter(|&&b| v >= b).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKS: Breaks = Breaks([500.0, 1000.0, 1500.0, 2000.0]);

    #[test]
    fn every_finite_value_gets_exactly_one_class() {
        assert_eq!(BREAKS.classify(-10.0), IndicatorClass::Lowest);
        assert_eq!(BREAKS.classify(0.0), IndicatorClass::Lowest);
        assert_eq!(BREAKS.classify(750.0), IndicatorClass::Low);
        assert_eq!(BREAKS.classify(1200.0), IndicatorClass::Medium);
        assert_eq!(BREAKS.classify(1700.0), IndicatorClass::High);
        assert_eq!(BREAKS.classify(99999.0), IndicatorClass::Highest);
    }

    #[test]
    fn boundaries_belong_to_the_upper_class() {
        for (i, b) in BREAKS.0.iter().enumerate() {
            assert_eq!(BREAKS.classify(b - 1e-6).index(), i);
            assert_eq!(BREAKS.classify(*b).index(), i + 1);
        }
    }

    #[test]
    fn classification_is_monotonic() {
        let samples = [-100.0, 0.0, 499.0, 500.0, 999.0, 1000.0, 1499.0, 1500.0, 1999.0, 2000.0, 5000.0];
        let mut last = 0;
        for v in samples {
            let index = BREAKS.classify(v).index();
            assert!(index >= last, "classify({v}) regressed to {index}");
            last = index;
        }
    }

    #[test]
    fn non_finite_values_classify_as_zero() {
        assert_eq!(BREAKS.classify(f64::NAN), IndicatorClass::Lowest);
        assert_eq!(BREAKS.classify(f64::INFINITY), IndicatorClass::Lowest);
        assert_eq!(BREAKS.classify(f64::NEG_INFINITY), IndicatorClass::Lowest);
    }

    #[test]
    fn equal_interval_splits_the_domain_into_fifths() {
        assert_eq!(Breaks::equal_interval(0.0, 1000.0).0, [200.0, 400.0, 600.0, 800.0]);
        assert_eq!(Breaks::equal_interval(0.0, 100.0).0, [20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn quarters_of_max_tops_out_at_max() {
        assert_eq!(Breaks::quarters_of(800.0).0, [200.0, 400.0, 600.0, 800.0]);
        // Only the maximum itself reaches the highest class.
        assert_eq!(Breaks::quarters_of(800.0).classify(800.0), IndicatorClass::Highest);
        assert_eq!(Breaks::quarters_of(800.0).classify(799.0), IndicatorClass::High);
    }

    #[test]
    fn labels_are_ordered_lowercase() {
        let labels: Vec<&str> = (0..IndicatorClass::COUNT)
            .map(|i| IndicatorClass::from_index(i).label())
            .collect();
        assert_eq!(labels, ["lowest", "low", "medium", "high", "highest"]);
    }
}
