//! Network status classification.

/// Discrete quality rating derived from the latest efficiency reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Unknown,
    Poor,
    Moderate,
    Good,
}

impl NetworkStatus {
    /// Severity rank for styling decisions; higher is more severe.
    /// `Unknown` means "no reading yet", not an alarm, so it ranks lowest.
    pub fn severity(&self) -> u8 {
        match self {
            NetworkStatus::Unknown => 0,
            NetworkStatus::Good => 1,
            NetworkStatus::Moderate => 2,
            NetworkStatus::Poor => 3,
        }
    }
}

impl std::fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkStatus::Unknown => write!(f, "Unknown"),
            NetworkStatus::Poor => write!(f, "Poor"),
            NetworkStatus::Moderate => write!(f, "Moderate"),
            NetworkStatus::Good => write!(f, "Good"),
        }
    }
}

/// Maps an efficiency percentage to a status rating.
///
/// Thresholds: below 40 is Poor, 40 up to (not including) 75 is Moderate,
/// 75 and above is Good. A missing reading is Unknown.
pub fn classify(efficiency: Option<f64>) -> NetworkStatus {
    match efficiency {
        None => NetworkStatus::Unknown,
        Some(value) if value < 40.0 => NetworkStatus::Poor,
        Some(value) if value < 75.0 => NetworkStatus::Moderate,
        Some(_) => NetworkStatus::Good,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, NetworkStatus::Unknown)]
    #[case(Some(0.0), NetworkStatus::Poor)]
    #[case(Some(39.0), NetworkStatus::Poor)]
    #[case(Some(40.0), NetworkStatus::Moderate)]
    #[case(Some(74.0), NetworkStatus::Moderate)]
    #[case(Some(75.0), NetworkStatus::Good)]
    #[case(Some(100.0), NetworkStatus::Good)]
    fn classifies_efficiency_boundaries(
        #[case] efficiency: Option<f64>,
        #[case] expected: NetworkStatus,
    ) {
        assert_eq!(classify(efficiency), expected);
    }

    #[test]
    fn severity_ranks_poor_highest() {
        assert!(NetworkStatus::Poor.severity() > NetworkStatus::Moderate.severity());
        assert!(NetworkStatus::Moderate.severity() > NetworkStatus::Good.severity());
        assert!(NetworkStatus::Good.severity() > NetworkStatus::Unknown.severity());
    }
}
