use std::fmt;

/// Identifies the algorithm that produced a solution.
///
/// [`Method::name`] gives a stable tag that external adapters can use as a
/// lookup key. Nothing in this crate dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Lbfgs,
    Sr1,
    Dfp,
    TrustRegionCauchy,
    TrustRegionDogleg,
    TrustRegionSteihaugCg,
    QuadraticPenalty,
    LogBarrier,
    AugmentedLagrangian,
    ProjectedGradient,
    Broyden,
}

impl Method {
    /// Returns the stable name of this method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lbfgs => "lbfgs",
            Self::Sr1 => "sr1",
            Self::Dfp => "dfp",
            Self::TrustRegionCauchy => "trust-region-cauchy",
            Self::TrustRegionDogleg => "trust-region-dogleg",
            Self::TrustRegionSteihaugCg => "trust-region-steihaug-cg",
            Self::QuadraticPenalty => "quadratic-penalty",
            Self::LogBarrier => "log-barrier",
            Self::AugmentedLagrangian => "augmented-lagrangian",
            Self::ProjectedGradient => "projected-gradient",
            Self::Broyden => "broyden",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
