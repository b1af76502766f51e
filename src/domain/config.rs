// ============================================================================
// Calculator Configuration
// Parameters and validation for building a rate calculator
// ============================================================================

use crate::numeric::{DecimalFactory, DecimalOps};
use std::fmt;

/// Smallest root the series expansion is defined for.
pub const MIN_ROOT: u32 = 2;

/// Term cache ceiling applied when the configuration leaves it unset.
pub const DEFAULT_MAX_TERMS_CACHE: u32 = 30_000;

/// Configuration for a [`Calculator`](crate::engine::Calculator).
///
/// Immutable once validated. The decimal backend is chosen by the
/// `convergence_radius` value and the `new_from_int` factory; the engine
/// itself never constructs decimals any other way.
#[derive(Debug, Clone)]
pub struct CalculatorConfig<D: DecimalOps> {
    /// Root of the expansion: the calculator computes `(1+x)^(1/root) - 1`.
    pub root: u32,

    /// Number of fractional digits the result is computed to.
    pub precision: u32,

    /// Radius of the interval around zero inside which convergence is
    /// proven at construction time. Must be positive.
    pub convergence_radius: D,

    /// Upper bound on the number of Taylor terms precomputed before
    /// construction gives up. Zero means [`DEFAULT_MAX_TERMS_CACHE`].
    pub max_terms_cache: u32,

    /// Integer-to-decimal factory for the chosen backend.
    pub new_from_int: Option<DecimalFactory<D>>,
}

impl<D: DecimalOps> CalculatorConfig<D> {
    /// Create a configuration with the default term cache ceiling.
    pub fn new(
        root: u32,
        precision: u32,
        convergence_radius: D,
        new_from_int: DecimalFactory<D>,
    ) -> Self {
        Self {
            root,
            precision,
            convergence_radius,
            max_terms_cache: DEFAULT_MAX_TERMS_CACHE,
            new_from_int: Some(new_from_int),
        }
    }

    /// Builder method: Override the term cache ceiling.
    pub fn with_max_terms_cache(mut self, max_terms_cache: u32) -> Self {
        self.max_terms_cache = max_terms_cache;
        self
    }

    /// Validate the pure parts of the configuration.
    ///
    /// The convergence radius sign is checked during construction instead,
    /// because comparing it against zero takes one factory call.
    ///
    /// # Errors
    /// [`ConfigError::RootTooSmall`] if `root < 2`,
    /// [`ConfigError::MissingFactory`] if no factory was provided.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root < MIN_ROOT {
            return Err(ConfigError::RootTooSmall { root: self.root });
        }

        if self.new_from_int.is_none() {
            return Err(ConfigError::MissingFactory);
        }

        Ok(())
    }

    /// Apply defaults to unset fields.
    pub(crate) fn normalized(mut self) -> Self {
        if self.max_terms_cache == 0 {
            self.max_terms_cache = DEFAULT_MAX_TERMS_CACHE;
        }
        self
    }
}

/// Rejected configuration values, detected before any expensive computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The expansion root is below [`MIN_ROOT`].
    RootTooSmall {
        /// The rejected root.
        root: u32,
    },
    /// The convergence radius is zero or negative.
    ConvergenceRadiusNotPositive {
        /// The rejected radius, rendered by the backend.
        radius: String,
    },
    /// No integer-to-decimal factory was provided.
    MissingFactory,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RootTooSmall { root } => {
                write!(f, "root should be at least {}, got {}", MIN_ROOT, root)
            },
            ConfigError::ConvergenceRadiusNotPositive { radius } => {
                write!(f, "convergence radius should be positive, got '{}'", radius)
            },
            ConfigError::MissingFactory => {
                write!(f, "'decimal from integer' factory must be provided")
            },
        }
    }
}

impl std::error::Error for ConfigError {}
