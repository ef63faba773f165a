use serde::{Deserialize, Serialize};

/// The closed interval covered by a dataset.
///
/// Used as a normalization baseline: differences are divided by
/// [`Extent::span`], and a zero span is a valid, degenerate extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// The smallest value.
    pub min: f64,
    /// The largest value.
    pub max: f64,
}

impl Extent {
    /// The extent used when there is no data at all.
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// Computes the extent of the given values in a single pass.
    ///
    /// NaN values are ignored. Returns `None` when no comparable value is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ballotlens_stats::extent::Extent;
    ///
    /// let extent = Extent::new([3.0, f64::NAN, -1.0, 8.0]).unwrap();
    /// assert_eq!(extent.min, -1.0);
    /// assert_eq!(extent.max, 8.0);
    /// assert!(Extent::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(Self { min, max }) => Some(Self {
                    min: min.min(v),
                    max: max.max(v),
                }),
            })
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Divides `delta` by the span, defining the result as zero for a zero span.
    ///
    /// # Examples
    ///
    /// ```
    /// use ballotlens_stats::extent::Extent;
    ///
    /// let extent = Extent { min: 10.0, max: 40.0 };
    /// assert_eq!(extent.normalize_delta(15.0), 0.5);
    ///
    /// let flat = Extent { min: 5.0, max: 5.0 };
    /// assert_eq!(flat.normalize_delta(3.0), 0.0);
    /// ```
    #[must_use]
    pub fn normalize_delta(&self, delta: f64) -> f64 {
        let span = self.span();
        if span == 0.0 { 0.0 } else { delta / span }
    }
}
