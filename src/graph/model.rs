//! Dense symmetric pair weights.

use thiserror::Error;

/// Errors raised while building a [`RoomGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// No weight was recorded for this pair.
    #[error("no weights recorded for pair ({i}, {j})")]
    MissingPair { i: usize, j: usize },

    /// A pair references a student outside `0..n`.
    #[error("student {item} out of range for a graph of {n} students")]
    ItemOutOfRange { item: usize, n: usize },

    /// A pair of a student with itself.
    #[error("self pair ({0}, {0}) is not allowed")]
    SelfPair(usize),

    /// Weights must be finite and non-negative.
    #[error("invalid {kind} weight {value} for pair ({i}, {j})")]
    InvalidWeight {
        i: usize,
        j: usize,
        kind: &'static str,
        value: f64,
    },

    /// `n * n` does not fit in memory addressing.
    #[error("a graph of {n} students is too large")]
    TooLarge { n: usize },

    /// A weight matrix of the wrong length.
    #[error("expected {expected} weights for {n} students, found {found}")]
    Shape {
        n: usize,
        expected: usize,
        found: usize,
    },

    /// `(i, j)` and `(j, i)` carry different weights.
    #[error("weights of pair ({i}, {j}) are not symmetric")]
    Asymmetric { i: usize, j: usize },

    /// A student paired with itself has a non-zero weight.
    #[error("non-zero self weight for student {0}")]
    NonZeroDiagonal(usize),
}

/// Complete graph over `n` students with happiness and stress per pair.
///
/// Lookups are symmetric: `happiness(i, j) == happiness(j, i)`. The
/// diagonal is zero so a student paired with itself contributes nothing.
/// Deserialized graphs go through the same checks as [`RoomGraphBuilder`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawRoomGraph")
)]
pub struct RoomGraph {
    n: usize,
    happiness: Vec<f64>,
    stress: Vec<f64>,
}

impl RoomGraph {
    /// Builds a complete graph from a closure called once per unordered
    /// pair `(i, j)` with `i < j`, returning `(happiness, stress)`.
    ///
    /// # Panics
    /// Panics if the closure returns a negative or non-finite weight.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> (f64, f64),
    {
        let mut builder = RoomGraphBuilder::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let (h, s) = f(i, j);
                builder = builder.pair(i, j, h, s);
            }
        }
        match builder.build() {
            Ok(graph) => graph,
            Err(e) => panic!("RoomGraph::from_fn: {e}"),
        }
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the graph has no students.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Happiness of the pair `(i, j)`; zero when `i == j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn happiness(&self, i: usize, j: usize) -> f64 {
        self.happiness[self.index(i, j)]
    }

    /// Stress of the pair `(i, j)`; zero when `i == j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn stress(&self, i: usize, j: usize) -> f64 {
        self.stress[self.index(i, j)]
    }

    /// Sum of happiness over every ordered pair `(i, j)` inside `members`,
    /// so each unordered pair contributes twice.
    pub fn room_happiness(&self, members: &[usize]) -> f64 {
        self.pair_sum(members, &self.happiness)
    }

    /// Sum of stress over every ordered pair `(i, j)` inside `members`.
    pub fn room_stress(&self, members: &[usize]) -> f64 {
        self.pair_sum(members, &self.stress)
    }

    /// Returns a copy with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            n: self.n,
            happiness: self.happiness.iter().map(|w| w * factor).collect(),
            stress: self.stress.iter().map(|w| w * factor).collect(),
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "pair ({i}, {j}) out of range for {} students",
            self.n
        );
        i * self.n + j
    }

    fn pair_sum(&self, members: &[usize], weights: &[f64]) -> f64 {
        let mut total = 0.0;
        for &i in members {
            for &j in members {
                // diagonal is zero
                total += weights[self.index(i, j)];
            }
        }
        total
    }
}

/// Unchecked field layout of [`RoomGraph`], validated on conversion.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(not(feature = "serde"), allow(dead_code))]
struct RawRoomGraph {
    n: usize,
    happiness: Vec<f64>,
    stress: Vec<f64>,
}

impl TryFrom<RawRoomGraph> for RoomGraph {
    type Error = GraphError;

    fn try_from(raw: RawRoomGraph) -> Result<Self, Self::Error> {
        let n = raw.n;
        let expected = n.checked_mul(n).ok_or(GraphError::TooLarge { n })?;
        for found in [raw.happiness.len(), raw.stress.len()] {
            if found != expected {
                return Err(GraphError::Shape { n, expected, found });
            }
        }

        let mut builder = RoomGraphBuilder::new(n);
        for i in 0..n {
            let d = i * n + i;
            if raw.happiness[d] != 0.0 || raw.stress[d] != 0.0 {
                return Err(GraphError::NonZeroDiagonal(i));
            }
            for j in (i + 1)..n {
                let (a, b) = (i * n + j, j * n + i);
                if raw.happiness[a].to_bits() != raw.happiness[b].to_bits()
                    || raw.stress[a].to_bits() != raw.stress[b].to_bits()
                {
                    return Err(GraphError::Asymmetric { i, j });
                }
                builder = builder.pair(i, j, raw.happiness[a], raw.stress[a]);
            }
        }
        builder.build()
    }
}

/// Incremental builder for [`RoomGraph`].
///
/// # Examples
///
/// ```
/// use breakout_rooms::graph::RoomGraphBuilder;
///
/// let graph = RoomGraphBuilder::new(3)
///     .pair(0, 1, 10.0, 2.0)
///     .pair(0, 2, 3.0, 1.0)
///     .pair(1, 2, 4.0, 5.0)
///     .build()
///     .unwrap();
/// assert_eq!(graph.happiness(1, 0), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoomGraphBuilder {
    n: usize,
    weights: Vec<Option<(f64, f64)>>,
    error: Option<GraphError>,
}

impl RoomGraphBuilder {
    /// Starts an empty builder for `n` students. A size whose `n * n`
    /// overflows is reported by [`build`](Self::build).
    pub fn new(n: usize) -> Self {
        match n.checked_mul(n) {
            Some(len) => Self {
                n,
                weights: vec![None; len],
                error: None,
            },
            None => Self {
                n,
                weights: Vec::new(),
                error: Some(GraphError::TooLarge { n }),
            },
        }
    }

    /// Records the weights of the unordered pair `{i, j}`.
    ///
    /// A later call for the same pair overwrites the earlier one. The
    /// first invalid pair is remembered and reported by [`build`](Self::build).
    pub fn pair(mut self, i: usize, j: usize, happiness: f64, stress: f64) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(e) = self.check(i, j, happiness, stress) {
            self.error = Some(e);
            return self;
        }
        self.weights[i * self.n + j] = Some((happiness, stress));
        self.weights[j * self.n + i] = Some((happiness, stress));
        self
    }

    /// Finalizes the graph, failing if any pair is missing.
    pub fn build(self) -> Result<RoomGraph, GraphError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let n = self.n;
        let mut happiness = vec![0.0; n * n];
        let mut stress = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (h, s) = self.weights[i * n + j].ok_or(GraphError::MissingPair { i, j })?;
                happiness[i * n + j] = h;
                happiness[j * n + i] = h;
                stress[i * n + j] = s;
                stress[j * n + i] = s;
            }
        }
        Ok(RoomGraph {
            n,
            happiness,
            stress,
        })
    }

    fn check(&self, i: usize, j: usize, happiness: f64, stress: f64) -> Result<(), GraphError> {
        for item in [i, j] {
            if item >= self.n {
                return Err(GraphError::ItemOutOfRange { item, n: self.n });
            }
        }
        if i == j {
            return Err(GraphError::SelfPair(i));
        }
        for (kind, value) in [("happiness", happiness), ("stress", stress)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidWeight { i, j, kind, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RoomGraph {
        RoomGraphBuilder::new(3)
            .pair(0, 1, 10.0, 2.0)
            .pair(0, 2, 3.0, 1.0)
            .pair(2, 1, 4.0, 5.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let g = triangle();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(g.happiness(i, j), g.happiness(j, i));
                assert_eq!(g.stress(i, j), g.stress(j, i));
            }
        }
        assert_eq!(g.happiness(1, 2), 4.0);
        assert_eq!(g.stress(0, 0), 0.0);
    }

    #[test]
    fn test_room_sums_count_ordered_pairs() {
        let g = triangle();
        assert!((g.room_happiness(&[0, 1, 2]) - 34.0).abs() < 1e-12);
        assert!((g.room_stress(&[2, 0, 1]) - 16.0).abs() < 1e-12);
        assert!((g.room_happiness(&[0, 2]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_student_room_counts_both_directions() {
        let g = RoomGraphBuilder::new(2).pair(0, 1, 1.0, 5.0).build().unwrap();
        assert_eq!(g.room_stress(&[0, 1]), 10.0);
        assert_eq!(g.room_happiness(&[1, 0]), 2.0);
    }

    #[test]
    fn test_singleton_and_empty_rooms_are_zero() {
        let g = triangle();
        assert_eq!(g.room_happiness(&[1]), 0.0);
        assert_eq!(g.room_stress(&[1]), 0.0);
        assert_eq!(g.room_happiness(&[]), 0.0);
    }

    #[test]
    fn test_missing_pair_is_rejected() {
        let err = RoomGraphBuilder::new(3)
            .pair(0, 1, 1.0, 1.0)
            .pair(1, 2, 1.0, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::MissingPair { i: 0, j: 2 });
    }

    #[test]
    fn test_invalid_pairs_are_rejected() {
        let err = RoomGraphBuilder::new(2).pair(0, 2, 1.0, 1.0).build();
        assert_eq!(err, Err(GraphError::ItemOutOfRange { item: 2, n: 2 }));

        let err = RoomGraphBuilder::new(2).pair(1, 1, 1.0, 1.0).build();
        assert_eq!(err, Err(GraphError::SelfPair(1)));

        let err = RoomGraphBuilder::new(2).pair(0, 1, -1.0, 1.0).build();
        assert!(matches!(err, Err(GraphError::InvalidWeight { kind: "happiness", .. })));

        let err = RoomGraphBuilder::new(2).pair(0, 1, 1.0, f64::NAN).build();
        assert!(matches!(err, Err(GraphError::InvalidWeight { kind: "stress", .. })));
    }

    #[test]
    fn test_degenerate_sizes_build() {
        assert!(RoomGraphBuilder::new(0).build().unwrap().is_empty());
        assert_eq!(RoomGraphBuilder::new(1).build().unwrap().len(), 1);
    }

    #[test]
    fn test_oversized_builder_reports_error() {
        let err = RoomGraphBuilder::new(usize::MAX).pair(0, 1, 1.0, 1.0).build();
        assert_eq!(err, Err(GraphError::TooLarge { n: usize::MAX }));
    }

    fn raw(n: usize, happiness: Vec<f64>, stress: Vec<f64>) -> RawRoomGraph {
        RawRoomGraph {
            n,
            happiness,
            stress,
        }
    }

    #[test]
    fn test_raw_conversion_accepts_valid_matrices() {
        let g = triangle();
        let back = RoomGraph::try_from(raw(3, g.happiness.clone(), g.stress.clone())).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_raw_conversion_rejects_invalid_matrices() {
        let err = RoomGraph::try_from(raw(2, vec![0.0; 3], vec![0.0; 4]));
        assert_eq!(
            err,
            Err(GraphError::Shape {
                n: 2,
                expected: 4,
                found: 3
            })
        );

        let err = RoomGraph::try_from(raw(2, vec![0.0, 1.0, 2.0, 0.0], vec![0.0; 4]));
        assert_eq!(err, Err(GraphError::Asymmetric { i: 0, j: 1 }));

        let err = RoomGraph::try_from(raw(2, vec![1.0, 0.0, 0.0, 0.0], vec![0.0; 4]));
        assert_eq!(err, Err(GraphError::NonZeroDiagonal(0)));

        let err = RoomGraph::try_from(raw(2, vec![0.0; 4], vec![0.0, -3.0, -3.0, 0.0]));
        assert!(matches!(err, Err(GraphError::InvalidWeight { kind: "stress", .. })));

        let err = RoomGraph::try_from(raw(usize::MAX, Vec::new(), Vec::new()));
        assert_eq!(err, Err(GraphError::TooLarge { n: usize::MAX }));
    }

    #[test]
    fn test_scaled() {
        let g = triangle().scaled(2.0);
        assert_eq!(g.happiness(0, 1), 20.0);
        assert_eq!(g.stress(1, 2), 10.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_lookup_panics() {
        triangle().happiness(0, 3);
    }
}
