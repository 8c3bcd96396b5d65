//! Insertion candidate record.

/// One insertion opportunity: put `customer` right after `predecessor`
/// on route `route`.
///
/// `cost` is the extra distance of the detour through the customer and
/// `score` the customer's score, carried along for fuzzy selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// POI to insert.
    pub customer: usize,
    /// Route index receiving the POI.
    pub route: usize,
    /// Node the POI is spliced after (a POI or the route's depot).
    pub predecessor: usize,
    /// Marginal distance `d(pre, c) + d(c, suc) - d(pre, suc)`.
    pub cost: f64,
    /// Score collected by visiting the POI.
    pub score: f64,
}
