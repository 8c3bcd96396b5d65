//! Insertion evaluation and solution auditing.
//!
//! - [`CandidateEvaluator`]: per-POI cheapest feasible insertion across open routes
//! - [`Candidate`]: one insertion opportunity
//! - [`audit_solution`]: from-scratch feasibility check of a finished solution

mod audit;
mod candidate;
mod evaluator;

pub use audit::audit_solution;
pub use candidate::Candidate;
pub use evaluator::CandidateEvaluator;
