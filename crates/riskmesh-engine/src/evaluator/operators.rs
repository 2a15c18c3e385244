//! The operator table.
//!
//! Every operator reduces to one comparison between the sampled interval
//! and the payload interval. In and Out keep their historical inverted
//! meaning: In holds when the sample straddles the payload range.

use riskmesh_core::model::Operator;

use super::interval::Interval;

/// Decide `operator` for a sampled interval against a payload interval.
///
/// Has and HasNot receive the interval of the matching component sample.
/// Exists and DoesNotExist depend on estimate presence, not on samples,
/// and are resolved by the evaluator; here they never hold.
pub fn compare(operator: Operator, sampled: Interval, dep: Interval) -> bool {
    match operator {
        Operator::Happens | Operator::Has => sampled.min > 0.0,
        Operator::DoesNotHappen | Operator::HasNot => sampled.min <= 0.0,
        Operator::In => sampled.min < dep.min && sampled.max > dep.max,
        Operator::Out => sampled.min > dep.min && sampled.max < dep.max,
        Operator::Eq => sampled.min > dep.min && sampled.max < dep.max,
        Operator::Neq => sampled.min < dep.min && sampled.max > dep.max,
        Operator::Lt => sampled.max < dep.max,
        Operator::Gt => sampled.min > dep.min,
        Operator::Lte => sampled.max <= dep.max,
        Operator::Gte => sampled.min >= dep.min,
        Operator::Exists | Operator::DoesNotExist => false,
    }
}
