//! Confidence aggregation

use crate::model::mapping::Confidence;

/// Arithmetic mean of the scores. An empty set scores 1.0: nothing to
/// translate means nothing was translated badly.
pub fn mean<I>(scores: I) -> f64
where
    I: IntoIterator<Item = Confidence>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), c| (sum + c.value(), count + 1));

    if count == 0 {
        1.0
    } else {
        sum / count as f64
    }
}
