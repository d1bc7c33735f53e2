//! Median Filter for Spike Rejection

/// Compute the median of a raw sample window.
///
/// Sorts a working copy of the input, then returns the middle element for an
/// odd-length window or the mean of the two central elements for an
/// even-length one. The source slice is never mutated. An empty window
/// yields 0.
pub fn median(samples: &[u16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut work = samples.to_vec();
    work.sort_unstable();

    let mid = work.len() / 2;
    if work.len() % 2 == 1 {
        work[mid] as f32
    } else {
        (work[mid - 1] as f32 + work[mid] as f32) / 2.0
    }
}
