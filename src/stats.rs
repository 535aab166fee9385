//! Numeric helpers for limits and histogram binning.

/// Minimum and maximum of a slice, ignoring NaN. `None` when nothing is left.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| !v.is_nan());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// `n_bins + 1` evenly spaced edges covering all values.
///
/// A degenerate range is widened by 0.5 on each side; no values yield `[0, 1]`.
pub fn histogram_bin_edges(values: &[f64], n_bins: usize) -> Vec<f64> {
    let n_bins = n_bins.max(1);
    let (mut lo, mut hi) = min_max(values).unwrap_or((0.0, 1.0));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let step = (hi - lo) / n_bins as f64;
    (0..=n_bins)
        .map(|i| if i == n_bins { hi } else { lo + step * i as f64 })
        .collect()
}

/// Bin heights of `values` over `edges`. The last bin is closed on the right.
pub fn histogram_counts(values: &[f64], edges: &[f64], density: bool, cumulative: bool) -> Vec<f64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let n_bins = edges.len() - 1;
    let (lo, hi) = (edges[0], edges[n_bins]);
    let mut counts = vec![0.0; n_bins];

    for &v in values {
        if v.is_nan() || v < lo || v > hi {
            continue;
        }
        // first edge strictly greater than v, minus one
        let idx = edges.partition_point(|&e| e <= v).saturating_sub(1).min(n_bins - 1);
        counts[idx] += 1.0;
    }

    if density {
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            for (i, c) in counts.iter_mut().enumerate() {
                *c /= total * (edges[i + 1] - edges[i]);
            }
        }
    }

    if cumulative {
        let mut running = 0.0;
        for (i, c) in counts.iter_mut().enumerate() {
            running += if density { *c * (edges[i + 1] - edges[i]) } else { *c };
            *c = running;
        }
    }

    counts
}
