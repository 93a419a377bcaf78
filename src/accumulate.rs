//! Integration of rate series into cumulative volumes.

use ndarray::{Array1, ArrayView1};

/// Integrate an instantaneous `rate` series over `time` into a cumulative series.
///
/// Rates reported by the simulator hold for the interval *following* their sample, so the
/// integral is a left-endpoint (rectangle) sum:
///
/// ```text
/// c[0] = 0
/// c[i] = c[i-1] + (t[i] - t[i-1]) * r[i-1]
/// ```
///
/// Non-finite values are not guarded against and propagate into the rest of the series.
///
/// # Panics
///
/// If `time` and `rate` have different lengths.
///
/// ```
/// use adgprs_summary::accumulate::accumulate;
/// use ndarray::array;
///
/// let c = accumulate(array![0., 1., 3., 6.].view(), array![1000., 100., 10., 1.].view());
/// assert_eq!(c, array![0., 1000., 1200., 1230.]);
/// ```
pub fn accumulate(time: ArrayView1<f64>, rate: ArrayView1<f64>) -> Array1<f64> {
    assert_eq!(
        time.len(),
        rate.len(),
        "time and rate series must have the same length"
    );

    let mut total = 0.0;
    let mut cumulative = Array1::zeros(time.len());

    for i in 1..time.len() {
        total += (time[i] - time[i - 1]) * rate[i - 1];
        cumulative[i] = total;
    }

    cumulative
}
