//! Ordinary-least-squares line fit for the scatter trendline.

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OlsFit {
    pub(crate) slope: f64,
    pub(crate) intercept: f64,
}

impl OlsFit {
    pub(crate) fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a line through `(x, y)` pairs. Returns `None` when fewer than two
/// points remain or the x values carry no variance (a vertical fit has no
/// least-squares solution).
pub(crate) fn fit(points: impl IntoIterator<Item = (f64, f64)>) -> Option<OlsFit> {
    let mut n = 0.0f64;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for (x, y) in points {
        n += 1.0;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    if n < 2.0 {
        return None;
    }

    let var_x = sum_xx - sum_x * sum_x / n;
    if var_x <= f64::EPSILON {
        return None;
    }

    let slope = (sum_xy - sum_x * sum_y / n) / var_x;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }
    Some(OlsFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::fit;

    #[test]
    fn recovers_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fitted = fit(points).unwrap();
        assert!((fitted.slope - 2.0).abs() < 1e-12);
        assert!((fitted.intercept - 1.0).abs() < 1e-12);
        assert!((fitted.predict(10.0) - 21.0).abs() < 1e-12);
    }

    #[test]
    fn averages_noise_around_a_trend() {
        let points = [(0.0, 0.9), (1.0, 2.1), (2.0, 2.9), (3.0, 4.1)];
        let fitted = fit(points).unwrap();
        assert!((fitted.slope - 1.0).abs() < 0.1);
    }

    #[test]
    fn too_few_points() {
        assert!(fit([]).is_none());
        assert!(fit([(1.0, 2.0)]).is_none());
    }

    #[test]
    fn zero_variance_x() {
        assert!(fit([(2.0, 1.0), (2.0, 5.0), (2.0, 9.0)]).is_none());
    }
}
