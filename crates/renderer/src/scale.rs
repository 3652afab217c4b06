//! Value-to-colour normalization and axis tick selection.

/// Linear mapping from data values to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Plain `min..max` of the finite values.
    pub fn linear<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        let (min, max) = finite_range(values)?;
        Some(Self::new(min, max))
    }

    /// Scale for diverging colormaps.
    ///
    /// Data that straddles zero gets symmetric limits `±max|v|` so that zero
    /// sits at the colormap centre; one-signed data keeps `min..max`.
    pub fn diverging<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        let (min, max) = finite_range(values)?;
        if min < 0.0 && max > 0.0 {
            let limit = min.abs().max(max.abs());
            Some(Self::new(-limit, limit))
        } else {
            Some(Self::new(min, max))
        }
    }

    /// Position of `value` in `[0, 1]`, or `None` for NaN.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some(((value - self.min) / range).clamp(0.0, 1.0))
    }
}

fn finite_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Round a step to 1, 2, 2.5 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let exponent = raw.log10().floor();
    let base = 10f64.powf(exponent);
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions at a "nice" interval inside `[min, max]`, aiming for about
/// `target` ticks.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min || target == 0 {
        return Vec::new();
    }

    let step = nice_step((max - min) / target as f64);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;

    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // Avoid printing -0 and accumulated float noise
            if v.abs() < step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Format a tick value with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6);
    format!("{:.*}", decimals, value)
}
