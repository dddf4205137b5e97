use steg_signal::{Complex64, Grid};

/// Share of coefficients cut off at each end of the real-part distribution.
pub const TAIL_FRACTION: f64 = 0.03;

const BISECTION_STEPS: usize = 64;

/// Central span of a spectrum's real parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

/// The `[3%, 97%]` quantile range of the real parts of `spectrum`.
pub fn centralize(spectrum: &Grid<Complex64>) -> Range {
    let values: Vec<f64> = spectrum.iter().map(|c| c.re).collect();

    Range {
        low: quantile(&values, TAIL_FRACTION),
        high: quantile(&values, 1.0 - TAIL_FRACTION),
    }
}

/// Smallest threshold with at least `fraction` of `values` at or below it.
///
/// Found by bisection over the value range, so the result only depends on the
/// values themselves and is reproduced exactly from the same spectrum.
pub fn quantile(values: &[f64], fraction: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let target = ((fraction * values.len() as f64).ceil() as usize).max(1);

    for _ in 0..BISECTION_STEPS {
        let mid = low + (high - low) / 2.0;
        let below = values.iter().filter(|&&v| v <= mid).count();
        if below >= target {
            high = mid;
        } else {
            low = mid;
        }
    }

    high
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_should_find_order_statistics() {
        let values: Vec<f64> = (1..=100).rev().map(f64::from).collect();

        assert!((quantile(&values, 0.03) - 3.0).abs() < 1e-9);
        assert!((quantile(&values, 0.97) - 97.0).abs() < 1e-9);
        assert!((quantile(&values, 0.0) - 1.0).abs() < 1e-9);
        assert!((quantile(&values, 1.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn quantile_of_a_constant_is_the_constant() {
        assert_eq!(quantile(&[4.5; 10], 0.5), 4.5);
        assert_eq!(quantile(&[], 0.5), 0.0);
    }

    #[test]
    fn centralize_should_ignore_the_outlying_tails() {
        let mut values = vec![Complex64::new(0.0, 0.0); 100];
        for (i, v) in values.iter_mut().enumerate() {
            v.re = i as f64;
        }
        values[0].re = -1e6;
        values[99].re = 1e6;
        let spectrum = Grid::from_vec(10, 10, values).unwrap();

        let range = centralize(&spectrum);

        assert!((range.low - 2.0).abs() < 1e-6);
        assert!((range.high - 96.0).abs() < 1e-6);
        assert!((range.span() - 94.0).abs() < 1e-6);
    }
}
