//! Median computation and the relative-margin elevation test.

use crate::constants::ELEVATION_MARGIN;
use crate::error::Error;

/// Compute the median of a series.
///
/// Sorts a copy; the input order is irrelevant. Odd-length input returns the
/// middle element, even-length input the mean of the two middle elements.
///
/// # Errors
///
/// Returns [`Error::EmptySeries`] for empty input.
pub fn median_of(series: &[f64]) -> Result<f64, Error> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }

    let mut sorted = series.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Decide whether `test` is elevated over `baseline` at the default margin.
///
/// True iff `median(test) > median(baseline) * 1.10`. The inequality is
/// strict: a test median at exactly the margin is not elevated.
pub fn is_elevated(test: &[f64], baseline: &[f64]) -> Result<bool, Error> {
    is_elevated_by(test, baseline, ELEVATION_MARGIN)
}

/// [`is_elevated`] with an explicit relative margin.
pub fn is_elevated_by(test: &[f64], baseline: &[f64], margin: f64) -> Result<bool, Error> {
    Ok(median_of(test)? > median_of(baseline)? * margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_length() {
        assert_eq!(median_of(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median_of(&[5.0]).unwrap(), 5.0);
    }

    #[test]
    fn median_even_length() {
        assert_eq!(median_of(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert_eq!(median_of(&[10.0, 20.0]).unwrap(), 15.0);
    }

    #[test]
    fn median_is_permutation_invariant() {
        let base = vec![16.7, 33.4, 18.0, 21.5, 17.1, 40.2];
        let expected = median_of(&base).unwrap();

        // Every cyclic rotation plus a reversal.
        let mut rotated = base.clone();
        for _ in 0..base.len() {
            rotated.rotate_left(1);
            assert_eq!(median_of(&rotated).unwrap(), expected);
        }
        let reversed: Vec<f64> = base.iter().rev().copied().collect();
        assert_eq!(median_of(&reversed).unwrap(), expected);
    }

    #[test]
    fn median_orders_numerically_not_lexically() {
        // 9.0 sorts after 10.0 lexically; the median must not.
        assert_eq!(median_of(&[9.0, 100.0, 10.0]).unwrap(), 10.0);
    }

    #[test]
    fn median_of_empty_series_fails() {
        assert!(matches!(median_of(&[]), Err(Error::EmptySeries)));
    }

    #[test]
    fn elevation_requires_strict_margin() {
        let baseline = [10.0, 10.0, 10.0, 10.0];

        // At the margin (within float error, just below it): not elevated.
        let at_margin = [11.0, 11.0, 11.0, 11.0];
        assert!(!is_elevated(&at_margin, &baseline).unwrap());

        // Just above: elevated.
        let above = [11.001, 11.001, 11.001, 11.001];
        assert!(is_elevated(&above, &baseline).unwrap());

        // Equal medians: not elevated.
        assert!(!is_elevated(&baseline, &baseline).unwrap());
    }

    #[test]
    fn elevation_with_custom_margin() {
        let baseline = [10.0, 10.0];
        let test = [13.0, 13.0];
        assert!(is_elevated_by(&test, &baseline, 1.2).unwrap());
        assert!(!is_elevated_by(&test, &baseline, 1.3).unwrap());
    }

    #[test]
    fn elevation_propagates_empty_series() {
        assert!(matches!(is_elevated(&[], &[1.0]), Err(Error::EmptySeries)));
        assert!(matches!(is_elevated(&[1.0], &[]), Err(Error::EmptySeries)));
    }
}
