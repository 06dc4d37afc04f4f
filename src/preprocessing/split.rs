//! Chronological train/test split

use crate::error::{ForecastError, Result};

/// Splits `series` into a training prefix of `floor(len * ratio)` values
/// and the remaining test suffix. Order is preserved.
pub fn chronological_split(series: &[f64], ratio: f64) -> Result<(&[f64], &[f64])> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ForecastError::InvalidConfig(format!(
            "split ratio must lie in (0, 1), got {}",
            ratio
        )));
    }
    if series.is_empty() {
        return Err(ForecastError::EmptySequence);
    }

    let split = (series.len() as f64 * ratio) as usize;
    Ok(series.split_at(split))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighty_twenty() {
        let series: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let (train, test) = chronological_split(&series, 0.8).unwrap();

        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        assert_eq!(train[79], 79.0);
        assert_eq!(test[0], 80.0);
    }

    #[test]
    fn test_concatenation_restores_series() {
        for n in 2..60 {
            let series: Vec<f64> = (0..n).map(|i| (i * 7 % 11) as f64).collect();
            let (train, test) = chronological_split(&series, 0.8).unwrap();

            assert_eq!(train.len(), (n as f64 * 0.8) as usize);
            assert_eq!([train, test].concat(), series);
        }
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let series = vec![1.0, 2.0, 3.0];
        assert!(chronological_split(&series, 0.0).is_err());
        assert!(chronological_split(&series, 1.0).is_err());
        assert!(chronological_split(&series, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            chronological_split(&[], 0.8),
            Err(ForecastError::EmptySequence)
        ));
    }
}
