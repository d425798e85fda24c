/// Tolerance for "weights sum to one".
const WEIGHT_TOLERANCE: f64 = 1e-3;

/// Validate a named weight table, appending every problem to `errors`.
///
/// `path` prefixes the messages, e.g. `ppi.weights`.
pub fn validate_weights(path: &str, weights: &[(&str, f64)], errors: &mut Vec<String>) {
    let mut sum = 0.0;
    for (name, weight) in weights {
        if !weight.is_finite() {
            errors.push(format!("{}.{}: must be a finite number", path, name));
            continue;
        }
        if *weight < 0.0 {
            errors.push(format!("{}.{}: must be non-negative", path, name));
        }
        sum += weight;
    }

    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        errors.push(format!("{}: weights must sum to 1 (got {:.3})", path, sum));
    }
}

/// Check that `value` lies within `[min, max]`.
pub fn validate_range(path: &str, value: f64, min: f64, max: f64, errors: &mut Vec<String>) {
    if !(min..=max).contains(&value) {
        errors.push(format!(
            "{}: must be between {} and {} (got {})",
            path, min, max, value
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_weights() {
        let mut errors = Vec::new();
        validate_weights("w", &[("a", 0.6), ("b", 0.4)], &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_negative_weight() {
        let mut errors = Vec::new();
        validate_weights("w", &[("a", 1.5), ("b", -0.5)], &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("w.b"));
    }

    #[test]
    fn test_weights_not_summing_to_one() {
        let mut errors = Vec::new();
        validate_weights("ppi.weights", &[("a", 0.5), ("b", 0.4)], &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("sum to 1"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut errors = Vec::new();
        validate_weights("w", &[("a", f64::NAN), ("b", -1.0)], &mut errors);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_range() {
        let mut errors = Vec::new();
        validate_range("x", 0.5, 0.0, 1.0, &mut errors);
        validate_range("y", 1.5, 0.0, 1.0, &mut errors);
        validate_range("z", f64::NAN, 0.0, 1.0, &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("y:"));
        assert!(errors[1].starts_with("z:"));
    }
}
