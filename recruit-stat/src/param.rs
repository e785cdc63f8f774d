/// A model parameter outside the domain of the formula.
///
/// Raised through `anyhow`; callers can recover it with
/// `err.downcast_ref::<InvalidParameter>()`.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidParameter {
    pub name: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl InvalidParameter {
    pub fn new(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self {
            name,
            value,
            reason,
        }
    }
}

impl std::fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid parameter {} = {}: {}",
            self.name, self.value, self.reason
        )
    }
}

impl std::error::Error for InvalidParameter {}

/// `x` must be finite and strictly positive (rates, shapes, scales)
pub fn check_positive(name: &'static str, x: f64) -> anyhow::Result<f64> {
    if x.is_finite() && x > 0.0 {
        Ok(x)
    } else {
        Err(InvalidParameter::new(name, x, "must be a finite positive number").into())
    }
}

/// `x` must be a count no smaller than `min`
pub fn check_count(name: &'static str, x: usize, min: usize) -> anyhow::Result<usize> {
    if x >= min {
        Ok(x)
    } else {
        Err(InvalidParameter::new(name, x as f64, "count is below its minimum").into())
    }
}

/// Turn a non-finite evaluation into an invalid-parameter error
pub fn check_finite(name: &'static str, x: f64) -> anyhow::Result<f64> {
    if x.is_nan() {
        Err(InvalidParameter::new(name, x, "evaluation is not a number").into())
    } else {
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_positive() {
        assert!(check_positive("rate", 1e-300).is_ok());

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = check_positive("rate", bad).unwrap_err();
            let err = err.downcast_ref::<InvalidParameter>().unwrap();
            assert_eq!(err.name, "rate");
        }
    }

    #[test]
    fn test_check_count() {
        assert_eq!(check_count("n", 1, 1).unwrap(), 1);
        let err = check_count("n", 0, 1).unwrap_err();
        assert!(err.to_string().contains("invalid parameter n = 0"));
    }
}
