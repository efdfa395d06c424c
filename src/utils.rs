/// Round to 2 decimal places, the precision used for all monetary and
/// percentage values returned by the API.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.66666), 66.67);
        assert_eq!(round2(20.0), 20.0);
        assert_eq!(round2(12.345), 12.35);
    }
}
