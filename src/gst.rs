//! GST arithmetic. Pure functions, no validation: callers constrain the
//! rate to the statutory slabs and amounts to non-negative values before
//! getting here.

/// Tax for `amount` at `rate` percent.
pub fn calculate_gst(amount: f64, rate: f64) -> f64 {
    amount * rate / 100.0
}

/// The intra-state view of a tax split: half the rate to CGST, half to SGST,
/// each computed independently. This is what the standalone calculator shows
/// for any whole-number rate between 0 and 28.
pub struct IntraStateSplit {
    pub cgst: f64,
    pub sgst: f64,
    pub total: f64,
}

pub fn intra_state_split(amount: f64, rate: f64) -> IntraStateSplit {
    let cgst = calculate_gst(amount, rate / 2.0);
    let sgst = calculate_gst(amount, rate / 2.0);
    IntraStateSplit {
        cgst,
        sgst,
        total: amount + cgst + sgst,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn basic_percentage() {
        assert_close(calculate_gst(1000.0, 18.0), 180.0);
        assert_close(calculate_gst(1000.0, 9.0), 90.0);
        assert_close(calculate_gst(0.0, 28.0), 0.0);
    }

    #[test]
    fn split_halves_the_rate_on_each_side() {
        let split = intra_state_split(1000.0, 18.0);
        assert_close(split.cgst, 90.0);
        assert_close(split.sgst, 90.0);
        assert_close(split.total, 1180.0);
    }

    #[test]
    fn zero_rate_split_is_just_the_amount() {
        let split = intra_state_split(250.0, 0.0);
        assert_close(split.cgst, 0.0);
        assert_close(split.sgst, 0.0);
        assert_close(split.total, 250.0);
    }
}
