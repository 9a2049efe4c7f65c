/// Verified credits a borrower must hold for `loan_amount`, rounded to cents.
pub fn required_credits(loan_amount: f64, credits_per_thousand: f64) -> f64 {
    round_to((loan_amount / 1000.0) * credits_per_thousand, 2).max(0.0)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
