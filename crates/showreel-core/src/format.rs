//! Display formatting helpers for channel statistics.

/// Format a raw subscriber count the way channel cards show it.
///
/// `None`/`0` -> `"0"`, millions -> `"2.5M"`, thousands -> `"1.5K"`, otherwise
/// the plain number. One decimal place, rounded half up.
pub fn subscribers(count: Option<u64>) -> String {
    match count {
        None | Some(0) => "0".into(),
        Some(n) if n >= 1_000_000 => scaled(n, 1_000_000, 'M'),
        Some(n) if n >= 1_000 => scaled(n, 1_000, 'K'),
        Some(n) => n.to_string(),
    }
}

fn scaled(n: u64, unit: u64, suffix: char) -> String {
    // Tenths, rounded half up. Widened so counts near u64::MAX cannot overflow.
    let tenths = (u128::from(n) * 10 + u128::from(unit) / 2) / u128::from(unit);
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}
