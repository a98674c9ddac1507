/// Render a radius in meters with as few decimals as it needs, up to two.
///
/// `100.0` -> `"100"`, `100.5` -> `"100.5"`, `100.25` -> `"100.25"`.
pub fn format_radius(radius: f64) -> String {
    let fixed = format!("{:.2}", radius);
    let decimals = fixed.rsplit_once('.').map(|(_, d)| d).unwrap_or("00");

    if decimals == "00" {
        return format!("{:.0}", radius);
    }

    if decimals.ends_with('0') {
        return format!("{:.1}", radius);
    }

    fixed
}
