use crate::core::services::Bucket;

pub const EMPTY_CHART: &str = "No data to display";
const BAR_CHAR: char = '#';

/// Draws one horizontal bar per bucket, scaled so the largest bucket spans `width` cells.
pub fn render(buckets: &[Bucket], width: usize) -> String {
    if buckets.is_empty() {
        return EMPTY_CHART.to_string();
    }

    let label_width = buckets
        .iter()
        .map(|bucket| bucket.label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = buckets
        .iter()
        .map(|bucket| bucket.units)
        .fold(0.0_f64, f64::max);

    buckets
        .iter()
        .map(|bucket| {
            let length = if peak > 0.0 {
                ((bucket.units / peak) * width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(BAR_CHAR).take(length).collect();
            let gap = if bar.is_empty() { "" } else { " " };
            format!(
                "{:<label_width$} | {bar}{gap}{:.2}",
                bucket.label,
                bucket.units,
                label_width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
