use crate::run::Container;

const FULL_NAME_SEPARATOR: &str = " / ";
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable duration from milliseconds
pub fn pretty_ms(ms: f64) -> String {
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };

    if ms < 1.0 {
        return format!("{}µs", (ms * 1000.0) as u64);
    }
    if ms < 1998.0 {
        return format!("{}ms", ms as u64);
    }

    let total_secs = ms / 1000.0;
    let days = (total_secs / 86_400.0).floor() as u64;
    let hours = ((total_secs % 86_400.0) / 3600.0).floor() as u64;
    let minutes = ((total_secs % 3600.0) / 60.0).floor() as u64;
    let seconds = ((total_secs % 60.0) * 10.0).floor() / 10.0;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0.0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

/// Human-readable byte size (base 1024, no spacer)
pub fn file_size(bytes: f64) -> String {
    let mut value = if bytes.is_finite() { bytes.max(0.0) } else { 0.0 };
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}{}", rounded, SIZE_UNITS[unit])
}

/// Display name of a container including its folder path.
///
/// The collection root is not part of the path, and the root itself has an
/// empty name.
pub fn full_name(container: &Container) -> String {
    if container.is_root() {
        return String::new();
    }

    let mut chain = vec![container.label()];
    let mut current = container.parent.as_deref();
    while let Some(parent) = current {
        if parent.is_root() {
            break;
        }
        chain.push(parent.label());
        current = parent.parent.as_deref();
    }
    chain.reverse();
    chain.join(FULL_NAME_SEPARATOR)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
