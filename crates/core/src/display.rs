//! Display rules applied when shaping artwork rows for the view layer.
//!
//! The only I/O here is the image existence check, which goes through the
//! [`ImageProbe`] trait so tests can run without touching the filesystem.

use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::types::Timestamp;

/// Category label for artworks whose category reference is null.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Image shown when an artwork has no image or the file is missing.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "art/monaLisa.jpg";

// ---------------------------------------------------------------------------
// Image existence
// ---------------------------------------------------------------------------

/// Answers whether a stored image path still refers to a file.
pub trait ImageProbe: Send + Sync {
    fn exists(&self, relative_path: &str) -> bool;
}

/// Checks stored image paths against a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsImageProbe {
    root: PathBuf,
}

impl FsImageProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageProbe for FsImageProbe {
    fn exists(&self, relative_path: &str) -> bool {
        self.root.join(relative_path).is_file()
    }
}

/// Probe with a fixed answer, for tests and for deployments that serve
/// images from somewhere this process cannot see.
#[derive(Debug, Clone, Copy)]
pub struct StaticImageProbe(pub bool);

impl ImageProbe for StaticImageProbe {
    fn exists(&self, _relative_path: &str) -> bool {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Shaping rules
// ---------------------------------------------------------------------------

/// Resolve the image to display: the stored path when present and on disk,
/// otherwise `placeholder`.
pub fn resolve_image_path(
    stored: Option<&str>,
    placeholder: &str,
    probe: &dyn ImageProbe,
) -> String {
    match stored.map(str::trim) {
        Some(path) if !path.is_empty() && probe.exists(path) => path.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Category name, or [`UNCATEGORIZED`] when the reference is null.
pub fn category_label(name: Option<&str>) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

/// Format a price as dollars with thousands separators, e.g. `$1,200.00`.
pub fn format_price(price: Decimal) -> String {
    let fixed = format!("{:.2}", price.round_dp(2).abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price.is_sign_negative() && !price.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Long-form creation date, e.g. `March 1, 2025`.
pub fn format_date(at: Timestamp) -> String {
    at.format("%B %-d, %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stored_image_used_when_present() {
        let path = resolve_image_path(Some("art/a.jpg"), "ph.jpg", &StaticImageProbe(true));
        assert_eq!(path, "art/a.jpg");
    }

    #[test]
    fn placeholder_when_missing_on_disk() {
        let path = resolve_image_path(Some("art/a.jpg"), "ph.jpg", &StaticImageProbe(false));
        assert_eq!(path, "ph.jpg");
    }

    #[test]
    fn placeholder_when_null_or_blank() {
        let probe = StaticImageProbe(true);
        assert_eq!(resolve_image_path(None, "ph.jpg", &probe), "ph.jpg");
        assert_eq!(resolve_image_path(Some("  "), "ph.jpg", &probe), "ph.jpg");
    }

    #[test]
    fn fs_probe_checks_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("art")).unwrap();
        std::fs::write(dir.path().join("art/here.png"), b"png").unwrap();

        let probe = FsImageProbe::new(dir.path());
        assert!(probe.exists("art/here.png"));
        assert!(!probe.exists("art/gone.png"));
        assert!(!probe.exists("art"));
    }

    #[test]
    fn category_label_falls_back() {
        assert_eq!(category_label(Some("Sculptures")), "Sculptures");
        assert_eq!(category_label(None), "Uncategorized");
        assert_eq!(category_label(Some("")), "Uncategorized");
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(Decimal::new(120000, 2)), "$1,200.00");
        assert_eq!(format_price(Decimal::new(65000, 2)), "$650.00");
        assert_eq!(format_price(Decimal::new(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
        assert_eq!(format_price(Decimal::new(5, 1)), "$0.50");
    }

    #[test]
    fn format_date_spells_out_month() {
        let at = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap();
        assert_eq!(format_date(at), "March 1, 2025");

        let at = chrono::Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(format_date(at), "December 25, 2024");
    }
}
