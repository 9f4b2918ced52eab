//! Validation of the admin "add artwork" form.
//!
//! Form fields arrive as raw strings. [`ArtworkForm::validate`] trims them,
//! checks every rule, and either returns a typed [`NewArtwork`] or the full
//! list of problems at once.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::types::DbId;

/// Column width for `title` and `artist_name`.
pub const MAX_NAME_CHARS: usize = 100;

/// Exclusive upper bound imposed by `NUMERIC(10,2)`.
const PRICE_CEILING: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Checkbox values that mean "unchecked".
const FALSE_FLAGS: &[&str] = &["", "0", "false", "off", "no"];

/// Raw form fields, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkForm {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub price: Option<String>,
    /// Checkbox: present (and not a false-ish value) means featured.
    pub is_featured: Option<String>,
}

/// A validated artwork ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtwork {
    pub title: String,
    pub artist_name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub price: Decimal,
    pub is_featured: bool,
}

/// Every rule the form broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fix the following errors: {}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl ArtworkForm {
    /// Validate all fields, collecting every failure.
    pub fn validate(&self) -> Result<NewArtwork, ValidationErrors> {
        let mut errors = Vec::new();

        let title = trimmed(&self.title);
        if title.is_empty() {
            errors.push("Title is required".to_string());
        } else if title.chars().count() > MAX_NAME_CHARS {
            errors.push(format!("Title must be at most {MAX_NAME_CHARS} characters"));
        }

        let artist_name = trimmed(&self.artist_name);
        if artist_name.is_empty() {
            errors.push("Artist name is required".to_string());
        } else if artist_name.chars().count() > MAX_NAME_CHARS {
            errors.push(format!(
                "Artist name must be at most {MAX_NAME_CHARS} characters"
            ));
        }

        let price = match parse_price(trimmed(&self.price)) {
            Ok(price) => Some(price),
            Err(msg) => {
                errors.push(msg.to_string());
                None
            }
        };

        let category_id = match parse_category(trimmed(&self.category_id)) {
            Ok(id) => id,
            Err(msg) => {
                errors.push(msg.to_string());
                None
            }
        };

        match price {
            Some(price) if errors.is_empty() => {
                let description = Some(trimmed(&self.description))
                    .filter(|d| !d.is_empty())
                    .map(str::to_string);
                Ok(NewArtwork {
                    title: title.to_string(),
                    artist_name: artist_name.to_string(),
                    description,
                    category_id,
                    price,
                    is_featured: is_checked(self.is_featured.as_deref()),
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Blank is "required"; zero is a valid price.
fn parse_price(raw: &str) -> Result<Decimal, &'static str> {
    if raw.is_empty() {
        return Err("Price is required");
    }
    let price = raw
        .parse::<Decimal>()
        .map_err(|_| "Price must be a valid number")?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price cannot be negative");
    }
    let price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price >= PRICE_CEILING {
        return Err("Price must be less than 100,000,000");
    }
    Ok(price)
}

/// Blank and `0` both mean "no category".
fn parse_category(raw: &str) -> Result<Option<DbId>, &'static str> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<DbId>() {
        Ok(0) => Ok(None),
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err("Category is invalid"),
    }
}

fn is_checked(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim().to_ascii_lowercase();
            !FALSE_FLAGS.contains(&v.as_str())
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(title: &str, artist: &str, price: &str) -> ArtworkForm {
        ArtworkForm {
            title: Some(title.into()),
            artist_name: Some(artist.into()),
            price: Some(price.into()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let mut input = form("  Spring Meadow ", " Lisa Taylor", " 950.00 ");
        input.description = Some("  ".into());
        input.category_id = Some("1".into());
        input.is_featured = Some("on".into());

        let artwork = input.validate().unwrap();
        assert_eq!(artwork.title, "Spring Meadow");
        assert_eq!(artwork.artist_name, "Lisa Taylor");
        assert_eq!(artwork.description, None);
        assert_eq!(artwork.category_id, Some(1));
        assert_eq!(artwork.price, Decimal::new(95000, 2));
        assert!(artwork.is_featured);
    }

    #[test]
    fn missing_title_is_named() {
        let err = form("", "Jane", "50").validate().unwrap_err();
        assert_eq!(err.messages(), ["Title is required"]);
        assert_eq!(
            err.to_string(),
            "Please fix the following errors: Title is required"
        );
    }

    #[test]
    fn all_failures_are_collected() {
        let err = ArtworkForm::default().validate().unwrap_err();
        assert_eq!(
            err.messages(),
            ["Title is required", "Artist name is required", "Price is required"]
        );
        assert_eq!(
            err.to_string(),
            "Please fix the following errors: Title is required, Artist name is required, Price is required"
        );
    }

    #[test]
    fn zero_price_is_accepted() {
        let artwork = form("Free Sketch", "Anon", "0").validate().unwrap();
        assert!(artwork.price.is_zero());
    }

    #[test]
    fn bad_prices_are_rejected() {
        assert_matches!(form("t", "a", "abc").validate(), Err(e) if e.messages() == ["Price must be a valid number"]);
        assert_matches!(form("t", "a", "-5").validate(), Err(e) if e.messages() == ["Price cannot be negative"]);
        assert_matches!(form("t", "a", "100000000").validate(), Err(e) if e.messages() == ["Price must be less than 100,000,000"]);
    }

    #[test]
    fn price_is_rounded_to_cents() {
        let artwork = form("t", "a", "10.005").validate().unwrap();
        assert_eq!(artwork.price, Decimal::new(1001, 2));
    }

    #[test]
    fn category_parsing() {
        let mut input = form("t", "a", "1");
        input.category_id = Some("0".into());
        assert_eq!(input.validate().unwrap().category_id, None);

        input.category_id = Some("paintings".into());
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Category is invalid"]);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let err = form(&"x".repeat(101), "a", "1").validate().unwrap_err();
        assert_eq!(err.messages(), ["Title must be at most 100 characters"]);
    }

    #[test]
    fn featured_flag_values() {
        assert!(!is_checked(None));
        assert!(!is_checked(Some("0")));
        assert!(!is_checked(Some("false")));
        assert!(is_checked(Some("1")));
        assert!(is_checked(Some("on")));
    }
}
