//! Calendar dates in canonical `YYYY-MM-DD` form.

use chrono::NaiveDate;
use inn_core::errors::InnError;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`. Malformed or impossible dates (`2023-02-29`) are
/// `Validation` errors.
pub fn parse_date(text: &str) -> anyhow::Result<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|e| {
        InnError::validation(format!("invalid date '{trimmed}', expected YYYY-MM-DD"))
            .with_source(e.into())
            .into_anyhow()
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Half-open overlap: `[a_in, a_out)` and `[b_in, b_out)` share a night.
pub fn ranges_overlap(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_in.max(b_in) < a_out.min(b_out)
}

/// `#[serde(with = "crate::dates::iso")]` for date fields.
pub(crate) mod iso {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inn_core::errors::ErrorKind;

    #[test]
    fn leap_day_round_trips() {
        let d = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(d), "2024-02-29");
    }

    #[test]
    fn malformed_and_out_of_range_text_is_rejected() {
        for text in ["2024/02/29", "2023-02-29", "2024-13-01", "", "yesterday"] {
            let err = parse_date(text).unwrap_err();
            assert_eq!(InnError::kind_of(&err), ErrorKind::Validation, "{text}");
        }
    }

    #[test]
    fn shared_boundary_is_not_an_overlap() {
        let d = |s| parse_date(s).unwrap();
        assert!(!ranges_overlap(d("2024-06-01"), d("2024-06-03"), d("2024-06-03"), d("2024-06-04")));
        assert!(ranges_overlap(d("2024-06-01"), d("2024-06-03"), d("2024-06-02"), d("2024-06-04")));
        assert!(ranges_overlap(d("2024-06-01"), d("2024-06-10"), d("2024-06-04"), d("2024-06-05")));
    }
}
