//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use super::ParseWarning;
use crate::color::CanvasColor;
use crate::fit::Anchor;
use crate::settings::{FitMode, GridMode, Settings};

/// Parse a query string on top of `base`, returning the settings and warnings.
pub(crate) fn parse_query(query: &str, base: Settings) -> (Settings, Vec<ParseWarning>) {
    let mut settings = base;
    let mut warnings = Vec::new();
    let mut seen: Vec<&'static str> = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        let Some(field) = canonical_key(&key) else {
            warnings.push(ParseWarning::KeyNotRecognized { key, value });
            continue;
        };

        match apply(field, &value, &mut settings) {
            Ok(()) => {
                if seen.contains(&field) {
                    warnings.push(ParseWarning::DuplicateKey {
                        key: key.clone(),
                        value: value.clone(),
                    });
                } else {
                    seen.push(field);
                }
            }
            Err(reason) => warnings.push(ParseWarning::ValueInvalid { key, value, reason }),
        }
    }

    (settings, warnings)
}

/// Map accepted spellings to one name per settings field.
fn canonical_key(key: &str) -> Option<&'static str> {
    Some(match key {
        "mode" => "mode",
        "w" | "width" => "width",
        "h" | "height" => "height",
        "cols" | "columns" | "col" => "cols",
        "rows" | "row" => "rows",
        "gap" | "spacing" => "gap",
        "bgcolor" | "background" | "backgroundcolor" | "bg" => "bgcolor",
        "fit" | "fitmode" | "ratio" => "fit",
        "anchor" => "anchor",
        _ => return None,
    })
}

fn apply(field: &str, value: &str, s: &mut Settings) -> Result<(), &'static str> {
    match field {
        "mode" => s.mode = parse_enum::<GridMode>(value).ok_or("expected width_col|height_row")?,
        "width" => s.width = parse_extent(value).ok_or("expected a positive number")?,
        "height" => s.height = parse_extent(value).ok_or("expected a positive number")?,
        "cols" => s.cols = parse_count(value).ok_or("expected an integer")?,
        "rows" => s.rows = parse_count(value).ok_or("expected an integer")?,
        "gap" => s.gap = parse_gap(value).ok_or("expected a non-negative number")?,
        "bgcolor" => {
            s.background =
                parse_enum::<CanvasColor>(value).ok_or("expected hex color or color name")?
        }
        "fit" => {
            s.fit_mode = parse_enum::<FitMode>(value)
                .ok_or("expected average|portrait|landscape|max_dimensions|original")?
        }
        "anchor" => {
            s.anchor = parse_enum::<Anchor>(value)
                .ok_or("expected top-left|top-center|...|bottom-right or center")?
        }
        _ => return Err("unsupported key"),
    }
    Ok(())
}

// ---- Value parsers ----

fn parse_enum<T: FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_extent(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v > 0.0)
}

fn parse_gap(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v >= 0.0)
}

/// Any integer; non-positive counts are clamped at layout time.
fn parse_count(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                match (
                    bytes.get(i + 1).copied().and_then(hex_digit),
                    bytes.get(i + 2).copied().and_then(hex_digit),
                ) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(q: &str) -> (Settings, Vec<ParseWarning>) {
        parse_query(q, Settings::default())
    }

    #[test]
    fn empty_query_keeps_defaults() {
        let (s, warnings) = parse("");
        assert_eq!(s, Settings::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn width_col_settings() {
        let (s, warnings) = parse("mode=width_col&w=1200&cols=4&gap=6");
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(s.mode, GridMode::WidthCol);
        assert_eq!(s.width, 1200.0);
        assert_eq!(s.cols, 4);
        assert_eq!(s.gap, 6.0);
    }

    #[test]
    fn height_row_aliases() {
        let (s, _) = parse("mode=height_row&height=720&rows=2");
        assert_eq!(s.mode, GridMode::HeightRow);
        assert_eq!(s.height, 720.0);
        assert_eq!(s.rows, 2);
    }

    #[test]
    fn fit_and_anchor() {
        let (s, _) = parse("fit=max_dimensions&anchor=bottom-right");
        assert_eq!(s.fit_mode, FitMode::MaxDimensions);
        assert_eq!(s.anchor, Anchor::BottomRight);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let (s, _) = parse("FitMode=Original&BGCOLOR=black");
        assert_eq!(s.fit_mode, FitMode::Original);
        assert_eq!(s.background, CanvasColor::black());
    }

    #[test]
    fn percent_decoded_hex_color() {
        let (s, _) = parse("bgcolor=%23ff0000");
        assert_eq!(s.background, CanvasColor::rgb(255, 0, 0));
    }

    #[test]
    fn px_suffix_accepted() {
        let (s, _) = parse("width=800px&gap=4px");
        assert_eq!((s.width, s.gap), (800.0, 4.0));
    }

    #[test]
    fn non_positive_counts_are_kept_for_clamping() {
        let (s, warnings) = parse("cols=0&rows=-2");
        assert!(warnings.is_empty());
        assert_eq!((s.cols, s.rows), (0, -2));
    }

    #[test]
    fn invalid_values_warn_and_keep_previous() {
        let (s, warnings) = parse("w=-10&gap=-1&fit=sideways&anchor=nowhere&mode=diagonal");
        assert_eq!(s, Settings::default());
        assert_eq!(warnings.len(), 5);
        assert!(
            warnings
                .iter()
                .all(|w| matches!(w, ParseWarning::ValueInvalid { .. }))
        );
    }

    #[test]
    fn non_finite_numbers_rejected() {
        let (s, warnings) = parse("w=inf&h=NaN");
        assert_eq!(s.width, Settings::default().width);
        assert_eq!(s.height, Settings::default().height);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn unknown_key_warns() {
        let (_, warnings) = parse("cols=2&zoom=2");
        assert_eq!(
            warnings,
            [ParseWarning::KeyNotRecognized {
                key: String::from("zoom"),
                value: String::from("2"),
            }]
        );
    }

    #[test]
    fn duplicate_key_warns_last_wins() {
        let (s, warnings) = parse("w=800&width=400");
        assert_eq!(s.width, 400.0);
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ParseWarning::DuplicateKey { key, .. } if key == "width"))
        );
    }

    #[test]
    fn leading_question_mark_and_empty_pairs() {
        let (s, warnings) = parse("?&cols=5&&");
        assert!(warnings.is_empty());
        assert_eq!(s.cols, 5);
    }

    #[test]
    fn percent_decode_edge_cases() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("%2"), "%2");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("top%2Dleft"), "top-left");
    }
}
