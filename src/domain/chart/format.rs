use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Declarative number format accepted from JSON configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatSpec {
    /// Fixed decimal places; `None` trims trailing zeros after two places
    pub decimals: Option<u8>,
    pub prefix: String,
    pub suffix: String,
}

/// `number -> string` callback used for value labels, tooltips and the
/// accessible text list.
#[derive(Clone)]
pub struct ValueFormatter(Rc<dyn Fn(f64) -> String>);

impl ValueFormatter {
    pub fn new(f: impl Fn(f64) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn from_spec(spec: &FormatSpec) -> Self {
        let spec = spec.clone();
        Self::new(move |v| format!("{}{}{}", spec.prefix, format_number(v, spec.decimals), spec.suffix))
    }

    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(|v| format_number(v, None))
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// Plain number rendering: integers print without a fraction, anything else
/// is rounded to two places with trailing zeros removed.
pub fn format_number(value: f64, decimals: Option<u8>) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let text = match decimals {
        Some(d) => format!("{:.*}", d as usize, value),
        None => {
            let fixed = format!("{:.2}", value);
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    };
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Percentage with one decimal place, e.g. `40.0%`.
pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_float_noise() {
        assert_eq!(format_number(20.0 * 1.1, None), "22");
        assert_eq!(format_number(16.5, None), "16.5");
        assert_eq!(format_number(0.0, None), "0");
        assert_eq!(format_number(-0.001, None), "0");
        assert_eq!(format_number(1250.0, None), "1250");
    }

    #[test]
    fn fixed_decimals_and_affixes() {
        let spec = FormatSpec { decimals: Some(1), prefix: "$".into(), suffix: "M".into() };
        assert_eq!(ValueFormatter::from_spec(&spec).format(62.0), "$62.0M");
    }

    #[test]
    fn custom_closure_is_used() {
        let fmt = ValueFormatter::new(|v| format!("{v} kg"));
        assert_eq!(fmt.format(5.0), "5 kg");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.4), "40.0%");
    }
}
