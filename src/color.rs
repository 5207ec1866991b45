// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Validation of user-supplied hexadecimal badge colors.
//!
//! Colors are accepted with or without a leading `#` and must contain exactly
//! three or six hexadecimal digits. Anything else falls back to
//! [`DEFAULT_COLOR`].

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Color used for the message segment when none or an invalid one is given.
pub const DEFAULT_COLOR: &str = "#007acc";

static HEX_DIGITS: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$",).expect("hex color pattern is valid",)
},);

/// Returns `true` when `value` is a 3- or 6-digit hex color, optionally
/// prefixed with `#`.
///
/// # Examples
///
/// ```
/// use gitpulse::is_valid_hex_color;
///
/// assert!(is_valid_hex_color("#0af"));
/// assert!(is_valid_hex_color("00AAFF"));
/// assert!(!is_valid_hex_color(""));
/// assert!(!is_valid_hex_color("#12345"));
/// ```
pub fn is_valid_hex_color(value: &str,) -> bool
{
    let digits = value.strip_prefix('#',).unwrap_or(value,);
    !digits.is_empty() && HEX_DIGITS.is_match(digits,)
}

/// A validated color that always carries its leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash,)]
pub struct HexColor(String,);

impl HexColor
{
    /// Parses a user-supplied color, returning `None` when it is invalid.
    ///
    /// The original letter case is preserved.
    pub fn parse(value: &str,) -> Option<Self,>
    {
        if !is_valid_hex_color(value,) {
            return None;
        }

        let digits = value.strip_prefix('#',).unwrap_or(value,);
        Some(Self(format!("#{digits}"),),)
    }

    /// Resolves an optional query value, substituting [`DEFAULT_COLOR`] when
    /// it is absent, empty, or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitpulse::HexColor;
    ///
    /// assert_eq!(HexColor::resolve(Some("fff")).as_str(), "#fff");
    /// assert_eq!(HexColor::resolve(Some("nope")).as_str(), "#007acc");
    /// assert_eq!(HexColor::resolve(None).as_str(), "#007acc");
    /// ```
    pub fn resolve(value: Option<&str,>,) -> Self
    {
        value.and_then(Self::parse,).unwrap_or_default()
    }

    /// Returns the color including the leading `#`.
    pub fn as_str(&self,) -> &str
    {
        &self.0
    }
}

impl Default for HexColor
{
    fn default() -> Self
    {
        Self(DEFAULT_COLOR.to_owned(),)
    }
}

impl fmt::Display for HexColor
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(&self.0,)
    }
}
