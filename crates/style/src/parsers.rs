//! Low-level nom parser functions for CSS-like color values.
//!
//! Only the color syntaxes the print target can be fed after conversion are
//! understood here: hex, `rgb()`/`rgba()` and `hsl()`/`hsla()`. Alpha is
//! accepted and dropped.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{map, map_res, opt, recognize};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use quire_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported color space '{0}'")]
    UnsupportedColorSpace(String),
}

// --- Helper Parsers ---

fn parse_number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn comma_or_space(input: &str) -> IResult<&str, &str> {
    alt((delimited(space0, tag(","), space0), space1)).parse(input)
}

fn alpha_separator(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(space0, tag(","), space0),
        delimited(space0, tag("/"), space0),
    ))
    .parse(input)
}

/// Alpha is parsed so the input is consumed, then discarded by callers.
fn alpha_value(input: &str) -> IResult<&str, f32> {
    map((parse_number, opt(char('%'))), |(value, percent)| {
        if percent.is_some() { value / 100.0 } else { value }
    })
    .parse(input)
}

fn open_paren(input: &str) -> IResult<&str, char> {
    delimited(space0, char('('), space0).parse(input)
}

fn close_paren(input: &str) -> IResult<&str, char> {
    preceded(space0, char(')')).parse(input)
}

// --- Hex ---

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex).parse(input)
}

fn hex_short_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex_digit), |digit: &str| {
        from_hex(&digit.repeat(2))
    })
    .parse(input)
}

fn hex_color_6(input: &str) -> IResult<&str, Color> {
    map((hex_primary, hex_primary, hex_primary), |(r, g, b)| {
        Color { r, g, b }
    })
    .parse(input)
}

fn hex_color_3(input: &str) -> IResult<&str, Color> {
    map(
        (hex_short_primary, hex_short_primary, hex_short_primary),
        |(r, g, b)| Color { r, g, b },
    )
    .parse(input)
}

fn hex_color_8(input: &str) -> IResult<&str, Color> {
    map((hex_color_6, hex_primary), |(color, _alpha)| color).parse(input)
}

fn hex_color_4(input: &str) -> IResult<&str, Color> {
    map((hex_color_3, hex_short_primary), |(color, _alpha)| color).parse(input)
}

/// Parses a hex color: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`. The alpha
/// digits are dropped. Longer forms are tried first, so a partial match
/// leaves a remainder that [`run_parser`] rejects.
pub fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    preceded(
        char('#'),
        alt((hex_color_8, hex_color_6, hex_color_4, hex_color_3)),
    )
    .parse(input)
}

// --- rgb() / rgba() ---

fn rgb_channel(input: &str) -> IResult<&str, u8> {
    map((parse_number, opt(char('%'))), |(value, percent)| {
        let value = if percent.is_some() { value * 2.55 } else { value };
        value.round().clamp(0.0, 255.0) as u8
    })
    .parse(input)
}

/// Parses `rgb(r, g, b)`, `rgba(r, g, b, a)` and the space separated
/// `rgb(r g b / a)` form. Channels may be integers or percentages.
pub fn parse_rgb_function(input: &str) -> IResult<&str, Color> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb"))).parse(input)?;
    let (input, _) = open_paren(input)?;
    let (input, (r, _, g, _, b)) = (
        rgb_channel,
        comma_or_space,
        rgb_channel,
        comma_or_space,
        rgb_channel,
    )
        .parse(input)?;
    let (input, _alpha) = opt(preceded(alpha_separator, alpha_value)).parse(input)?;
    let (input, _) = close_paren(input)?;
    Ok((input, Color { r, g, b }))
}

// --- hsl() / hsla() ---

fn hue(input: &str) -> IResult<&str, f32> {
    map((parse_number, opt(tag_no_case("deg"))), |(value, _)| value).parse(input)
}

fn percentage(input: &str) -> IResult<&str, f32> {
    map((parse_number, opt(char('%'))), |(value, _)| {
        (value / 100.0).clamp(0.0, 1.0)
    })
    .parse(input)
}

/// Parses `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`, converting to RGB.
pub fn parse_hsl_function(input: &str) -> IResult<&str, Color> {
    let (input, _) = alt((tag_no_case("hsla"), tag_no_case("hsl"))).parse(input)?;
    let (input, _) = open_paren(input)?;
    let (input, (h, _, s, _, l)) =
        (hue, comma_or_space, percentage, comma_or_space, percentage).parse(input)?;
    let (input, _alpha) = opt(preceded(alpha_separator, alpha_value)).parse(input)?;
    let (input, _) = close_paren(input)?;
    Ok((input, hsl_to_rgb(h, s, l)))
}

/// Standard HSL to RGB conversion. `h` in degrees, `s` and `l` in `0..=1`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let h = ((h % 360.0) + 360.0) % 360.0 / 360.0;
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Color::gray(v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| (hue_to_rgb(p, q, t) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color {
        r: channel(h + 1.0 / 3.0),
        g: channel(h),
        b: channel(h - 1.0 / 3.0),
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Parses any supported color syntax.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((parse_hex_color, parse_rgb_function, parse_hsl_function)).parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}
