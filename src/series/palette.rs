use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::error::{AppError, AppResult, ValidationError};

use super::types::Rgb;

/// Default chart palette. Order matters: colors are handed out by sorted
/// node-identifier index, so the mapping is stable across refetches.
const DEFAULT_COLORS: [Rgb; 10] = [
    Rgb { r: 0x1f, g: 0x77, b: 0xb4 },
    Rgb { r: 0xff, g: 0x7f, b: 0x0e },
    Rgb { r: 0x2c, g: 0xa0, b: 0x2c },
    Rgb { r: 0xd6, g: 0x27, b: 0x28 },
    Rgb { r: 0x94, g: 0x67, b: 0xbd },
    Rgb { r: 0x8c, g: 0x56, b: 0x4b },
    Rgb { r: 0xe3, g: 0x77, b: 0xc2 },
    Rgb { r: 0x7f, g: 0x7f, b: 0x7f },
    Rgb { r: 0xbc, g: 0xbd, b: 0x22 },
    Rgb { r: 0x17, g: 0xbe, b: 0xcf },
];

/// Color of the synthetic cross-node "Average" series. Not part of the
/// palette so it can never collide with a per-node color assignment.
pub const AVERAGE_COLOR: Rgb = Rgb {
    r: 0x44,
    g: 0x44,
    b: 0x44,
};

static SHARED: Lazy<Palette> = Lazy::new(Palette::default);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Builds a palette from `#rrggbb` strings, e.g. a config override.
    ///
    /// # Errors
    ///
    /// Returns a validation error when an entry is not a `#rrggbb` color.
    pub fn from_hex(entries: &[String]) -> AppResult<Self> {
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let mut colors = Vec::with_capacity(entries.len());
        for entry in entries {
            colors.push(parse_hex(entry)?);
        }
        Ok(Self { colors })
    }

    #[must_use]
    pub fn shared() -> &'static Palette {
        &SHARED
    }

    /// Color for the n-th sorted identifier, wrapping past the palette end.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Rgb {
        let len = self.colors.len().max(1);
        self.colors
            .get(index.checked_rem(len).unwrap_or(0))
            .copied()
            .unwrap_or(AVERAGE_COLOR)
    }

    /// Deterministic color assignment: identifiers are sorted
    /// lexicographically before palette indices are taken, so the same set of
    /// identifiers always maps to the same colors regardless of input order.
    #[must_use]
    pub fn assign<'id, I>(&self, ids: I) -> BTreeMap<&'id str, Rgb>
    where
        I: IntoIterator<Item = &'id str>,
    {
        let sorted: BTreeMap<&str, ()> = ids.into_iter().map(|id| (id, ())).collect();
        sorted
            .into_iter()
            .enumerate()
            .map(|(index, (id, ()))| (id, self.color_at(index)))
            .collect()
    }
}

fn parse_hex(value: &str) -> AppResult<Rgb> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(AppError::validation(ValidationError::InvalidColor {
            value: value.to_owned(),
        }));
    }
    let component = |range: std::ops::Range<usize>| -> AppResult<u8> {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .ok_or_else(|| {
                AppError::validation(ValidationError::InvalidColor {
                    value: value.to_owned(),
                })
            })
    };
    Ok(Rgb {
        r: component(0..2)?,
        g: component(2..4)?,
        b: component(4..6)?,
    })
}
