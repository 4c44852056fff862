//! Font resolution for text commands.
//!
//! Text commands carry a CSS font shorthand (`"bold 20px Arial"`). It is
//! parsed into a [`FontSpec`] and resolved against the system font database.
//! Resolved fonts are cached for the life of the process.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

/// Font used when a text command carries none.
pub const DEFAULT_FONT: &str = "20px Arial";

/// Parsed CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Size in pixels.
    pub size: f32,
    /// First family of the family list, unquoted.
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    /// Parse `[style] [weight] <size>px|pt <family>[, fallback...]`.
    ///
    /// Returns `None` when no positive size is present.
    pub fn parse(s: &str) -> Option<Self> {
        let mut bold = false;
        let mut italic = false;
        let mut size = None;
        let mut rest = s.trim();

        while size.is_none() {
            let (token, tail) = match rest.split_once(char::is_whitespace) {
                Some((token, tail)) => (token, tail.trim_start()),
                None => (rest, ""),
            };
            if token.is_empty() {
                return None;
            }
            match token.to_ascii_lowercase().as_str() {
                "bold" | "bolder" | "600" | "700" | "800" | "900" => bold = true,
                "italic" | "oblique" => italic = true,
                "normal" | "lighter" | "100" | "200" | "300" | "400" | "500" => {}
                other => size = Some(parse_size(other)?),
            }
            rest = tail;
        }

        let family = rest
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();

        Some(Self {
            size: size?,
            family,
            bold,
            italic,
        })
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec::new(20.0, "Arial")
    }
}

// Size token, optionally with a `/line-height` suffix.
fn parse_size(token: &str) -> Option<f32> {
    let token = token.split('/').next()?;
    let size = if let Some(n) = token.strip_suffix("px") {
        n.parse::<f32>().ok()?
    } else if let Some(n) = token.strip_suffix("pt") {
        n.parse::<f32>().ok()? * 4.0 / 3.0
    } else {
        return None;
    };
    (size.is_finite() && size > 0.0).then_some(size)
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Resolve a font for `spec`, falling back to the generic sans-serif face.
///
/// Returns `None` when the system has no usable font at all.
pub fn get_font_for(spec: &FontSpec) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: spec.family.clone(),
        bold: spec.bold,
        italic: spec.italic,
    };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *font;
    }

    let loaded = load_font_from_system(&spec.family, spec.bold, spec.italic)
        .or_else(|| load_font_from_system("sans-serif", false, false))
        .map(|font| &*Box::leak(Box::new(font)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim().to_ascii_lowercase().as_str() {
        "" | "sans" | "sans-serif" => vec![Family::SansSerif],
        "serif" => vec![Family::Serif],
        "monospace" => vec![Family::Monospace],
        _ => vec![Family::Name(family.trim()), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
