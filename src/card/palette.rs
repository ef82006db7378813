use std::{fmt, str::FromStr};

use crate::renderer::Color;

/// Resolved colors of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    /// Footer ornament and photo frame.
    pub accent: Color,
    /// Bubble fill.
    pub bubble: Color,
    pub text: Color,
}

/// The fixed set of card styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// Naturalist notebook: beige and pastel green.
    #[default]
    Carnet,
    /// Blue and orange.
    Classique,
    /// Bright and playful.
    Ludique,
    /// Light grey, modern.
    Epure,
    /// Powder pink and lavender.
    Douceur,
    /// Ochre and brown.
    Automne,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Carnet,
        Style::Classique,
        Style::Ludique,
        Style::Epure,
        Style::Douceur,
        Style::Automne,
    ];

    /// Lookup key used by [`FromStr`].
    pub fn key(&self) -> &'static str {
        match self {
            Style::Carnet => "carnet",
            Style::Classique => "classique",
            Style::Ludique => "ludique",
            Style::Epure => "epure",
            Style::Douceur => "douceur",
            Style::Automne => "automne",
        }
    }

    /// Human-readable label, e.g. for a style picker.
    pub fn description(&self) -> &'static str {
        match self {
            Style::Carnet => "Carnet naturaliste (beige & vert pastel)",
            Style::Classique => "Classique (bleu & orange)",
            Style::Ludique => "Ludique & coloré",
            Style::Epure => "Épuré moderne (gris clair)",
            Style::Douceur => "Douceur florale (rose poudré & lavande)",
            Style::Automne => "Automne vintage (ocre & brun)",
        }
    }

    /// Colors of this style.
    pub fn palette(&self) -> Palette {
        let (background, accent, bubble, text) = match self {
            Style::Carnet => ((250, 245, 235), (195, 215, 180), (210, 230, 200), (50, 50, 50)),
            Style::Classique => ((255, 255, 255), (130, 190, 240), (255, 170, 80), (40, 40, 40)),
            Style::Ludique => ((255, 250, 235), (255, 200, 80), (130, 200, 255), (60, 60, 60)),
            Style::Epure => ((245, 245, 245), (220, 220, 220), (235, 235, 235), (30, 30, 30)),
            Style::Douceur => ((255, 250, 255), (240, 210, 230), (250, 235, 245), (80, 40, 70)),
            Style::Automne => ((255, 250, 240), (190, 150, 100), (230, 190, 150), (60, 40, 30)),
        };
        let color = |(r, g, b): (u8, u8, u8)| Color::rgb(r, g, b);

        Palette {
            background: color(background),
            accent: color(accent),
            bubble: color(bubble),
            text: color(text),
        }
    }

    /// Resolves a style token, falling back to [`Style::Carnet`] when the
    /// token names no style.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|UnknownStyle(token)| {
            log::debug!("Unknown style {token:?}; using {:?}.", Style::default());
            Style::default()
        })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// A token that names none of the [`Style`] keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown card style {:?}", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for Style {
    type Err = UnknownStyle;

    /// Exact, case-insensitive match against [`Style::key`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.key().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for style in Style::ALL {
            assert_eq!(style.key().parse::<Style>(), Ok(style));
            assert_eq!(style.to_string(), style.key());
        }
    }

    #[test]
    fn test_lookup_is_exact_not_substring() {
        assert_eq!("Classique".parse::<Style>(), Ok(Style::Classique));
        assert_eq!(" AUTOMNE ".parse::<Style>(), Ok(Style::Automne));
        assert!("Classique (bleu & orange)".parse::<Style>().is_err());
        assert!("carn".parse::<Style>().is_err());
    }

    #[test]
    fn test_unknown_token_defaults_to_carnet() {
        assert_eq!(Style::from_token("néon"), Style::Carnet);
        assert_eq!(Style::from_token(""), Style::Carnet);
        assert_eq!(Style::from_token("douceur"), Style::Douceur);
    }

    #[test]
    fn test_palettes() {
        let carnet = Style::Carnet.palette();
        assert_eq!(carnet.background, Color::rgb(250, 245, 235));
        assert_eq!(carnet.accent, Color::rgb(195, 215, 180));
        assert_eq!(carnet.bubble, Color::rgb(210, 230, 200));
        assert_eq!(carnet.text, Color::rgb(50, 50, 50));

        let automne = Style::Automne.palette();
        assert_eq!(automne.text, Color::rgb(60, 40, 30));
    }
}
