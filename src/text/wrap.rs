use super::GlyphMetrics;

/// Greedily breaks `text` into lines no wider than `max_width` pixels.
///
/// Words are separated by any whitespace and rejoined with single spaces.
/// A word is charged its own width plus one trailing space when deciding
/// whether it fits. A word that cannot fit even on an empty line is split at
/// character boundaries into the longest runs that fit; a run consisting of a
/// single character wider than the budget is kept as-is.
///
/// Empty or whitespace-only text yields no lines. Lines never carry trailing
/// spaces.
pub fn wrap<M: GlyphMetrics + ?Sized>(text: &str, font: &M, max_width: f32) -> Vec<String> {
    let space_width = font.advance(' ');

    let mut lines = Vec::new();
    let mut line_buf = LineBuffer::default();

    for word in text.split_whitespace() {
        let word_width = font.width(word) + space_width;

        if word_width > max_width {
            line_buf.flush_into(&mut lines);
            lines.extend(split_long_word(word, font, max_width));
            continue;
        }

        if line_buf.width + word_width > max_width {
            line_buf.flush_into(&mut lines);
        }
        line_buf.push(word, word_width);
    }

    line_buf.flush_into(&mut lines);
    lines
}

/// Splits a single word into the longest character runs that fit `max_width`.
///
/// Runs are accumulated character by character; a character that would push
/// the running width past the budget starts a new run. No run is ever empty.
pub fn split_long_word<M: GlyphMetrics + ?Sized>(
    word: &str,
    font: &M,
    max_width: f32,
) -> Vec<String> {
    let mut segments = Vec::new();
    let mut segment = String::new();
    let mut segment_width = 0.0;

    for ch in word.chars() {
        let ch_width = font.advance(ch);
        if !segment.is_empty() && segment_width + ch_width > max_width {
            segments.push(std::mem::take(&mut segment));
            segment_width = 0.0;
        }
        segment.push(ch);
        segment_width += ch_width;
    }

    if !segment.is_empty() {
        segments.push(segment);
    }

    segments
}

/// The line being assembled: words joined by single spaces and the width
/// charged for them, trailing space included.
#[derive(Default)]
struct LineBuffer {
    text: String,
    width: f32,
}

impl LineBuffer {
    fn push(&mut self, word: &str, word_width: f32) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(word);
        self.width += word_width;
    }

    /// Moves the buffered line (if any) into `lines` and resets the buffer.
    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if !self.text.is_empty() {
            lines.push(std::mem::take(&mut self.text));
        }
        self.width = 0.0;
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FallbackFont, GlyphBitmap};

    /// 10 px per character.
    fn ten_px() -> FallbackFont {
        FallbackFont::new(20.0)
    }

    /// Narrow letters, wide `W`, for mixed-width cases.
    struct Proportional;

    impl GlyphMetrics for Proportional {
        fn advance(&self, ch: char) -> f32 {
            match ch {
                'W' => 25.0,
                'i' | 'l' => 4.0,
                ' ' => 5.0,
                _ => 9.0,
            }
        }

        fn ascent(&self) -> u32 {
            14
        }

        fn descent(&self) -> u32 {
            4
        }

        fn rasterize(&self, _ch: char) -> GlyphBitmap {
            GlyphBitmap::empty()
        }
    }

    fn assert_fits<M: GlyphMetrics>(lines: &[String], font: &M, max_width: f32) {
        for line in lines {
            assert!(
                font.width(line) <= max_width,
                "line {line:?} is {} px wide, budget {max_width}",
                font.width(line)
            );
        }
    }

    #[test]
    fn test_empty_and_blank_text_produce_no_lines() {
        let font = ten_px();
        assert!(wrap("", &font, 100.0).is_empty());
        assert!(wrap(" ", &font, 100.0).is_empty());
        assert!(wrap(" \t\n  ", &font, 100.0).is_empty());
    }

    #[test]
    fn test_rougegorge_splits_into_two_lines() {
        let font = ten_px();
        let lines = wrap("Rougegorge familier", &font, 100.0);
        assert_eq!(lines, vec!["Rougegorge", "familier"]);
        assert_fits(&lines, &font, 100.0);
    }

    #[test]
    fn test_words_are_packed_greedily() {
        let font = ten_px();
        let lines = wrap("Jardin, haies, sous-bois et lisieres", &font, 160.0);
        assert_eq!(lines, vec!["Jardin, haies,", "sous-bois et", "lisieres"]);
        assert_fits(&lines, &font, 160.0);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let font = ten_px();
        let lines = wrap("  Insectes,\tgraines,\n\nfruits  ", &font, 1000.0);
        assert_eq!(lines, vec!["Insectes, graines, fruits"]);
    }

    #[test]
    fn test_long_word_is_split_by_characters() {
        let font = ten_px();
        let word = "a".repeat(50);
        let lines = wrap(&word, &font, 80.0);

        assert_eq!(lines.len(), 50usize.div_ceil(8));
        assert_eq!(lines[0].len(), 8);
        assert_eq!(lines[6].len(), 2);
        assert!(lines.iter().all(|line| !line.contains(' ')));
        assert_fits(&lines, &font, 80.0);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_long_word_flushes_pending_line_first() {
        let font = ten_px();
        let lines = wrap("un Erithacusrubecula oiseau", &font, 80.0);
        assert_eq!(lines, vec!["un", "Erithacu", "srubecul", "a", "oiseau"]);
    }

    #[test]
    fn test_width_below_any_glyph_puts_each_char_on_its_own_line() {
        let font = ten_px();
        let lines = wrap("abc de", &font, 3.0);
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_fat_character_is_emitted_as_is() {
        let lines = wrap("iWi", &Proportional, 20.0);
        assert_eq!(lines, vec!["i", "W", "i"]);
    }

    #[test]
    fn test_proportional_lines_fit() {
        let text = "Le rougegorge familier chante toute l'annee, meme en hiver, \
                    depuis un perchoir bien visible";
        for max_width in [40.0, 55.0, 90.0, 130.0, 300.0] {
            let lines = wrap(text, &Proportional, max_width);
            assert_fits(&lines, &Proportional, max_width);
            assert!(lines.iter().all(|line| !line.ends_with(' ')));
        }
    }

    #[test]
    fn test_rejoined_lines_reconstruct_normalized_text() {
        let font = ten_px();
        let text = "Solitaire   et territorial, defend son coin\tde jardin";
        let lines = wrap(text, &font, 150.0);
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(lines.join(" "), normalized);
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let font = ten_px();
        let text = "Tache orange sur le torse, calotte grise";
        assert_eq!(wrap(text, &font, 120.0), wrap(text, &font, 120.0));
    }

    #[test]
    fn test_wider_budget_never_adds_lines() {
        let text = "Decris son comportement, son chant, sa relation avec l'humain \
                    et quelques anecdotes d'observation";
        let mut previous = usize::MAX;
        for step in 1..=60 {
            let max_width = step as f32 * 10.0;
            let count = wrap(text, &Proportional, max_width).len();
            assert!(count <= previous, "{max_width}: {count} > {previous}");
            previous = count;
        }
    }

    #[test]
    fn test_split_long_word_never_emits_empty_segments() {
        let segments = split_long_word("WWW", &Proportional, 10.0);
        assert_eq!(segments, vec!["W", "W", "W"]);
        assert!(split_long_word("", &Proportional, 10.0).is_empty());
    }
}
