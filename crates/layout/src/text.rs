use unicode_segmentation::UnicodeSegmentation;

/// Layout can depend on this without knowing how glyphs are actually rendered.
pub trait TextMeasurer {
    /// Return the advance width of `text` in CSS px.
    fn measure(&self, text: &str) -> f32;

    /// Return the height of one line box in CSS px.
    fn line_height(&self) -> f32;
}

/// Every grapheme cluster advances by the same amount. Deterministic, so tests can reason
/// about exactly where lines wrap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 20.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str) -> f32 {
        (**self).measure(text)
    }

    fn line_height(&self) -> f32 {
        (**self).line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_grapheme_clusters_not_chars() {
        let m = MonospaceMeasurer::default();
        assert_eq!(m.measure("abc"), 30.0);
        assert_eq!(m.measure("e\u{301}"), 10.0);
        assert_eq!(m.measure("\u{1F469}\u{200D}\u{1F52C} x"), 30.0);
        assert_eq!(m.measure(""), 0.0);
    }
}
