use unicode_width::UnicodeWidthStr;

/// Fixed-pitch text model used to size labels and wrap box text.
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub label_char_width: f64,
    pub label_line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
            padding_x: 8.0,
            padding_y: 6.0,
            label_char_width: 6.0,
            label_line_height: 14.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Size of the background plate behind a connection label.
    pub fn label_size(&self, text: &str) -> (f64, f64) {
        let width = UnicodeWidthStr::width(text) as f64 * self.label_char_width;
        (width + 6.0, self.label_line_height + 2.0)
    }

    /// Greedy word wrap to fit `max_width`.
    ///
    /// Words wider than the limit get a line of their own.
    pub fn wrap(&self, text: &str, max_width: f64) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if self.text_width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Lines that fit inside a box of the given width.
    pub fn fit_lines(&self, text: &str, box_width: f64) -> Vec<String> {
        self.wrap(text, (box_width - self.padding_x * 2.0).max(self.char_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("CRM"), 3.0 * 7.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("顧客"), 4.0 * 7.0);
    }

    #[test]
    fn test_wrap() {
        let m = TextMetrics::default();
        // 70px fits 10 columns
        let lines = m.wrap("order management platform", 70.0);
        assert_eq!(lines, vec!["order", "management", "platform"]);

        let lines = m.wrap("a b c d", 70.0);
        assert_eq!(lines, vec!["a b c d"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let m = TextMetrics::default();
        let lines = m.wrap("x supercalifragilistic y", 35.0);
        assert_eq!(lines, vec!["x", "supercalifragilistic", "y"]);
    }

    #[test]
    fn test_wrap_empty() {
        let m = TextMetrics::default();
        assert!(m.wrap("   ", 100.0).is_empty());
    }

    #[test]
    fn test_label_size() {
        let m = TextMetrics::default();
        let (w, h) = m.label_size("sync");
        assert_eq!(w, 4.0 * 6.0 + 6.0);
        assert_eq!(h, 16.0);
    }
}
