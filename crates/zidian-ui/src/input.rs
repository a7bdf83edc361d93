use unicode_segmentation::UnicodeSegmentation;

/// The single-line input field. Excess graphemes are cut here, before the
/// text ever reaches the query view.
#[derive(Debug, Clone, Copy)]
pub struct InputLine {
    max_graphemes: usize,
}

impl InputLine {
    pub fn new(max_graphemes: usize) -> Self {
        Self { max_graphemes }
    }

    pub fn accept(&self, raw: &str) -> String {
        raw.trim_end_matches(['\r', '\n'])
            .graphemes(true)
            .take(self.max_graphemes)
            .collect()
    }
}
