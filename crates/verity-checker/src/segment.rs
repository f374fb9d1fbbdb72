//! Paragraph and sentence segmentation
//!
//! The checker and the fixer must agree on (paragraph, sentence) slots, so
//! both use these functions. Paragraphs split on blank lines; sentences
//! split on `.`/`!`/`?` followed by whitespace, with the terminator kept on
//! its sentence.

use std::ops::Range;

/// Split text into paragraphs on blank lines
///
/// Empty segments are kept so that indices stay stable when text contains
/// consecutive blank lines; callers skip segments that yield no sentences.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}

/// Split a paragraph into trimmed sentences, terminators retained
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    sentence_spans(paragraph)
        .into_iter()
        .map(|span| paragraph[span].to_string())
        .collect()
}

/// Byte spans of the trimmed sentences within a paragraph
///
/// Each span covers exactly the text `split_sentences` would return for
/// that slot, so callers can edit one sentence in place without
/// disturbing the whitespace around its siblings.
pub fn sentence_spans(paragraph: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_idx, next_char)) = chars.peek() {
                if next_char.is_whitespace() {
                    push_trimmed_span(paragraph, start, i + c.len_utf8(), &mut spans);
                    start = next_idx;
                }
            }
        }
    }
    push_trimmed_span(paragraph, start, paragraph.len(), &mut spans);

    spans
}

/// Push `start..end` narrowed to its trimmed content, skipping blanks
fn push_trimmed_span(text: &str, start: usize, end: usize, spans: &mut Vec<Range<usize>>) {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = slice.len() - slice.trim_start().len();
    spans.push(start + lead..start + lead + trimmed.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_paragraphs() {
        let text = "First paragraph.\n\nSecond paragraph.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_split_paragraphs_keeps_empty_segments() {
        let text = "One.\n\n\n\nTwo.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1], "");
    }

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("First sentence. Second one! Third?");
        assert_eq!(sentences, vec!["First sentence.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_split_sentences_keeps_terminator() {
        let sentences = split_sentences("Revenue grew by 45% in 2022. More text follows.");
        assert_eq!(sentences[0], "Revenue grew by 45% in 2022.");
    }

    #[test]
    fn test_decimal_numbers_not_split() {
        // A period not followed by whitespace does not end a sentence
        let sentences = split_sentences("The rate was 3.5 percent overall.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let sentences = split_sentences("Complete sentence. trailing fragment");
        assert_eq!(sentences, vec!["Complete sentence.", "trailing fragment"]);
    }

    #[test]
    fn test_spans_match_split_sentences() {
        let paragraph = "First one.  Second here!\nThird wraps onto a line?  tail";
        let spans = sentence_spans(paragraph);
        let sentences = split_sentences(paragraph);

        assert_eq!(spans.len(), sentences.len());
        for (span, sentence) in spans.iter().zip(&sentences) {
            assert_eq!(&paragraph[span.clone()], sentence);
        }
    }

    #[test]
    fn test_spans_exclude_surrounding_whitespace() {
        let paragraph = "  Padded start. Padded end.  ";
        let spans = sentence_spans(paragraph);

        assert_eq!(spans.len(), 2);
        assert_eq!(&paragraph[spans[0].clone()], "Padded start.");
        assert_eq!(&paragraph[spans[1].clone()], "Padded end.");
    }
}
