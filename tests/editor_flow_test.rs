// Typing flows through the input filter and the rescan surface

use emoji_edit_wasm::{
    EmojiFilter, GlyphAlign, GlyphCatalog, GlyphHandle, SpanApplier, SpannedText,
};

fn filter() -> EmojiFilter<GlyphCatalog> {
    let catalog = GlyphCatalog::new()
        .with_keys(["1f600", "1f601", "2764"])
        .with_glyph_size(24);
    EmojiFilter::new(catalog)
}

/// Host double that records every call it receives
#[derive(Default)]
struct RecordingHost {
    clears: usize,
    applied: Vec<(usize, usize, String)>,
}

impl SpanApplier<GlyphHandle> for RecordingHost {
    fn clear_spans(&mut self) {
        self.clears += 1;
        self.applied.clear();
    }

    fn apply_span(&mut self, start: usize, end: usize, handle: &GlyphHandle) {
        self.applied.push((start, end, handle.resource.clone()));
    }
}

#[test]
fn test_typing_sentence_with_emoji() {
    let f = filter();
    let mut text = SpannedText::new();

    for piece in ["I ", "❤", " you ", "😀"] {
        let at = text.len();
        text.insert(at, piece.as_bytes(), &f);
    }

    assert_eq!(text.text(), "I [2764] you [1f600]");
    let spans: Vec<(usize, usize, &str)> = text
        .spans()
        .iter()
        .map(|s| (s.start, s.end, s.handle.resource.as_str()))
        .collect();
    assert_eq!(spans, vec![(2, 8, "emoji_2764"), (13, 20, "emoji_1f600")]);
    assert!(text.spans().iter().all(|s| s.handle.size == 24));
    assert!(text.spans().iter().all(|s| s.handle.align == GlyphAlign::Bottom));
}

#[test]
fn test_unknown_emoji_inserted_unchanged() {
    let f = filter();
    let mut text = SpannedText::new();
    let patch = text.insert(0, "🦀".as_bytes(), &f);

    assert_eq!(text.text(), "🦀");
    assert_eq!(patch.new_cursor, 2);
    assert!(text.spans().is_empty());
}

#[test]
fn test_rescan_clears_previous_spans() {
    let f = filter();
    let mut host = RecordingHost::default();

    assert_eq!(f.rescan_and_apply("[1f600][1f601]", &mut host), 2);
    assert_eq!(f.rescan_and_apply("[1f600]", &mut host), 1);

    assert_eq!(host.clears, 2);
    assert_eq!(host.applied, vec![(0, 7, "emoji_1f600".to_string())]);
}

#[test]
fn test_rescan_does_not_touch_buffer() {
    let f = filter();
    let buffer = String::from("a [1f600] [zz] [1f601");
    let mut host = RecordingHost::default();
    f.rescan_and_apply(&buffer, &mut host);

    assert_eq!(buffer, "a [1f600] [zz] [1f601");
    assert_eq!(host.applied.len(), 1);
}

#[test]
fn test_replace_selection_with_emoji() {
    let f = filter();
    let mut text = SpannedText::from_text("say hi!");
    let patch = text.replace_range(4, 6, "😁".as_bytes(), &f);

    assert_eq!(text.text(), "say [1f601]!");
    assert_eq!((patch.start, patch.end, patch.new_cursor), (4, 6, 11));
    assert_eq!(text.spans().len(), 1);
    assert_eq!(text.spans()[0].start, 4);
    assert_eq!(text.spans()[0].end, 11);
}

#[test]
fn test_editing_inside_tag_unresolves_it() {
    let f = filter();
    let mut text = SpannedText::new();
    text.insert(0, "😀".as_bytes(), &f);
    assert_eq!(text.spans().len(), 1);

    // Typing a digit inside the tag makes the key unknown
    text.insert(3, b"0", &f);
    assert_eq!(text.text(), "[1f0600]");
    assert!(text.spans().is_empty());

    text.delete_range(4, 4, &f);
    assert_eq!(text.text(), "[1f600]");
    assert_eq!(text.spans().len(), 1);
}
