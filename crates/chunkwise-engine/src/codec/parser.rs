use std::ops::Range;

use log::debug;

use super::{
    cleanup::{strip_all_tags, strip_chunk_tags, strip_verb_tags},
    cursor::Cursor,
    tags::{ChunkTag, VerbTag},
};
use crate::models::{Chunk, ChunkSequence, Segment};

/// A matched `<cN>...</cN>` span in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Tag number as written in the input.
    pub tag: u32,
    /// Byte range including both tags.
    pub full: Range<usize>,
    /// Byte range of the content between the tags.
    pub inner: Range<usize>,
}

/// Parses a tagged wire string into chunks.
///
/// Tags are kept as written; they are only renumbered by structural edits.
/// Text outside every chunk span is absorbed into the nearest chunk: onto the
/// preceding chunk where there is one, otherwise onto the front of the first.
/// Unmatched tag tokens are stripped. An input with no chunk span yields an
/// empty sequence, which callers should treat as unparsed content.
pub fn parse_tagged(input: &str) -> ChunkSequence {
    let spans = scan_chunk_spans(input);
    let Some(first) = spans.first() else {
        if !input.trim().is_empty() {
            debug!("no chunk spans recognised in {} bytes of input", input.len());
        }
        return ChunkSequence::default();
    };

    let leading = orphan_text(&input[..first.full.start]);
    let mut chunks: Vec<Chunk> = spans
        .iter()
        .map(|span| Chunk::from_segments(span.tag, build_segments(&input[span.inner.clone()])))
        .collect();

    for (index, span) in spans.iter().enumerate() {
        let next_start = spans.get(index + 1).map_or(input.len(), |next| next.full.start);
        if let Some(orphan) = orphan_text(&input[span.full.end..next_start]) {
            debug!("absorbing orphan text into chunk {}", span.tag);
            chunks[index].append_text(&orphan);
        }
    }
    if let Some(orphan) = leading {
        debug!("absorbing leading orphan text into chunk {}", first.tag);
        chunks[0].prepend_text(&orphan);
    }

    ChunkSequence::new(chunks)
}

/// Finds every well-formed chunk span, left to right.
///
/// An opening tag pairs with the earliest later closing tag carrying the same
/// number. An opening tag with no such partner is skipped as literal text.
pub fn scan_chunk_spans(input: &str) -> Vec<ChunkSpan> {
    let mut cur = Cursor::new(input);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(span) = try_parse_chunk(&mut cur) {
            out.push(span);
            continue;
        }
        cur.bump();
    }

    out
}

/// Attempts to parse a chunk span at the current position.
/// On failure, cursor position is restored.
fn try_parse_chunk(cur: &mut Cursor<'_>) -> Option<ChunkSpan> {
    if !cur.starts_with(ChunkTag::OPEN_PREFIX) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(ChunkTag::OPEN_PREFIX.len());
    let digits = cur.eat_digits();

    let tag = match digits.parse::<u32>() {
        Ok(tag) if tag > 0 && cur.peek() == Some(ChunkTag::END) => tag,
        _ => {
            *cur = saved;
            return None;
        }
    };
    cur.bump(); // >
    let inner_start = cur.pos();

    let close = ChunkTag::close(digits);
    let Some(inner_end) = cur.find(&close) else {
        *cur = saved;
        return None;
    };
    cur.i = inner_end + close.len();

    Some(ChunkSpan {
        tag,
        full: start..cur.pos(),
        inner: inner_start..inner_end,
    })
}

/// Builds the segment list for one chunk's inner content.
///
/// Text inside `<v>...</v>` becomes verb segments; text around them becomes
/// plain segments. Empty pieces are dropped, and an empty result becomes a
/// single empty segment.
fn build_segments(content: &str) -> Vec<Segment> {
    let content = strip_chunk_tags(content);
    let mut cur = Cursor::new(&content);
    let mut segments = vec![];
    let mut text_start = 0;

    fn push(segments: &mut Vec<Segment>, raw: &str, is_verb: bool) {
        let text = strip_verb_tags(raw);
        if !text.is_empty() {
            segments.push(Segment {
                text: text.into_owned(),
                is_verb,
            });
        }
    }

    while !cur.eof() {
        if let Some((full, inner)) = try_parse_verb(&mut cur) {
            push(&mut segments, &content[text_start..full.start], false);
            push(&mut segments, &content[inner], true);
            text_start = full.end;
            continue;
        }
        cur.bump();
    }
    push(&mut segments, &content[text_start..], false);

    if segments.is_empty() {
        segments.push(Segment::empty());
    }
    segments
}

/// Attempts to parse a `<v>...</v>` span, returning its full and inner ranges.
fn try_parse_verb(cur: &mut Cursor<'_>) -> Option<(Range<usize>, Range<usize>)> {
    if !cur.starts_with(VerbTag::OPEN.as_bytes()) {
        return None;
    }

    let start = cur.pos();
    let inner_start = start + VerbTag::OPEN.len();
    let mut ahead = cur.clone();
    ahead.bump_n(VerbTag::OPEN.len());
    let inner_end = ahead.find(VerbTag::CLOSE)?;

    cur.i = inner_end + VerbTag::CLOSE.len();
    Some((start..cur.pos(), inner_start..inner_end))
}

/// Cleans text found outside any chunk span; `None` if nothing is left.
fn orphan_text(raw: &str) -> Option<String> {
    let cleaned = strip_all_tags(raw);
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Word;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const FOX: &str = "<c1>The <v>quick</v> fox</c1> <c2>jumps <v>over</v> the dog</c2>";

    #[test]
    fn parses_the_fox_sentence() {
        let seq = parse_tagged(FOX);
        assert_eq!(seq.len(), 2);

        let first = &seq.chunks()[0];
        assert_eq!(first.tag(), 1);
        assert_eq!(first.text(), "The quick fox");
        assert_eq!(
            first.segments(),
            &[
                Segment::plain("The "),
                Segment::verb("quick"),
                Segment::plain(" fox"),
            ]
        );

        let second = &seq.chunks()[1];
        assert_eq!(second.tag(), 2);
        assert_eq!(second.text(), "jumps over the dog");
        assert_eq!(
            second.segments(),
            &[
                Segment::plain("jumps "),
                Segment::verb("over"),
                Segment::plain(" the dog"),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("just a sentence")]
    #[case("<c1>never closed")]
    #[case("<c1>mismatched</c2>")]
    #[case("<c0>zero</c0>")]
    #[case("<cx>letters</cx>")]
    fn unrecognised_input_gives_empty_sequence(#[case] input: &str) {
        assert!(parse_tagged(input).is_empty());
    }

    #[test]
    fn tags_are_kept_as_written() {
        let seq = parse_tagged("<c5>five</c5><c2>two</c2>");
        let tags: Vec<u32> = seq.iter().map(Chunk::tag).collect();
        assert_eq!(tags, vec![5, 2]);
        assert!(!seq.has_contiguous_tags());
    }

    #[test]
    fn close_tag_must_match_digit_text() {
        let spans = scan_chunk_spans("<c01>a</c1> b</c01>");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].tag, 1);
        assert_eq!(spans[0].inner, 5..13);
    }

    #[test]
    fn open_tag_pairs_with_earliest_close() {
        let spans = scan_chunk_spans("<c1>a</c1><c1>b</c1>");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].full, 0..10);
        assert_eq!(spans[1].full, 10..20);
    }

    #[test]
    fn unmatched_open_tag_is_skipped_then_stripped() {
        let seq = parse_tagged("<c3>lost <c1>found</c1>");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.chunks()[0].tag(), 1);
        assert_eq!(seq.chunks()[0].text(), "lost found");
    }

    #[test]
    fn nested_chunk_tags_are_stripped_from_content() {
        let seq = parse_tagged("<c1>outer <c2>inner</c2> end</c1>");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.chunks()[0].text(), "outer inner end");
        assert_eq!(seq.chunks()[0].segments(), &[Segment::plain("outer inner end")]);
    }

    #[test]
    fn stray_verb_tags_are_stripped() {
        let seq = parse_tagged("<c1>run</v> <v>fast</c1>");
        assert_eq!(seq.chunks()[0].text(), "run fast");
        assert!(seq.chunks()[0].segments().iter().all(|s| !s.is_verb));
    }

    #[test]
    fn unclosed_verb_spans_to_first_close() {
        let seq = parse_tagged("<c1><v>a <v>b</v> c</c1>");
        assert_eq!(
            seq.chunks()[0].words(),
            vec![
                Word::new("a", true),
                Word::new("b", true),
                Word::new("c", false),
            ]
        );
    }

    #[test]
    fn trailing_orphan_goes_onto_last_chunk() {
        let seq = parse_tagged("<c1>The fox</c1> <c2>jumps</c2> over the dog.");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.chunks()[1].text(), "jumps over the dog.");
        assert_eq!(seq.chunks()[1].segments(), &[Segment::plain("jumps over the dog.")]);
    }

    #[test]
    fn between_orphan_goes_onto_preceding_chunk() {
        let seq = parse_tagged("<c1>The fox</c1> quietly <c2>jumps</c2>");
        assert_eq!(seq.chunks()[0].text(), "The fox quietly");
        assert_eq!(seq.chunks()[1].text(), "jumps");
    }

    #[test]
    fn leading_orphan_goes_onto_first_chunk() {
        let seq = parse_tagged("Well, <c1><v>run</v> home</c1>");
        assert_eq!(seq.chunks()[0].text(), "Well, run home");
        assert_eq!(
            seq.chunks()[0].segments(),
            &[Segment::verb("Well, run"), Segment::plain(" home")]
        );
    }

    #[test]
    fn trailing_orphan_joins_a_final_verb_segment() {
        let seq = parse_tagged("<c1>jumps <v>over</v></c1> the dog");
        assert_eq!(seq.chunks()[0].text(), "jumps over the dog");
        assert_eq!(
            seq.chunks()[0].segments(),
            &[Segment::plain("jumps "), Segment::verb("over the dog")]
        );
    }

    #[test]
    fn orphan_after_trailing_space_is_not_double_spaced() {
        let seq = parse_tagged("<c1>go </c1> now");
        assert_eq!(seq.chunks()[0].segments(), &[Segment::plain("go now")]);
        assert_eq!(seq.to_tagged(), "<c1>go now</c1>");
    }

    #[test]
    fn orphan_tag_residue_is_removed() {
        let seq = parse_tagged("<c1>go</c1> </c9> <v>now</v>");
        assert_eq!(seq.chunks()[0].text(), "go now");
    }

    #[test]
    fn empty_chunk_has_placeholder_segment() {
        let seq = parse_tagged("<c1></c1>");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.chunks()[0].segments(), &[Segment::empty()]);
        assert_eq!(seq.chunks()[0].text(), "");
    }

    #[test]
    fn multibyte_text_survives() {
        let seq = parse_tagged("<c1>café <v>naïve</v></c1><c2>빠른 여우</c2>");
        assert_eq!(seq.chunks()[0].text(), "café naïve");
        assert_eq!(seq.chunks()[1].text(), "빠른 여우");
    }

    #[test]
    fn newlines_inside_spans_are_content() {
        let seq = parse_tagged("<c1>over\nthe line</c1>");
        assert_eq!(seq.chunks()[0].text(), "over the line");
    }

    #[test]
    fn other_markup_passes_through_as_text() {
        let seq = parse_tagged("<c1><b>bold</b> move</c1>");
        assert_eq!(seq.chunks()[0].text(), "<b>bold</b> move");
    }
}
