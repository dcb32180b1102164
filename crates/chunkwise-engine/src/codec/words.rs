use crate::models::{Segment, Word};

/// Split segments into words on whitespace runs. Each word inherits its
/// segment's emphasis flag; whitespace itself is discarded.
pub fn segments_to_words(segments: &[Segment]) -> Vec<Word> {
    segments
        .iter()
        .flat_map(|segment| {
            segment
                .text
                .split_whitespace()
                .map(move |token| Word::new(token, segment.is_verb))
        })
        .collect()
}

/// Join words back into segments.
///
/// Consecutive words with the same emphasis flag share one segment, joined by
/// single spaces. Every segment but the last carries a trailing space so the
/// segments can be concatenated without separators. An empty word list gives
/// one empty, non-verb segment.
pub fn words_to_segments(words: &[Word]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for word in words {
        match segments.last_mut() {
            Some(last) if last.is_verb == word.is_verb => {
                last.text.push(' ');
                last.text.push_str(&word.word);
            }
            _ => segments.push(Segment {
                text: word.word.clone(),
                is_verb: word.is_verb,
            }),
        }
    }

    let Some((_, leading)) = segments.split_last_mut() else {
        return vec![Segment::empty()];
    };
    for segment in leading {
        segment.text.push(' ');
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(pairs: &[(&str, bool)]) -> Vec<Word> {
        pairs.iter().map(|(w, v)| Word::new(*w, *v)).collect()
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let segments = vec![
            Segment::plain("The  "),
            Segment::verb("quick"),
            Segment::plain(" \n fox "),
        ];
        assert_eq!(
            segments_to_words(&segments),
            words(&[("The", false), ("quick", true), ("fox", false)])
        );
    }

    #[test]
    fn whitespace_only_segments_yield_no_words() {
        let segments = vec![Segment::plain("   "), Segment::verb(""), Segment::empty()];
        assert!(segments_to_words(&segments).is_empty());
    }

    #[test]
    fn merges_runs_and_pads_all_but_last() {
        let segments = words_to_segments(&words(&[
            ("The", false),
            ("quick", true),
            ("brown", true),
            ("fox", false),
        ]));
        assert_eq!(
            segments,
            vec![
                Segment::plain("The "),
                Segment::verb("quick brown "),
                Segment::plain("fox"),
            ]
        );
    }

    #[test]
    fn single_run_has_no_trailing_space() {
        let segments = words_to_segments(&words(&[("over", true), ("it", true)]));
        assert_eq!(segments, vec![Segment::verb("over it")]);
    }

    #[test]
    fn empty_word_list_gives_placeholder_segment() {
        assert_eq!(words_to_segments(&[]), vec![Segment::empty()]);
    }

    #[test]
    fn word_round_trip_is_stable_after_first_pass() {
        let original = vec![
            Segment::plain("  The   "),
            Segment::verb("quick"),
            Segment::verb(" brown"),
            Segment::plain("fox\tjumps  "),
        ];
        let first = segments_to_words(&original);
        let second = segments_to_words(&words_to_segments(&first));
        assert_eq!(first, second);

        let third = segments_to_words(&words_to_segments(&second));
        assert_eq!(second, third);
    }

    #[test]
    fn concatenated_segments_read_as_spaced_words() {
        let segments = words_to_segments(&words(&[("a", false), ("b", true), ("c", false)]));
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "a b c");
    }
}
