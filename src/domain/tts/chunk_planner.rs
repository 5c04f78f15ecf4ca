use super::model::Segment;

/// Terminators that end a sentence when followed by whitespace
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '…'];
/// Full-width terminators end a sentence on their own
const FULL_WIDTH_TERMINATORS: [char; 3] = ['。', '！', '？'];
/// Closing marks allowed between a terminator and the following whitespace
const CLOSING_MARKS: [char; 6] = ['"', '\'', ')', ']', '”', '’'];

/// Split text into ordered segments of at most `budget` characters.
///
/// Text that already fits is returned untouched as a single segment. Longer
/// text is split greedily at the latest paragraph or sentence boundary inside
/// the budget, then at the latest whitespace, and only as a last resort
/// exactly at the budget. Lengths are counted in `char`s, so a forced split
/// never lands inside a multi-byte character. Whitespace around split points
/// is dropped.
pub fn plan(text: &str, budget: usize) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let budget = budget.max(1);

    if text.chars().nth(budget).is_none() {
        return vec![Segment {
            index: 0,
            text: text.to_string(),
        }];
    }

    let mut segments = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        // Byte offset of the first character past the budget
        let limit = match rest.char_indices().nth(budget) {
            Some((offset, _)) => offset,
            None => {
                push_segment(&mut segments, rest.trim_end());
                break;
            }
        };

        let (head, tail) = rest.split_at(find_split(rest, limit));
        push_segment(&mut segments, head.trim_end());
        rest = tail;
    }

    tracing::debug!(
        text_length = text.chars().count(),
        budget,
        segment_count = segments.len(),
        "Text planned into segments"
    );

    segments
}

/// Plan text that is expanded before it is sent, such as SSML.
///
/// Planning starts at `budget`; any segment whose `rendered_len` exceeds
/// `limit` is split again at half its length until every piece fits or is a
/// single character.
pub fn plan_rendered<F>(text: &str, budget: usize, limit: usize, rendered_len: F) -> Vec<Segment>
where
    F: Fn(&str) -> usize,
{
    let mut pieces = Vec::new();
    for segment in plan(text, budget) {
        split_until_fits(segment.text, limit, &rendered_len, &mut pieces);
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| Segment { index, text })
        .collect()
}

fn split_until_fits<F>(text: String, limit: usize, rendered_len: &F, pieces: &mut Vec<String>)
where
    F: Fn(&str) -> usize,
{
    let char_count = text.chars().count();
    if char_count <= 1 || rendered_len(&text) <= limit {
        pieces.push(text);
        return;
    }

    tracing::debug!(
        segment_length = char_count,
        limit,
        "Rendered segment over limit, splitting again"
    );
    for segment in plan(&text, char_count / 2) {
        split_until_fits(segment.text, limit, rendered_len, pieces);
    }
}

fn push_segment(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    segments.push(Segment {
        index: segments.len(),
        text: text.to_string(),
    });
}

/// Byte offset in `(0, limit]` where the segment starting at `rest` ends.
/// `rest` starts with a non-whitespace character and is longer than `limit`.
fn find_split(rest: &str, limit: usize) -> usize {
    let window = &rest[..limit];
    let mut sentence = None;
    let mut whitespace = None;
    let mut prev: Option<char> = None;
    let mut before_prev: Option<char> = None;

    for (offset, ch) in window.char_indices() {
        if ch.is_whitespace() && offset > 0 {
            whitespace = Some(offset);
            if ch == '\n' || ends_sentence(prev, before_prev) {
                sentence = Some(offset);
            }
        }
        if FULL_WIDTH_TERMINATORS.contains(&ch) {
            sentence = Some(offset + ch.len_utf8());
        }
        before_prev = prev;
        prev = Some(ch);
    }

    // A boundary that falls exactly on the window edge keeps the whole window
    if let Some(next) = rest[limit..].chars().next() {
        if next.is_whitespace() {
            whitespace = Some(limit);
            if next == '\n' || ends_sentence(prev, before_prev) {
                sentence = Some(limit);
            }
        }
    }

    sentence.or(whitespace).unwrap_or(limit)
}

fn ends_sentence(prev: Option<char>, before_prev: Option<char>) -> bool {
    match prev {
        Some(c) if SENTENCE_TERMINATORS.contains(&c) => true,
        Some(c) if CLOSING_MARKS.contains(&c) => {
            before_prev.map_or(false, |b| SENTENCE_TERMINATORS.contains(&b))
        }
        _ => false,
    }
}
