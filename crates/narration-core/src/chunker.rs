//! Sentence-aware chunking for long narration input.
//!
//! Splits a document into bounded pieces on sentence-ending punctuation so
//! the sequencer can feed the narration engine one utterance at a time.

/// Default chunk bound, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 2500;

/// Sentence terminators recognized by the splitter: the Latin enders plus the
/// Devanagari danda and the ellipsis.
const TERMINATORS: [char; 5] = ['.', '?', '!', '।', '…'];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split `text` into sentence pieces.
///
/// A piece ends after a run of terminators followed by a run of whitespace;
/// both runs stay attached to the piece they close. A terminator with no
/// whitespace after it ("3.14") does not end a piece.
fn split_pieces(text: &str) -> Vec<&str> {
    #[derive(PartialEq)]
    enum At {
        Content,
        TerminatorRun,
        SeparatorWhitespace,
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut at = At::Content;

    for (i, c) in text.char_indices() {
        match at {
            At::Content => {
                if is_terminator(c) {
                    at = At::TerminatorRun;
                }
            }
            At::TerminatorRun => {
                if c.is_whitespace() {
                    at = At::SeparatorWhitespace;
                } else if !is_terminator(c) {
                    at = At::Content;
                }
            }
            At::SeparatorWhitespace => {
                if !c.is_whitespace() {
                    pieces.push(&text[start..i]);
                    start = i;
                    at = if is_terminator(c) {
                        At::TerminatorRun
                    } else {
                        At::Content
                    };
                }
            }
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Split `text` into ordered chunks of at most `max_chunk_chars` characters.
///
/// Pieces are accumulated greedily: when appending the next sentence piece
/// would exceed the bound, the current buffer is emitted (trimmed) and a new
/// buffer starts with that piece. The final non-empty buffer is always
/// emitted. A single piece longer than the bound is emitted as one oversized
/// chunk rather than being force-split mid-word.
///
/// Empty or whitespace-only input yields an empty vector.
pub fn split(text: &str, max_chunk_chars: usize) -> Vec<String> {
    let max = max_chunk_chars.max(1);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for piece in split_pieces(text) {
        let piece_chars = piece.chars().count();
        if current_chars + piece_chars > max {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
            current.clear();
            current_chars = 0;
        }
        current.push_str(piece);
        current_chars += piece_chars;
    }

    let tail = current.trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }
    chunks
}
