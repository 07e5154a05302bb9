/*!
 * Sentence-bounded chunking for oversized text.
 *
 * Translation services reject or truncate large payloads, so text longer than
 * the configured maximum is split on the literal `". "` delimiter and greedily
 * packed into chunks. Lengths are counted in characters.
 */

/// Default ceiling for one translation request, in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4500;

/// Delimiter used to split text into sentences
pub const SENTENCE_DELIMITER: &str = ". ";

/// Whether `text` needs chunking under `max_chars`
pub fn needs_chunking(text: &str, max_chars: usize) -> bool {
    text.chars().count() > max_chars
}

/// Split `text` into chunks for independent translation.
///
/// Each sentence is followed by `". "` in its chunk, including the last one.
/// A sentence is added to the current chunk while the chunk length plus the
/// sentence length stays below `max_chars`; otherwise the chunk is closed.
/// A single sentence longer than `max_chars` forms its own chunk.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in text.split(SENTENCE_DELIMITER) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len < max_chars {
            current.push_str(sentence);
            current.push_str(SENTENCE_DELIMITER);
            current_len += sentence_len + SENTENCE_DELIMITER.len();
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(sentence);
            current.push_str(SENTENCE_DELIMITER);
            current_len = sentence_len + SENTENCE_DELIMITER.len();
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
