use crate::document::Chunk;

/// Greedy word packer.
///
/// Words are taken in order from the whitespace-split input. Each word costs
/// its character length plus one for the separating space. A word that would
/// push the running cost past `chunk_size` closes the current chunk and opens
/// the next one. The first word of a chunk is always accepted, so a word
/// longer than `chunk_size` becomes a chunk of its own and is never split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let cost = word.chars().count() + 1;
            if !current.is_empty() && current_len + cost > self.chunk_size {
                chunks.push(Chunk::new(current.join(" ")));
                current.clear();
                current_len = 0;
            }
            current.push(word);
            current_len += cost;
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(current.join(" ")));
        }

        tracing::debug!(
            target: "chunking",
            "text split into {} chunks (chunk_size={})",
            chunks.len(),
            self.chunk_size
        );

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(Chunk::as_str).collect()
    }

    /// Deterministic text with word lengths between 1 and 12.
    fn sample_text(words: usize) -> String {
        let mut state = 0x2545_f491_u32;
        (0..words)
            .map(|i| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let len = (state % 12 + 1) as usize;
                let letter = (b'a' + (i % 26) as u8) as char;
                letter.to_string().repeat(len)
            })
            .collect::<Vec<_>>()
            .join(if words % 2 == 0 { " " } else { "\n\t " })
    }

    #[test]
    fn test_packs_words_up_to_limit() {
        let chunks = TextChunker::new(5).chunk("a bb ccc dddd");
        assert_eq!(contents(&chunks), vec!["a bb", "ccc", "dddd"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(TextChunker::new(500).chunk("").is_empty());
        assert!(TextChunker::new(500).chunk(" \n\t ").is_empty());
    }

    #[test]
    fn test_oversized_word_is_its_own_chunk() {
        let chunks = TextChunker::new(5).chunk("abcdefghij xy abcdefghij");
        assert_eq!(contents(&chunks), vec!["abcdefghij", "xy", "abcdefghij"]);
    }

    #[test]
    fn test_oversized_first_word_emits_no_empty_chunk() {
        let chunks = TextChunker::new(3).chunk("abcdefghij");
        assert_eq!(contents(&chunks), vec!["abcdefghij"]);
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        let chunks = TextChunker::new(500).chunk("  one\ttwo\n\nthree  ");
        assert_eq!(contents(&chunks), vec!["one two three"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Each word is 3 chars (6 bytes); cost 4 per word.
        let chunks = TextChunker::new(8).chunk("äöü äöü äöü");
        assert_eq!(contents(&chunks), vec!["äöü äöü", "äöü"]);
    }

    #[test]
    fn test_words_are_preserved_in_order() {
        for words in [1, 7, 64, 301] {
            let text = sample_text(words);
            let expected: Vec<&str> = text.split_whitespace().collect();
            for size in [1, 5, 13, 40, 500] {
                let chunks = TextChunker::new(size).chunk(&text);
                let rejoined: Vec<&str> =
                    chunks.iter().flat_map(|c| c.as_str().split(' ')).collect();
                assert_eq!(rejoined, expected, "words={words} size={size}");
            }
        }
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let text = sample_text(500);
        for size in [1, 5, 13, 40, 500] {
            for chunk in TextChunker::new(size).chunk(&text) {
                let single_word = !chunk.as_str().contains(' ');
                assert!(
                    chunk.char_count() <= size || single_word,
                    "chunk {chunk:?} exceeds {size}"
                );
                assert!(!chunk.as_str().is_empty());
            }
        }
    }

    #[test]
    fn test_chunks_are_maximal() {
        let text = sample_text(200);
        let size = 40;
        let chunks = TextChunker::new(size).chunk(&text);
        for pair in chunks.windows(2) {
            let first_word = pair[1].as_str().split(' ').next().unwrap();
            let cost_so_far: usize = pair[0]
                .as_str()
                .split(' ')
                .map(|w| w.chars().count() + 1)
                .sum();
            assert!(cost_so_far + first_word.chars().count() + 1 > size);
        }
    }
}
