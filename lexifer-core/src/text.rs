//! Pseudo-text composition
//!
//! Strings generated words into sentences for a feel of how the language
//! reads in running text.

use crate::error::Result;
use crate::sound_system::SoundSystem;
use rand::Rng;

/// Default column at which [`wrap`] breaks lines
pub const DEFAULT_WIDTH: usize = 70;

/// Words after the head word
const MIN_SENTENCE_WORDS: usize = 3;
const MAX_SENTENCE_WORDS: usize = 11;
/// Sentences with at least this many words after the head may carry a comma
const COMMA_THRESHOLD: usize = 7;
/// Out of 100, the chance a sentence ends in a full stop
const PERIOD_CHANCE: u32 = 85;
/// Draws per word before the slot is left empty
const WORD_ATTEMPTS: usize = 5;

/// Compose `sentences` sentences as one paragraph
///
/// Each sentence is a capitalised head word followed by 3 to 11 more words;
/// when at least 7 follow, one of them may carry a comma. Slots whose word
/// keeps getting rejected are skipped.
pub fn compose_paragraph<R: Rng + ?Sized>(
    system: &SoundSystem,
    sentences: usize,
    rng: &mut R,
) -> Result<String> {
    let mut paragraph = String::new();

    for _ in 0..sentences {
        let length = rng.gen_range(MIN_SENTENCE_WORDS..=MAX_SENTENCE_WORDS);
        let comma = (length >= COMMA_THRESHOLD).then(|| rng.gen_range(0..=length - 2));

        let mut words: Vec<String> = Vec::with_capacity(length + 1);
        if let Some(head) = draw_word(system, rng)? {
            words.push(capitalize(&head));
        }
        for slot in 0..length {
            let Some(mut word) = draw_word(system, rng)? else {
                log::debug!("no word for slot {slot} after {WORD_ATTEMPTS} attempts");
                continue;
            };
            if words.is_empty() {
                word = capitalize(&word);
            }
            if comma == Some(slot) {
                word.push(',');
            }
            words.push(word);
        }
        if words.is_empty() {
            continue;
        }

        paragraph.push_str(&words.join(" "));
        paragraph.push_str(if rng.gen_range(0..=100) <= PERIOD_CHANCE {
            ". "
        } else {
            "? "
        });
    }

    Ok(paragraph.trim_end().to_string())
}

fn draw_word<R: Rng + ?Sized>(system: &SoundSystem, rng: &mut R) -> Result<Option<String>> {
    for _ in 0..WORD_ATTEMPTS {
        if let Some(word) = system.generate_with(1, true, rng)?.pop() {
            return Ok(Some(word));
        }
    }
    Ok(None)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Greedily wrap `text` at `width` columns
///
/// A word longer than the width is broken across lines, its first piece
/// filling whatever room is left on the current line.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if current.is_empty() && word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else if word_width <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            let mut chars: Vec<char> = word.chars().collect();
            if !current.is_empty() {
                let room = width.saturating_sub(current_width + 1);
                if room > 0 {
                    current.push(' ');
                    current.extend(chars.drain(..room));
                }
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = chars.chunks(width).peekable();
            while let Some(piece) = pieces.next() {
                if pieces.peek().is_some() {
                    lines.push(piece.iter().collect());
                } else {
                    current = piece.iter().collect();
                    current_width = piece.len();
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
