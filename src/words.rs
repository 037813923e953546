use include_dir::{include_dir, Dir};
use itertools::Itertools;
use std::fs;
use std::io;
use std::path::Path;

static ASSETS: Dir = include_dir!("assets");

const DEFAULT_TEXT_FILE: &str = "default.txt";

/// Turn raw text into the word stream a session types through.
///
/// Newlines and runs of whitespace all separate words; words wider than
/// `max_word_len` characters are split into typeable chunks so the window
/// selector never has to render an unbreakable overflow.
pub fn tokenize(text: &str, max_word_len: usize) -> Vec<String> {
    let max_word_len = max_word_len.max(1);

    text.split_whitespace()
        .flat_map(|word| split_long_word(word, max_word_len))
        .collect()
}

fn split_long_word(word: &str, max_word_len: usize) -> Vec<String> {
    if word.chars().count() <= max_word_len {
        return vec![word.to_string()];
    }

    let chars = word.chars().collect_vec();
    chars
        .chunks(max_word_len)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect()
}

/// Load and tokenize the practice text: a user-supplied file, or the
/// bundled sample when no path is given.
pub fn load(path: Option<&Path>, max_word_len: usize) -> io::Result<Vec<String>> {
    let text = match path {
        Some(p) => fs::read_to_string(p)?,
        None => default_text().to_string(),
    };

    Ok(tokenize(&text, max_word_len))
}

fn default_text() -> &'static str {
    ASSETS
        .get_file(DEFAULT_TEXT_FILE)
        .expect("bundled practice text not found")
        .contents_utf8()
        .expect("bundled practice text is not valid utf-8")
}
