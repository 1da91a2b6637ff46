//! Word bank files: one word per line, `#` starts a comment line.

use anyhow::{Context, Result};
use std::path::Path;

/// Read the words of a word bank file.
pub fn read_word_bank(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading word bank {}", path.display()))?;
    Ok(parse_word_bank(&content))
}

/// Extract words from word bank text, skipping blank and comment lines.
pub fn parse_word_bank(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_bank() {
        let text = "# animals\ncat\n\n  dog  \n#bird\nemu\n";
        assert_eq!(parse_word_bank(text), vec!["cat", "dog", "emu"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = std::env::temp_dir().join("letterform_no_such_word_bank.txt");
        let err = read_word_bank(&path).unwrap_err();
        assert!(err.to_string().contains("reading word bank"));
    }
}
