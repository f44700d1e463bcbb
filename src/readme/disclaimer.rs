//! Disclaimer banner insertion
//!
//! A patched README is the original text with every earlier disclaimer block
//! removed, followed by exactly one Chinese and one English disclaimer block.
//! Patching is idempotent: `patch_readme(Some(&patch_readme(x))) == patch_readme(x)`.

use std::sync::OnceLock;

use regex::Regex;

/// Chinese disclaimer block, closed by a `---` separator
pub const CAUTION_STATEMENT_CN: &str = "\n# 免责声明\n\n> [!CAUTION]  \n> 本分支仅用于个人开发提供学习研究，请勿直接使用任何附件。如出现任何有关源附件问题，本作者概不负责。\n\n---\n";

/// English disclaimer block. It has no separator of its own.
pub const CAUTION_STATEMENT_EN: &str = "\n> [!CAUTION]  \n> This branch is only for personal development, study and research. Please do not use any attachments directly. The author is not responsible for any problems with the source attachments.\n";

/// Matches, in order of preference at a given position:
/// the Chinese heading with its quote lines and separator, the English block
/// body, and any other caution quote directly followed by a separator.
/// Only quote lines and blank lines may sit between a block's start and its
/// `---`, so a match never reaches across ordinary text. Trailing whitespace
/// goes with the block.
fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r"(?:# 免责声明[ \t]*\n\s*(?:>[^\n]*\s*)*---\s*)|(?:{}\s*)|(?:> \[!CAUTION\][^\n]*(?:\n>[^\n]*)*\s*---\s*)",
            regex::escape(CAUTION_STATEMENT_EN.trim())
        );
        Regex::new(&pattern).expect("disclaimer block regex")
    })
}

/// Both disclaimer blocks, Chinese first
pub fn disclaimer_block() -> String {
    format!("{CAUTION_STATEMENT_CN}{CAUTION_STATEMENT_EN}")
}

/// Whether either disclaimer text appears in `content`
pub fn contains_disclaimer(content: &str) -> bool {
    content.contains(CAUTION_STATEMENT_CN.trim()) || content.contains(CAUTION_STATEMENT_EN.trim())
}

/// Remove every disclaimer block and trim the result.
///
/// Removal is repeated until nothing matches, since cutting one block can
/// join text into a new match.
pub fn strip_disclaimers(content: &str) -> String {
    let pattern = block_pattern();
    let mut stripped = content.to_string();
    while pattern.is_match(&stripped) {
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }
    stripped.trim().to_string()
}

/// Compute the README content that should be on the remote.
///
/// `None` means the repository has no README; the result is then exactly the
/// two disclaimer blocks.
pub fn patch_readme(existing: Option<&str>) -> String {
    let Some(existing) = existing else {
        return disclaimer_block();
    };

    let mut patched = strip_disclaimers(existing);
    if !contains_disclaimer(&patched) {
        patched.push_str(CAUTION_STATEMENT_CN);
        patched.push_str(CAUTION_STATEMENT_EN);
    }
    patched
}
