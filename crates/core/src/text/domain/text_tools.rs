//! Quick edits applied to the script before synthesis.

const STRIPPED_QUOTES: [char; 4] = ['«', '»', '"', '\''];

/// Lengthens every sentence pause (`.` becomes `...`) and drops quotation marks.
pub fn liturgical_pause(text: &str) -> String {
    text.replace('.', "...").replace(STRIPPED_QUOTES, "")
}

/// Starts a new line after every period.
pub fn newline_after_period(text: &str) -> String {
    text.replace('.', ".\n")
}
