//! LaTeX escaping for free-text inventory fields.
//!
//! All user text passes through here before it reaches the template: the
//! characters `& % $ # _ { } ~ ^ \` are neutralized, the literal tokens `C#`
//! and `C++` get dedicated renditions, and the lightweight `**bold**` markup
//! in bullet text becomes `\textbf{…}`.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));

// Private-use placeholders carry the literal substitutions through the
// character-level escaping pass untouched.
const CSHARP_MARK: &str = "\u{e000}";
const CPP_MARK: &str = "\u{e001}";

/// Escapes every LaTeX-special character in plain text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes bullet-style rich text: `C#`/`C++` substitutions, `**bold**`
/// translation, and full character escaping of everything else.
pub fn escape_rich(text: &str) -> String {
    let prepared = text.replace("C++", CPP_MARK).replace("C#", CSHARP_MARK);

    let mut out = String::with_capacity(prepared.len());
    let mut last = 0;
    for caps in BOLD_PATTERN.captures_iter(&prepared) {
        let whole = caps.get(0).expect("group 0 always present");
        out.push_str(&escape_latex(&prepared[last..whole.start()]));
        out.push_str("\\textbf{");
        out.push_str(&escape_latex(&caps[1]));
        out.push('}');
        last = whole.end();
    }
    out.push_str(&escape_latex(&prepared[last..]));

    out.replace(CSHARP_MARK, "C\\#").replace(CPP_MARK, "C{++}")
}
