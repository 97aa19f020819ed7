//! Label text escaping
//!
//! Converts arbitrary label text into markup that is safe inside a pgfplots
//! option value. Symbols with a known math macro become math spans, simple
//! sub/superscript sequences are wrapped into math spans, structural
//! characters outside math spans are escaped, and anything left that is not
//! ASCII is transliterated.
//!
//! The stages run in a fixed order and each one relies on the shape of the
//! previous stage's output; see [`escape_text`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Symbols replaced by a self-contained math span.
///
/// Every fragment has the form `${\macro}$`; the backslash repair stage
/// depends on that shape.
const SYMBOL_MAP: &[(char, &str)] = &[
    ('α', r"${\alpha}$"),
    ('β', r"${\beta}$"),
    ('γ', r"${\gamma}$"),
    ('Γ', r"${\Gamma}$"),
    ('δ', r"${\delta}$"),
    ('Δ', r"${\Delta}$"),
    ('ϵ', r"${\epsilon}$"),
    ('ε', r"${\varepsilon}$"),
    ('ζ', r"${\zeta}$"),
    ('η', r"${\eta}$"),
    ('θ', r"${\theta}$"),
    ('ϑ', r"${\vartheta}$"),
    ('Θ', r"${\Theta}$"),
    ('ι', r"${\iota}$"),
    ('κ', r"${\kappa}$"),
    ('ϰ', r"${\kappa}$"),
    ('λ', r"${\lambda}$"),
    ('Λ', r"${\Lambda}$"),
    ('μ', r"${\mu}$"),
    ('µ', r"${\mu}$"),
    ('ν', r"${\nu}$"),
    ('ξ', r"${\xi}$"),
    ('π', r"${\pi}$"),
    ('Π', r"${\Pi}$"),
    ('ρ', r"${\rho}$"),
    ('ϱ', r"${\varrho}$"),
    ('σ', r"${\sigma}$"),
    ('ς', r"${\sigma}$"),
    ('Σ', r"${\Sigma}$"),
    ('τ', r"${\tau}$"),
    ('υ', r"${\upsilon}$"),
    ('Υ', r"${\Upsilon}$"),
    ('ϕ', r"${\phi}$"),
    ('φ', r"${\varphi}$"),
    ('Φ', r"${\Phi}$"),
    ('χ', r"${\chi}$"),
    ('ψ', r"${\psi}$"),
    ('Ψ', r"${\Psi}$"),
    ('ω', r"${\omega}$"),
    ('Ω', r"${\Omega}$"),
    ('±', r"${\pm}$"),
    ('∓', r"${\mp}$"),
    ('≈', r"${\approx}$"),
    ('∼', r"${\sim}$"),
    ('≅', r"${\cong}$"),
    ('≠', r"${\neq}$"),
    ('⊕', r"${\oplus}$"),
    ('×', r"${\times}$"),
    ('∇', r"${\nabla}$"),
    ('→', r"${\rightarrow}$"),
    ('←', r"${\leftarrow}$"),
    ('⇒', r"${\Rightarrow}$"),
    ('⇐', r"${\Leftarrow}$"),
    ('↔', r"${\leftrightarrow}$"),
    ('⇔', r"${\Leftrightarrow}$"),
    ('↦', r"${\mapsto}$"),
];

/// Characters with structural meaning outside math mode
const STRUCTURAL: &[char] = &['{', '}', '_', '^'];

static SCIENTIFIC_NOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\^([{}\d+\-]+)")
        .expect("BUG: invalid SCIENTIFIC_NOTATION_RE regex literal")
});

static SUBSCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([\w\d]+_[\w\d])\b").expect("BUG: invalid SUBSCRIPT_RE regex literal")
});

static SUPERSCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([\w\d]+\^[\w\d])\b").expect("BUG: invalid SUPERSCRIPT_RE regex literal")
});

static SUBSCRIPT_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w\d]+_\{[\w\d]+\})")
        .expect("BUG: invalid SUBSCRIPT_BRACE_RE regex literal")
});

static SUPERSCRIPT_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w\d]+\^\{[\w\d]+\})")
        .expect("BUG: invalid SUPERSCRIPT_BRACE_RE regex literal")
});

static JOIN_MATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([\^_ +\-*/]*)\$").expect("BUG: invalid JOIN_MATH_RE regex literal")
});

/// Escape label text for use in TikZ/pgfplots markup
///
/// Stages, in order:
/// 1. symbol substitution (`α` -> `${\alpha}$`)
/// 2. exponent notation (`10^5` -> `${10^{5}}$`)
/// 3. bare sub/superscripts outside math spans (`x_a` -> `$x_a$`)
/// 4. braced sub/superscripts outside math spans (`x_{ab}` -> `$x_{ab}$`)
/// 5. `{ } _ ^` outside math spans get a backslash
/// 6. a backslash not followed by one of those gets doubled
/// 7. `{\\` from stage 6 touching stage 1 output collapses to `{\`
/// 8. adjacent math spans separated only by operators are merged
/// 9. braces escaped in stage 5 that now sit in a math span are unescaped
/// 10. remaining non-ASCII characters are transliterated
///
/// # Example
/// ```
/// use tikz_export::core::escape_text;
///
/// assert_eq!(escape_text("a_b"), "$a_b$");
/// assert_eq!(escape_text("αβ"), r"${\alpha}{\beta}$");
/// assert_eq!(escape_text("plain label"), "plain label");
/// ```
pub fn escape_text(input: &str) -> String {
    let text = replace_symbols(input);
    let text = wrap_scientific_notation(&text);
    let text = wrap_simple_scripts(&text);
    let text = wrap_braced_scripts(&text);
    let text = escape_structural(&text);
    let text = escape_backslashes(&text);
    let text = text.replace(r"{\\", r"{\");
    let text = join_math_spans(&text);
    let text = unescape_math_braces(&text);

    any_ascii::any_ascii(&text)
}

fn replace_symbols(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match SYMBOL_MAP.iter().find(|(symbol, _)| *symbol == c) {
            Some((_, fragment)) => output.push_str(fragment),
            None => output.push(c),
        }
    }
    output
}

fn wrap_scientific_notation(input: &str) -> String {
    SCIENTIFIC_NOTATION_RE
        .replace_all(input, |caps: &Captures| {
            format!("${{{}^{{{}}}}}$", &caps[1], &caps[2])
        })
        .into_owned()
}

fn wrap_simple_scripts(input: &str) -> String {
    let text = map_plain(input, |plain| wrap_in_math(&SUBSCRIPT_RE, plain));
    map_plain(&text, |plain| wrap_in_math(&SUPERSCRIPT_RE, plain))
}

fn wrap_braced_scripts(input: &str) -> String {
    let text = map_plain(input, |plain| wrap_in_math(&SUBSCRIPT_BRACE_RE, plain));
    map_plain(&text, |plain| wrap_in_math(&SUPERSCRIPT_BRACE_RE, plain))
}

fn wrap_in_math(re: &Regex, plain: &str) -> String {
    re.replace_all(plain, |caps: &Captures| format!("${}$", &caps[1]))
        .into_owned()
}

fn escape_structural(input: &str) -> String {
    map_plain(input, |plain| {
        let mut output = String::with_capacity(plain.len());
        for c in plain.chars() {
            if STRUCTURAL.contains(&c) {
                output.push('\\');
            }
            output.push(c);
        }
        output
    })
}

/// Doubles every backslash whose next character is not structural.
///
/// The next character is only looked at, never consumed, so runs of
/// backslashes are judged one by one. A trailing backslash is left alone.
fn escape_backslashes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(next)) if !STRUCTURAL.contains(next) => output.push_str(r"\\"),
            _ => output.push(c),
        }
    }
    output
}

fn join_math_spans(input: &str) -> String {
    JOIN_MATH_RE
        .replace_all(input, |caps: &Captures| caps[1].to_string())
        .into_owned()
}

fn unescape_math_braces(input: &str) -> String {
    map_math(input, |math| {
        let mut output = String::with_capacity(math.len());
        let mut chars = math.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' && matches!(chars.peek(), Some('{') | Some('}')) {
                continue;
            }
            output.push(c);
        }
        output
    })
}

/// A run of text either inside or outside a `$...$` math span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Plain(&'a str),
    /// Includes both `$` delimiters
    Math(&'a str),
}

/// Split text into plain and math segments.
///
/// A `$` preceded by a backslash is literal. An opening `$` without a closing
/// partner does not start a span.
fn segments(input: &str) -> Vec<Segment<'_>> {
    let bytes = input.as_bytes();
    let is_delimiter = |i: usize| bytes[i] == b'$' && (i == 0 || bytes[i - 1] != b'\\');

    let mut result = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !is_delimiter(i) {
            i += 1;
            continue;
        }
        let Some(close) = (i + 1..bytes.len()).find(|&j| is_delimiter(j)) else {
            break;
        };
        if plain_start < i {
            result.push(Segment::Plain(&input[plain_start..i]));
        }
        result.push(Segment::Math(&input[i..=close]));
        i = close + 1;
        plain_start = i;
    }
    if plain_start < input.len() {
        result.push(Segment::Plain(&input[plain_start..]));
    }
    result
}

fn map_plain(input: &str, f: impl Fn(&str) -> String) -> String {
    segments(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => f(text),
            Segment::Math(text) => text.to_string(),
        })
        .collect()
}

fn map_math(input: &str, f: impl Fn(&str) -> String) -> String {
    segments(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.to_string(),
            Segment::Math(text) => f(text),
        })
        .collect()
}
