//! LaTeX-style symbol handling.
//!
//! Node labels are written as LaTeX-ish math symbols such as
//! `$\tilde{X}_{i,j}^2$`. Two views of a symbol are needed: a stable ASCII
//! identifier for referring to the node (`X_tilde_ij_sq`), and a display
//! string for the rendered label (`X̃_ij²`).

use crate::error::PlateauError;

/// Derives a stable ASCII identifier from a math symbol.
///
/// The derivation rules, in order:
/// - `$` delimiters and backslashes are stripped;
/// - a leading modifier command is folded behind its base:
///   `\tilde{X}_i` becomes `X_tilde_i`;
/// - braced subscripts lose their braces, commas, and spaces:
///   `X_{i, j}` becomes `X_ij`;
/// - a squared exponent becomes the suffix `_sq`: `\sigma_c^2` becomes
///   `sigma_c_sq`. Exponents other than 2 are rejected.
///
/// # Errors
///
/// Returns [`PlateauError::Symbol`] for unbalanced braces or an unsupported
/// exponent.
///
/// # Examples
///
/// ```
/// # use plateau::symbol::name_from_symbol;
/// assert_eq!(name_from_symbol(r"$\theta$").unwrap(), "theta");
/// assert_eq!(name_from_symbol(r"$X_{i, j}$").unwrap(), "X_ij");
/// ```
pub fn name_from_symbol(symbol: &str) -> Result<String, PlateauError> {
    let starts_with_modifier = symbol.starts_with("$\\");
    let mut name: String = symbol.trim_matches('$').replace('\\', "");

    if starts_with_modifier && name.contains('{') {
        name = fold_modifier(symbol, &name)?;
    }

    if let Some((head, rest)) = split_owned(&name, "_{") {
        let (subscript, tail) = rest.split_once('}').ok_or_else(|| {
            PlateauError::Symbol(format!("unclosed subscript brace in symbol `{symbol}`"))
        })?;
        let subscript: String = subscript
            .chars()
            .filter(|c| *c != ',' && *c != ' ')
            .collect();
        name = format!("{head}_{subscript}{tail}");
    }

    if let Some((base, exponent)) = split_owned(&name, "^") {
        if exponent != "2" {
            return Err(PlateauError::Symbol(format!(
                "unable to handle exponent `{exponent}` in symbol `{symbol}`; only ^2 is supported"
            )));
        }
        name = format!("{base}_sq");
    }

    Ok(name)
}

/// Rewrites `tilde{X}_rest` as `X_tilde_rest`.
fn fold_modifier(symbol: &str, stripped: &str) -> Result<String, PlateauError> {
    // The caller checked that an opening brace exists.
    let Some(start) = stripped.find('{') else {
        return Ok(stripped.to_string());
    };
    let end = stripped.find('}').ok_or_else(|| {
        PlateauError::Symbol(format!("unclosed modifier brace in symbol `{symbol}`"))
    })?;
    if end < start {
        return Err(PlateauError::Symbol(format!(
            "mismatched braces in symbol `{symbol}`"
        )));
    }

    let modifier = &stripped[..start];
    let without_modifier = format!("{}{}", &stripped[start + 1..end], &stripped[end + 1..]);

    Ok(match without_modifier.split_once('_') {
        Some((base, extras)) => format!("{base}_{modifier}_{extras}"),
        None => format!("{without_modifier}_{modifier}"),
    })
}

/// `split_once` returning owned halves, so the original can be reassigned.
fn split_owned(s: &str, pattern: &str) -> Option<(String, String)> {
    s.split_once(pattern)
        .map(|(a, b)| (a.to_string(), b.to_string()))
}

/// Commands mapped onto the character they decorate as a combining mark.
const MODIFIER_MARKS: [(&str, char); 3] = [
    ("\\tilde{", '\u{0303}'),
    ("\\hat{", '\u{0302}'),
    ("\\bar{", '\u{0304}'),
];

const GREEK: [(&str, &str); 31] = [
    ("\\alpha", "α"),
    ("\\beta", "β"),
    ("\\gamma", "γ"),
    ("\\delta", "δ"),
    ("\\epsilon", "ε"),
    ("\\zeta", "ζ"),
    ("\\theta", "θ"),
    ("\\eta", "η"),
    ("\\kappa", "κ"),
    ("\\lambda", "λ"),
    ("\\mu", "μ"),
    ("\\nu", "ν"),
    ("\\xi", "ξ"),
    ("\\pi", "π"),
    ("\\rho", "ρ"),
    ("\\sigma", "σ"),
    ("\\tau", "τ"),
    ("\\phi", "φ"),
    ("\\chi", "χ"),
    ("\\psi", "ψ"),
    ("\\omega", "ω"),
    ("\\Gamma", "Γ"),
    ("\\Delta", "Δ"),
    ("\\Theta", "Θ"),
    ("\\Lambda", "Λ"),
    ("\\Xi", "Ξ"),
    ("\\Pi", "Π"),
    ("\\Sigma", "Σ"),
    ("\\Phi", "Φ"),
    ("\\Psi", "Ψ"),
    ("\\Omega", "Ω"),
];

/// Produces a human-readable rendering of a symbol for SVG labels.
///
/// Best-effort plain-text math: Greek commands become Unicode letters,
/// `\tilde`/`\hat`/`\bar` become combining marks, `^2` becomes `²`, and
/// leftover braces and backslashes are dropped.
///
/// # Examples
///
/// ```
/// # use plateau::symbol::display_text;
/// assert_eq!(display_text(r"$\sigma^2$"), "σ²");
/// assert_eq!(display_text(r"$\tilde{X}_i$"), "X\u{303}_i");
/// ```
pub fn display_text(symbol: &str) -> String {
    let mut text = symbol.trim_matches('$').to_string();

    for (command, mark) in MODIFIER_MARKS {
        while let Some(start) = text.find(command) {
            let Some(close_rel) = text[start..].find('}') else {
                break;
            };
            let close = start + close_rel;
            let mut replacement = text[start + command.len()..close].to_string();
            replacement.push(mark);
            text.replace_range(start..=close, &replacement);
        }
    }

    for (command, letter) in GREEK {
        text = text.replace(command, letter);
    }

    text = text.replace("^2", "²");
    text.retain(|c| c != '{' && c != '}' && c != '\\');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_symbol() {
        let cases = [
            ("test", "test"),
            (r"$X$", "X"),
            (r"$\theta$", "theta"),
            (r"$\Sigma$", "Sigma"),
            (r"$\sigma_c", "sigma_c"),
            (r"$\sigma_c^2", "sigma_c_sq"),
            (r"$X_{i, j}", "X_ij"),
            (r"$\tilde{X}_i", "X_tilde_i"),
            (r"$\tilde{X}_{i,j}", "X_tilde_ij"),
            (r"$\tilde{X}_{i,j}^2", "X_tilde_ij_sq"),
        ];
        for (symbol, expected) in cases {
            assert_eq!(
                name_from_symbol(symbol).unwrap(),
                expected,
                "symbol: {symbol}"
            );
        }
    }

    #[test]
    fn test_name_from_symbol_modifier_without_subscript() {
        assert_eq!(name_from_symbol(r"$\tilde{X}$").unwrap(), "X_tilde");
    }

    #[test]
    fn test_name_from_symbol_rejects_other_exponents() {
        let err = name_from_symbol(r"$x^3$").unwrap_err();
        assert!(err.to_string().contains("exponent"));
    }

    #[test]
    fn test_name_from_symbol_rejects_unclosed_braces() {
        assert!(name_from_symbol(r"$\tilde{X_i$").is_err());
        assert!(name_from_symbol(r"$X_{i, j$").is_err());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(r"$\theta$"), "θ");
        assert_eq!(display_text(r"$\sigma_c^2$"), "σ_c²");
        assert_eq!(display_text(r"$\bar{y}$"), "y\u{304}");
        assert_eq!(display_text(r"$X_{i,j}$"), "X_i,j");
        assert_eq!(display_text("plain text"), "plain text");
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Subscripted symbols always flatten to identifier-safe names.
            #[test]
            fn subscripts_flatten(base in "[A-Za-z]{1,4}", sub in "[a-z]{1,3}(, ?[a-z]{1,3}){0,2}") {
                let symbol = format!("${base}_{{{sub}}}$");
                let name = name_from_symbol(&symbol).unwrap();
                prop_assert!(!name.contains(','));
                prop_assert!(!name.contains(' '));
                prop_assert!(!name.contains('{'), "name contains '{{': {name}");
                prop_assert!(!name.contains('}'), "name contains '}}': {name}");
                prop_assert!(name.starts_with(&base));
            }

            /// Display text never leaks control characters.
            #[test]
            fn display_has_no_markup(base in "[A-Za-z]{1,6}") {
                for symbol in [format!("${base}$"), format!("$\\tilde{{{base}}}$"), format!("${base}^2$")] {
                    let text = display_text(&symbol);
                    prop_assert!(!text.contains('$'));
                    prop_assert!(!text.contains('\\'));
                    prop_assert!(!text.contains('{'), "text contains '{{': {text}");
                }
            }
        }
    }
}
