//! Literal placeholder substitution for layout templates.
//!
//! Layouts are plain HTML containing `{{ Name }}` markers. Substitution is
//! exact-substring replacement: every occurrence of a bound marker is
//! replaced, unbound markers pass through verbatim, and there is no loop,
//! conditional, or escaping syntax.

/// Replaces every occurrence of each bound `{{ name }}` marker in
/// `template` with its value. Markers without a binding are left untouched,
/// so a template containing no bound markers comes back unchanged.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in bindings {
        out = out.replace(&format!("{{{{ {} }}}}", name), value);
    }
    out
}
