//! S-expression document model and writer.
//!
//! KiCad stores schematics, boards and library tables as S-expressions.
//! The generators in [`crate::project`] build an in-memory [`Sexpr`] tree
//! and serialise it here instead of concatenating template strings, so each
//! generated document is testable as a pure function of its inputs.
//!
//! This module only writes. Parsing the KiCad formats back is out of scope.
//!
//! # Layout rules
//!
//! A list whose children are all atoms is rendered inline:
//!
//! ```text
//! (uuid "3b4f2e46-0c6e-4f7d-9b5a-1a2b3c4d5e6f")
//! ```
//!
//! A list with nested lists keeps its leading atoms on the head line and
//! puts every remaining child on its own line, indented by two spaces, with
//! the closing parenthesis back at the parent indent:
//!
//! ```text
//! (sheet_instances
//!   (path "/"
//!     (page "1")
//!   )
//! )
//! ```

use std::fmt::Write as _;

/// One node of an S-expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// Bare symbol, written without quotes (`signal`, `kicad_sch`).
    Symbol(String),
    /// Quoted string with KiCad escaping.
    Str(String),
    /// Integer atom.
    Int(i64),
    /// Floating point atom, written in shortest form (`1.6`, `0.05`).
    Float(f64),
    /// Parenthesised list of child nodes.
    List(Vec<Sexpr>),
}

impl Sexpr {
    /// Creates a bare symbol atom.
    pub fn sym(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    /// Creates a quoted string atom.
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Creates a list node.
    #[must_use]
    pub fn list(children: Vec<Self>) -> Self {
        Self::List(children)
    }

    /// Creates a list whose first child is the symbol `tag`.
    ///
    /// This is the common `(tag ...)` shape used throughout the KiCad
    /// formats.
    pub fn tagged(tag: &str, mut rest: Vec<Self>) -> Self {
        let mut children = Vec::with_capacity(rest.len() + 1);
        children.push(Self::sym(tag));
        children.append(&mut rest);
        Self::List(children)
    }

    /// Renders the tree as KiCad-style text, terminated by a newline.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, 0);
        out.push('\n');
        out
    }

    fn render(&self, out: &mut String, indent: usize) {
        match self {
            Self::Symbol(s) => out.push_str(s),
            Self::Str(s) => {
                out.push('"');
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        _ => out.push(c),
                    }
                }
                out.push('"');
            }
            Self::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Self::Float(v) => {
                // {} already prints the shortest round-trip form.
                let _ = write!(out, "{v}");
            }
            Self::List(children) => Self::render_list(children, out, indent),
        }
    }

    fn render_list(children: &[Self], out: &mut String, indent: usize) {
        let multiline = children.iter().any(|c| matches!(c, Self::List(_)));

        out.push('(');
        if !multiline {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                child.render(out, indent);
            }
            out.push(')');
            return;
        }

        // Leading atoms stay on the head line, everything after the first
        // nested list moves to its own line.
        let head_len = children
            .iter()
            .position(|c| matches!(c, Self::List(_)))
            .unwrap_or(children.len());

        for (i, child) in children[..head_len].iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            child.render(out, indent);
        }

        for child in &children[head_len..] {
            out.push('\n');
            for _ in 0..indent + 1 {
                out.push_str("  ");
            }
            child.render(out, indent + 1);
        }

        out.push('\n');
        for _ in 0..indent {
            out.push_str("  ");
        }
        out.push(')');
    }
}
