use std::fmt::Write;

use super::{GraphDocument, Term};

/// Renders the document as N-Triples, one statement per line.
pub fn to_ntriples(doc: &GraphDocument) -> String {
    let mut out = String::new();
    for triple in doc.triples() {
        let _ = writeln!(
            out,
            "<{}> <{}> {} .",
            escape_iri(&triple.s),
            escape_iri(&triple.p),
            render_term(&triple.o)
        );
    }
    out
}

fn render_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{}>", escape_iri(iri)),
        Term::Literal(lit) => {
            let mut rendered = format!("\"{}\"", escape_literal(&lit.value));
            if let Some(lang) = &lit.lang {
                rendered.push('@');
                rendered.push_str(lang);
            } else if let Some(datatype) = &lit.datatype {
                rendered.push_str("^^<");
                rendered.push_str(&escape_iri(datatype));
                rendered.push('>');
            }
            rendered
        }
    }
}

fn escape_literal(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn escape_iri(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | ' ' => {
                let _ = write!(escaped, "\\u{:04X}", ch as u32);
            }
            other => escaped.push(other),
        }
    }
    escaped
}
