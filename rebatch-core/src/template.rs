use crate::error::{Error, Result};

/// A parsed pattern-mode template.
///
/// Templates interpolate named fields into the new filename:
/// `{name}` (original stem), `{ext}` (extension with its leading dot),
/// `{index}` (1-based position in the sorted listing) and `{counter}`
/// (separately incremented 1-based value). Integer fields accept a
/// zero-padding width spec, e.g. `{counter:03d}`. Literal braces are
/// written `{{` and `}}`.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Field { field: Field, width: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Ext,
    Index,
    Counter,
}

impl Field {
    fn is_integer(self) -> bool {
        matches!(self, Self::Index | Self::Counter)
    }
}

impl Template {
    /// Parse and validate a template string.
    ///
    /// Validation happens before any filesystem access, so a bad template
    /// fails the whole run without touching anything.
    pub fn parse(raw: &str) -> Result<Self> {
        let err = |reason: &str| Error::InvalidTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                },
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                },
                '}' => return Err(err("unmatched '}'")),
                '{' => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => placeholder.push(c),
                            None => return Err(err("unclosed '{'")),
                        }
                    }
                    parts.push(parse_placeholder(&placeholder, &err)?);
                },
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// The template source text, as supplied by the user.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Expand the template for one file.
    pub fn render(&self, name: &str, ext: &str, index: usize, counter: usize) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(s) => out.push_str(s),
                Part::Field { field, width } => {
                    match field {
                        Field::Name => out.push_str(name),
                        Field::Ext => out.push_str(ext),
                        Field::Index | Field::Counter => {
                            let value = if *field == Field::Index { index } else { counter };
                            match width {
                                Some(w) => out.push_str(&format!("{value:0w$}", w = *w)),
                                None => out.push_str(&value.to_string()),
                            }
                        },
                    };
                },
            }
        }
        out
    }
}

fn parse_placeholder(placeholder: &str, err: &impl Fn(&str) -> Error) -> Result<Part> {
    let (name, spec) = match placeholder.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (placeholder, None),
    };

    let field = match name {
        "name" => Field::Name,
        "ext" => Field::Ext,
        "index" => Field::Index,
        "counter" => Field::Counter,
        other => return Err(err(&format!("unknown field '{other}'"))),
    };

    let width = match spec {
        None | Some("") => None,
        Some(spec) => {
            // Only zero-padded integer widths like `03d` are supported, and
            // only on the integer fields.
            if !field.is_integer() {
                return Err(err(&format!(
                    "format spec '{spec}' is not valid for '{name}'"
                )));
            }
            let digits = spec
                .strip_suffix('d')
                .ok_or_else(|| err(&format!("malformed format spec '{spec}'")))?;
            if digits.is_empty() {
                None
            } else if digits.chars().all(|c| c.is_ascii_digit()) {
                Some(
                    digits
                        .parse()
                        .map_err(|_| err(&format!("malformed format spec '{spec}'")))?,
                )
            } else {
                return Err(err(&format!("malformed format spec '{spec}'")));
            }
        },
    };

    Ok(Part::Field { field, width })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_name_and_ext() {
        let t = Template::parse("{name}{ext}").unwrap();
        assert_eq!(t.render("report", ".txt", 1, 1), "report.txt");
    }

    #[test]
    fn renders_zero_padded_counter() {
        let t = Template::parse("file_{counter:03d}{ext}").unwrap();
        assert_eq!(t.render("x", ".jpg", 2, 2), "file_002.jpg");
        assert_eq!(t.render("x", ".jpg", 1234, 1234), "file_1234.jpg");
    }

    #[test]
    fn renders_plain_index() {
        let t = Template::parse("{index}_{name}{ext}").unwrap();
        assert_eq!(t.render("a", ".txt", 7, 7), "7_a.txt");
    }

    #[test]
    fn width_without_leading_zero() {
        let t = Template::parse("{index:4d}").unwrap();
        assert_eq!(t.render("", "", 12, 12), "0012");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let t = Template::parse("{{{name}}}").unwrap();
        assert_eq!(t.render("a", "", 1, 1), "{a}");
    }

    #[test]
    fn unknown_field_fails() {
        let e = Template::parse("{nope}").unwrap_err();
        assert!(matches!(e, Error::InvalidTemplate { .. }));
        assert!(e.to_string().contains("unknown field"));
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(Template::parse("file_{counter").is_err());
    }

    #[test]
    fn stray_closing_brace_fails() {
        assert!(Template::parse("file}").is_err());
    }

    #[test]
    fn spec_on_string_field_fails() {
        assert!(Template::parse("{name:03d}").is_err());
    }

    #[test]
    fn malformed_spec_fails() {
        assert!(Template::parse("{counter:3x}").is_err());
        assert!(Template::parse("{counter:d3}").is_err());
    }

    #[test]
    fn raw_round_trips() {
        let raw = "file_{counter:03d}{ext}";
        assert_eq!(Template::parse(raw).unwrap().raw(), raw);
    }
}
