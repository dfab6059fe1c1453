//! Parsing of validation annotations into instruction lists
//!
//! An annotation such as `"omitempty,gte=1,required_if=Mode strict"` is a
//! comma-separated list of `name` or `name=params` tokens. A backslash escapes
//! the next `,`, `=` or `\` so they can appear inside parameters
//! (`"oneof=a\,b c"`).
//!
//! Parsing never fails. A token that cannot be understood is kept as
//! [`Instruction::Malformed`] and only reported if the executor reaches it.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use smallvec::SmallVec;

/// Separates instructions.
pub const SEPARATOR: char = ',';
/// Separates a validator name from its parameters.
pub const ASSIGN: char = '=';
/// Escapes the next separator, assignment or escape character.
pub const ESCAPE: char = '\\';

/// One parsed annotation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Invoke validator `name` with the raw `params` string.
    Call {
        /// Registered validator name.
        name: String,
        /// Raw parameter string (empty when absent).
        params: String,
    },
    /// A token with more than one unescaped `=`, or parameters without a name.
    Malformed {
        /// The token as written, escapes resolved.
        raw: String,
    },
}

impl Instruction {
    /// Validator name, or `None` for malformed tokens.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Call { name, .. } => Some(name),
            Self::Malformed { .. } => None,
        }
    }

    /// Whether the token was malformed.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call { name, params } if params.is_empty() => f.write_str(name),
            Self::Call { name, params } => write!(f, "{name}={params}"),
            Self::Malformed { raw } => f.write_str(raw),
        }
    }
}

/// An immutable, ordered instruction list. Cheap to clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions(Arc<[Instruction]>);

impl Instructions {
    /// Parses an annotation string.
    pub fn parse(annotation: &str) -> Self {
        let mut out = Vec::new();
        // Segments of the current token, split on unescaped `=`.
        let mut segments: SmallVec<[String; 2]> = SmallVec::new();
        let mut current = String::new();
        let mut chars = annotation.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(next @ (SEPARATOR | ASSIGN | ESCAPE)) => current.push(next),
                    Some(other) => {
                        current.push(ESCAPE);
                        current.push(other);
                    }
                    None => current.push(ESCAPE),
                },
                ASSIGN => segments.push(std::mem::take(&mut current)),
                SEPARATOR => {
                    segments.push(std::mem::take(&mut current));
                    push_token(&mut out, std::mem::take(&mut segments));
                }
                _ => current.push(c),
            }
        }
        segments.push(current);
        push_token(&mut out, segments);

        Self(out.into())
    }

    /// Returns the instructions as a slice.
    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }
}

impl Deref for Instructions {
    type Target = [Instruction];

    fn deref(&self) -> &[Instruction] {
        &self.0
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

fn push_token(out: &mut Vec<Instruction>, segments: SmallVec<[String; 2]>) {
    match segments.as_slice() {
        [name] => {
            let name = name.trim();
            if !name.is_empty() {
                out.push(Instruction::Call {
                    name: name.to_owned(),
                    params: String::new(),
                });
            }
        }
        [name, params] if !name.trim().is_empty() => out.push(Instruction::Call {
            name: name.trim().to_owned(),
            params: params.clone(),
        }),
        _ => out.push(Instruction::Malformed {
            raw: segments.join("="),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, params: &str) -> Instruction {
        Instruction::Call {
            name: name.into(),
            params: params.into(),
        }
    }

    #[test]
    fn parses_names_and_params() {
        let parsed = Instructions::parse("required,gte=0,required_if=Mode strict");
        assert_eq!(
            parsed.as_slice(),
            &[
                call("required", ""),
                call("gte", "0"),
                call("required_if", "Mode strict"),
            ]
        );
    }

    #[test]
    fn empty_annotation_is_empty_list() {
        assert!(Instructions::parse("").is_empty());
        assert!(Instructions::parse(",,").is_empty());
    }

    #[test]
    fn escapes_separator_and_assign() {
        let parsed = Instructions::parse(r"oneof=a\,b c,eq=x\=y");
        assert_eq!(parsed.as_slice(), &[call("oneof", "a,b c"), call("eq", "x=y")]);
    }

    #[test]
    fn escaped_backslash_is_literal() {
        let parsed = Instructions::parse(r"match=C:\\dir");
        assert_eq!(parsed.as_slice(), &[call("match", r"C:\dir")]);
    }

    #[test]
    fn unknown_escape_is_kept_verbatim() {
        let parsed = Instructions::parse(r"match=\d+");
        assert_eq!(parsed.as_slice(), &[call("match", r"\d+")]);
    }

    #[test]
    fn extra_assign_is_malformed() {
        let parsed = Instructions::parse("skip,gte=1=2");
        assert_eq!(parsed.len(), 2);
        assert!(!parsed[0].is_malformed());
        assert_eq!(
            parsed[1],
            Instruction::Malformed {
                raw: "gte=1=2".into()
            }
        );
    }

    #[test]
    fn params_without_name_are_malformed() {
        let parsed = Instructions::parse("=5");
        assert!(parsed[0].is_malformed());
        assert_eq!(parsed[0].name(), None);
    }

    #[test]
    fn display_round_trips_simple_lists() {
        let parsed = Instructions::parse("dive, required");
        assert_eq!(parsed.to_string(), "dive,required");
    }
}
