//! Schema walking and path derivation.
//!
//! [`leaves()`] flattens a record type into the ordered list of its leaf
//! fields. Each [`Leaf`] carries the column path it maps to and the chain of
//! field names that reaches it, so header derivation and row transcoding share
//! a single walk. [`scalar()`] and [`scalar_mut()`] follow that chain on a live
//! record and fail with [`Error::SchemaMismatch`] when a name no longer
//! resolves.

use crate::{
    error::{Error, Result},
    record::{Directive, Field, FieldMut, FieldRef, Record},
    value::{Kind, Scalar},
};

/// How field directives turn into column paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Header names are dotted paths built from `csv` directives.
    Direct,
    /// Paths are space-joined `relation` directives, looked up in a relation
    /// table to find the header name.
    Relational,
}

impl Mode {
    pub const fn separator(self) -> &'static str {
        match self {
            Mode::Direct => ".",
            Mode::Relational => " ",
        }
    }

    pub fn directive(self, field: &Field) -> Directive {
        match self {
            Mode::Direct => field.csv,
            Mode::Relational => field.relation,
        }
    }

    /// Path segment contributed by `field`, or `None` when the field is skipped.
    pub fn segment(self, field: &Field) -> Option<&'static str> {
        match self.directive(field) {
            Directive::Exclude => None,
            Directive::Absent if self == Mode::Relational => None,
            Directive::Absent | Directive::FieldName => Some(field.name),
            Directive::Name(name) => Some(name),
        }
    }

    pub fn join(self, prefix: &str, segment: &str) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}{}{segment}", self.separator())
        }
    }
}

/// A scalar field reachable from the root record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub path: String,
    /// Field names from the root record down to this field.
    pub fields: Vec<&'static str>,
    pub kind: Kind,
}

impl Leaf {
    /// Name of the field itself.
    pub fn name(&self) -> &'static str {
        self.fields.last().copied().unwrap_or_default()
    }

    fn mismatch(&self, field: &str) -> Error {
        Error::SchemaMismatch {
            field: field.to_string(),
            path: self.path.clone(),
        }
    }
}

pub fn leaves(record: &dyn Record, mode: Mode) -> Result<Vec<Leaf>> {
    let mut out = Vec::new();
    let mut trail = Vec::new();
    walk(record, mode, "", &mut trail, &mut out)?;
    Ok(out)
}

pub fn paths(record: &dyn Record, mode: Mode) -> Result<Vec<String>> {
    Ok(leaves(record, mode)?
        .into_iter()
        .map(|leaf| leaf.path)
        .collect())
}

fn walk(
    record: &dyn Record,
    mode: Mode,
    prefix: &str,
    trail: &mut Vec<&'static str>,
    out: &mut Vec<Leaf>,
) -> Result<()> {
    for field in record.fields() {
        let Some(segment) = mode.segment(field) else {
            continue;
        };
        let path = mode.join(prefix, segment);
        trail.push(field.name);
        if field.kind == Kind::Record {
            let Some(FieldRef::Record(nested)) = record.field(field.name) else {
                return Err(Error::SchemaMismatch {
                    field: field.name.to_string(),
                    path,
                });
            };
            walk(nested, mode, &path, trail, out)?;
        } else {
            out.push(Leaf {
                path,
                fields: trail.clone(),
                kind: field.kind,
            });
        }
        trail.pop();
    }
    Ok(())
}

pub fn scalar<'a>(record: &'a dyn Record, leaf: &Leaf) -> Result<&'a dyn Scalar> {
    let Some((last, parents)) = leaf.fields.split_last() else {
        return Err(leaf.mismatch(""));
    };
    let mut current = record;
    for name in parents {
        current = match current.field(name) {
            Some(FieldRef::Record(nested)) => nested,
            _ => return Err(leaf.mismatch(name)),
        };
    }
    match current.field(last) {
        Some(FieldRef::Scalar(value)) => Ok(value),
        _ => Err(leaf.mismatch(last)),
    }
}

pub fn scalar_mut<'a>(record: &'a mut dyn Record, leaf: &Leaf) -> Result<&'a mut dyn Scalar> {
    let Some((last, parents)) = leaf.fields.split_last() else {
        return Err(leaf.mismatch(""));
    };
    let mut current = record;
    for name in parents {
        current = match current.field_mut(name) {
            Some(FieldMut::Record(nested)) => nested,
            _ => return Err(leaf.mismatch(name)),
        };
    }
    match current.field_mut(last) {
        Some(FieldMut::Scalar(value)) => Ok(value),
        _ => Err(leaf.mismatch(last)),
    }
}
