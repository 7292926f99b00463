//! Record declarations walked by the mapper.
//!
//! A [`Record`] exposes its fields in declaration order together with two
//! export directives: `csv` for direct header mapping and `relation` for
//! relation-table mapping. Most types get their implementation from the
//! [`record!`](crate::record!) macro:
//!
//! ```
//! csv_records::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Address {
//!         pub street: String [csv = "street", relation = "Street"],
//!         pub zip: String [csv = "zip"],
//!     }
//! }
//!
//! csv_records::record! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         pub name: String [csv = "name", relation = "Name"],
//!         pub age: u32,
//!         pub password: String [csv = "-"],
//!         pub address: Address [csv = "address", relation = "Address"],
//!     }
//! }
//!
//! let encoder = csv_records::Encoder::new::<User>().unwrap();
//! assert_eq!(encoder.header(), ["name", "age", "address.street", "address.zip"]);
//! ```
//!
//! Tag text follows the usual struct-tag conventions: `""` opts the field in
//! under its own name, `"-"` excludes it and anything else renames it.

use crate::value::{Kind, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// No directive given. Direct mapping uses the field name, relational
    /// mapping skips the field.
    Absent,
    /// Explicit opt-in under the field's own name.
    FieldName,
    Name(&'static str),
    /// Skipped in both directions, nested fields included.
    Exclude,
}

impl Directive {
    pub const fn from_tag(tag: &'static str) -> Self {
        let bytes = tag.as_bytes();
        if bytes.is_empty() {
            Directive::FieldName
        } else if bytes.len() == 1 && bytes[0] == b'-' {
            Directive::Exclude
        } else {
            Directive::Name(tag)
        }
    }
}

/// Declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub csv: Directive,
    pub relation: Directive,
}

impl Field {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            csv: Directive::Absent,
            relation: Directive::Absent,
        }
    }

    pub const fn csv(mut self, tag: &'static str) -> Self {
        self.csv = Directive::from_tag(tag);
        self
    }

    pub const fn relation(mut self, tag: &'static str) -> Self {
        self.relation = Directive::from_tag(tag);
        self
    }
}

pub enum FieldRef<'a> {
    Scalar(&'a dyn Scalar),
    Record(&'a dyn Record),
}

pub enum FieldMut<'a> {
    Scalar(&'a mut dyn Scalar),
    Record(&'a mut dyn Record),
}

/// A structure with named, ordered fields, possibly nesting other records.
///
/// `field` and `field_mut` must resolve every name listed by `fields`, and
/// the variant they return must agree with the declared [`Kind`].
pub trait Record {
    fn fields(&self) -> &'static [Field];

    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;
}

/// Types usable as a record field: scalars and nested records.
pub trait FieldType {
    const KIND: Kind;

    fn as_field(&self) -> FieldRef<'_>;

    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

/// Declares a struct and implements [`Record`] and [`FieldType`] for it.
///
/// Directives go in brackets after the field type; both keys are optional.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $([ $($key:ident = $tag:literal),* $(,)? ])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn fields(&self) -> &'static [$crate::Field] {
                const FIELDS: &[$crate::Field] = &[
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            kind: <$ty as $crate::FieldType>::KIND,
                            csv: $crate::__directive!(csv; $($($key = $tag),*)?),
                            relation: $crate::__directive!(relation; $($($key = $tag),*)?),
                        },
                    )*
                ];
                FIELDS
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::FieldRef<'_>> {
                $(
                    if name == stringify!($field) {
                        return ::core::option::Option::Some(
                            $crate::FieldType::as_field(&self.$field),
                        );
                    }
                )*
                ::core::option::Option::None
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<$crate::FieldMut<'_>> {
                $(
                    if name == stringify!($field) {
                        return ::core::option::Option::Some(
                            $crate::FieldType::as_field_mut(&mut self.$field),
                        );
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl $crate::FieldType for $name {
            const KIND: $crate::Kind = $crate::Kind::Record;

            fn as_field(&self) -> $crate::FieldRef<'_> {
                $crate::FieldRef::Record(self)
            }

            fn as_field_mut(&mut self) -> $crate::FieldMut<'_> {
                $crate::FieldMut::Record(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __directive {
    ($mode:ident;) => {
        $crate::Directive::Absent
    };
    (csv; csv = $tag:literal $(, $key:ident = $rest:literal)*) => {
        $crate::Directive::from_tag($tag)
    };
    (relation; relation = $tag:literal $(, $key:ident = $rest:literal)*) => {
        $crate::Directive::from_tag($tag)
    };
    ($mode:ident; csv = $tag:literal $(, $key:ident = $rest:literal)*) => {
        $crate::__directive!($mode; $($key = $rest),*)
    };
    ($mode:ident; relation = $tag:literal $(, $key:ident = $rest:literal)*) => {
        $crate::__directive!($mode; $($key = $rest),*)
    };
    ($mode:ident; $other:ident = $tag:literal $(, $key:ident = $rest:literal)*) => {
        ::core::compile_error!(concat!(
            "unknown record directive `",
            stringify!($other),
            "`, expected `csv` or `relation`"
        ))
    };
}
