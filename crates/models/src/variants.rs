use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{
        self, IntoDeserializer, MapAccess, SeqAccess, Visitor,
        value::{BorrowedStrDeserializer, MapAccessDeserializer},
    },
};
use std::{
    fmt::{Formatter, Result as FmtResult},
    marker::PhantomData,
    slice::Iter,
};

/// How a [`Variants`] field was written on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// A bare value
    Scalar,
    /// A list of values, possibly of length one
    List,
}

/// A course field that is either a single value or an ordered list with one
/// entry per course variant.
///
/// Values are always held as a sequence. The original wire shape is kept
/// next to them so a bare scalar serializes back as a bare scalar and a
/// one-element list stays a list. Equality compares the shape too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variants<T> {
    values: Vec<T>,
    shape: Shape,
}

impl<T> Variants<T> {
    /// A bare scalar value
    pub fn single(value: T) -> Self {
        Self {
            values: vec![value],
            shape: Shape::Scalar,
        }
    }

    /// A list of values, kept as a list even if it holds only one entry
    pub fn many(values: Vec<T>) -> Self {
        Self {
            values,
            shape: Shape::List,
        }
    }

    /// A scalar if `values` has exactly one entry, a list otherwise
    pub(crate) fn collapse(mut values: Vec<T>) -> Self {
        match values.pop() {
            Some(value) if values.is_empty() => Self::single(value),
            Some(value) => {
                values.push(value);
                Self::many(values)
            }
            None => Self::many(values),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_scalar(&self) -> bool {
        self.shape == Shape::Scalar
    }

    /// Whether this field describes more than one variant
    pub fn is_multi(&self) -> bool {
        self.values.len() > 1
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// The value describing variant `index`.
    /// A scalar applies to every variant, a list is indexed.
    pub fn resolve(&self, index: usize) -> Option<&T> {
        match self.shape {
            Shape::Scalar => self.values.first(),
            Shape::List => self.values.get(index),
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Converts every value, keeping the shape
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Variants<U> {
        Variants {
            values: self.values.into_iter().map(f).collect(),
            shape: self.shape,
        }
    }
}

impl From<String> for Variants<String> {
    fn from(value: String) -> Self {
        Self::single(value)
    }
}

impl From<Vec<String>> for Variants<String> {
    fn from(values: Vec<String>) -> Self {
        Self::many(values)
    }
}

impl From<&str> for Variants<String> {
    fn from(value: &str) -> Self {
        Self::single(value.to_string())
    }
}

impl From<Vec<&str>> for Variants<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::many(values.into_iter().map(str::to_string).collect())
    }
}

impl<'a, T> IntoIterator for &'a Variants<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: Serialize> Serialize for Variants<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.shape, self.values.as_slice()) {
            (Shape::Scalar, [value]) => value.serialize(serializer),
            (_, values) => values.serialize(serializer),
        }
    }
}

/// Reads a bare value as [`Shape::Scalar`] and a sequence as [`Shape::List`],
/// handing the inner value straight to `T` so its own error comes through
struct VariantsVisitor<T>(PhantomData<T>);

fn scalar<'de, T, D>(deserializer: D) -> Result<Variants<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Variants::single)
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for VariantsVisitor<T> {
    type Value = Variants<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "a value or a list of values")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_borrowed_str<E: de::Error>(self, value: &'de str) -> Result<Self::Value, E> {
        scalar(BorrowedStrDeserializer::new(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        scalar(value.into_deserializer())
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        scalar(MapAccessDeserializer::new(map))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(64));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(Variants::many(values))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Variants<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(VariantsVisitor(PhantomData))
    }
}
