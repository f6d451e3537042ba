//! Values that can be looked up in the registry.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::error::GlanceError;
use glance_render::tabular::ValueKind;

/// A value with a type tag.
///
/// The tag selects the formatter; [`to_value`](Formattable::to_value)
/// provides the data the formatter renders.
pub trait Formattable {
    fn type_tag(&self) -> Cow<'_, str>;

    fn to_value(&self) -> Result<Value, GlanceError>;
}

/// JSON values are tagged by kind: `null`, `bool`, `number`, `string`,
/// `array` or `object`.
impl Formattable for Value {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(ValueKind::of(self).as_str())
    }

    fn to_value(&self) -> Result<Value, GlanceError> {
        Ok(self.clone())
    }
}

/// Pairs any serializable value with an explicit tag.
///
/// ```rust
/// use glance::{Formattable, Tagged};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { id: u32 }
///
/// let users = Tagged::new("users", vec![User { id: 1 }]);
/// assert_eq!(users.type_tag(), "users");
/// ```
#[derive(Clone, Debug)]
pub struct Tagged<T> {
    tag: String,
    value: T,
}

impl<T: Serialize> Tagged<T> {
    pub fn new(tag: impl Into<String>, value: T) -> Self {
        Tagged {
            tag: tag.into(),
            value,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Serialize> Formattable for Tagged<T> {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.tag)
    }

    fn to_value(&self) -> Result<Value, GlanceError> {
        Ok(serde_json::to_value(&self.value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_tag_by_kind() {
        assert_eq!(json!([1]).type_tag(), "array");
        assert_eq!(json!({"a": 1}).type_tag(), "object");
        assert_eq!(Value::Null.type_tag(), "null");
    }

    #[test]
    fn tagged_serializes_inner_value() {
        let tagged = Tagged::new("pair", (1, "one"));
        assert_eq!(tagged.to_value().unwrap(), json!([1, "one"]));
        assert_eq!(tagged.into_inner(), (1, "one"));
    }
}
