use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";

pub fn number_to_string(n: &JsNumberType) -> String {
    match n {
        JsNumberType::Integer(i) => i.to_string(),
        JsNumberType::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        JsNumberType::NaN => "NaN".to_string(),
        JsNumberType::PositiveInfinity => "Infinity".to_string(),
        JsNumberType::NegativeInfinity => "-Infinity".to_string(),
    }
}

/// Renders a value the way string concatenation in script would.
pub fn to_display_string(v: &JsValue) -> String {
    match v {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::String(s) => s.clone(),
        JsValue::Number(n) => number_to_string(n),
        JsValue::Object(o) => (**o).borrow().as_js_object().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::{ObjectType, SimpleObject};

    #[test]
    fn test_display_string_of_primitives() {
        assert_eq!(to_display_string(&JsValue::Undefined), "undefined");
        assert_eq!(to_display_string(&JsValue::Null), "null");
        assert_eq!(to_display_string(&JsValue::Boolean(true)), "true");
        assert_eq!(to_display_string(&JsValue::String("abc".to_string())), "abc");
        assert_eq!(
            to_display_string(&JsValue::Number(JsNumberType::Integer(42))),
            "42"
        );
        assert_eq!(
            to_display_string(&JsValue::Number(JsNumberType::Float(2.0))),
            "2"
        );
        assert_eq!(
            to_display_string(&JsValue::Number(JsNumberType::Float(1.5))),
            "1.5"
        );
    }

    #[test]
    fn test_display_string_of_object() {
        let obj = ObjectType::Ordinary(Box::new(SimpleObject::new())).into_handle();
        assert_eq!(to_display_string(&JsValue::Object(obj)), "[object Object]");
    }
}
