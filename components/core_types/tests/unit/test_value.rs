//! Unit tests for Value enum

use core_types::{Function, JsError, PlainObject, Value};

#[cfg(test)]
mod value_creation_tests {
    use super::*;

    #[test]
    fn test_value_smi_bounds() {
        assert!(matches!(Value::Smi(i32::MAX), Value::Smi(i32::MAX)));
        assert!(matches!(Value::Smi(i32::MIN), Value::Smi(i32::MIN)));
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(7), Value::Smi(7));
        assert_eq!(Value::from(2.5), Value::Double(2.5));
        assert_eq!(Value::from("s"), Value::String("s".to_string()));
        assert_eq!(Value::from(String::from("s")), Value::from("s"));
        assert_eq!(
            Value::from(vec![Value::Smi(1)]),
            Value::List(vec![Value::Smi(1)])
        );
    }
}

#[cfg(test)]
mod value_is_truthy_tests {
    use super::*;

    #[test]
    fn test_double_negative_zero_is_falsy() {
        assert!(!Value::Double(-0.0).is_truthy());
    }

    #[test]
    fn test_empty_list_is_truthy() {
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn test_error_is_truthy() {
        assert!(Value::from(JsError::type_error("x")).is_truthy());
    }

    #[test]
    fn test_function_is_truthy() {
        assert!(Value::Function(Function::unary(Ok)).is_truthy());
    }
}

#[cfg(test)]
mod value_type_of_tests {
    use super::*;

    #[test]
    fn test_type_of_primitives() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Boolean(false).type_of(), "boolean");
        assert_eq!(Value::Smi(1).type_of(), "number");
        assert_eq!(Value::Double(1.0).type_of(), "number");
        assert_eq!(Value::from("").type_of(), "string");
    }

    #[test]
    fn test_type_of_objects() {
        assert_eq!(Value::Null.type_of(), "object");
        assert_eq!(Value::List(vec![]).type_of(), "object");
        assert_eq!(Value::from(PlainObject::new()).type_of(), "object");
    }
}

#[cfg(test)]
mod value_to_string_tests {
    use super::*;

    #[test]
    fn test_primitive_to_string() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Smi(-3).to_string(), "-3");
    }

    #[test]
    fn test_double_to_string() {
        assert_eq!(Value::Double(42.0).to_string(), "42");
        assert_eq!(Value::Double(0.1).to_string(), "0.1");
        assert_eq!(Value::Double(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Double(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_string_concatenation_style() {
        let reason = Value::from("boom");
        assert_eq!(format!("caught:{reason}"), "caught:boom");
    }

    #[test]
    fn test_nested_list_to_string() {
        let nested = Value::List(vec![
            Value::Smi(1),
            Value::List(vec![Value::Smi(2), Value::Smi(3)]),
        ]);
        assert_eq!(nested.to_string(), "1,2,3");
    }

    #[test]
    fn test_object_to_string() {
        assert_eq!(Value::from(PlainObject::new()).to_string(), "[object Object]");
    }
}

#[cfg(test)]
mod value_property_tests {
    use super::*;

    #[test]
    fn test_get_on_plain_object() {
        let value = Value::from(PlainObject::new().with_property("then", Value::Smi(5)));
        assert_eq!(value.get("then"), Ok(Value::Smi(5)));
    }

    #[test]
    fn test_as_function() {
        assert!(Value::Function(Function::unary(Ok)).as_function().is_some());
        assert!(Value::Smi(1).as_function().is_none());
    }
}
