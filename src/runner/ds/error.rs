/// Errors surfaced to script code at a host call site.
#[derive(Debug, Clone, PartialEq)]
pub enum JErrorType {
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    SyntaxError(String),
}
impl JErrorType {
    pub fn message(&self) -> &str {
        match self {
            JErrorType::ReferenceError(m) => m,
            JErrorType::TypeError(m) => m,
            JErrorType::RangeError(m) => m,
            JErrorType::SyntaxError(m) => m,
        }
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, JErrorType::TypeError(_))
    }

    pub fn to_string(&self) -> String {
        match self {
            JErrorType::ReferenceError(m) => format!("Uncaught reference error: {}.", m),
            JErrorType::TypeError(m) => format!("Uncaught type error: {}.", m),
            JErrorType::RangeError(m) => format!("Uncaught range error: {}.", m),
            JErrorType::SyntaxError(m) => format!("Uncaught syntax error: {}.", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_rendering() {
        let err = JErrorType::TypeError("object is not enumerable".to_string());
        assert!(err.is_type_error());
        assert_eq!(err.message(), "object is not enumerable");
        assert_eq!(err.to_string(), "Uncaught type error: object is not enumerable.");
    }
}
