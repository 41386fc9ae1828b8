//! Common error message constants used throughout the runtime.

pub mod messages {
    pub const TYPE_ASSERTION_FAILED: &str = "Type assertion failed";
    pub const ASSERTION_FAILED: &str = "Assertion failed";
    pub const UNKNOWN_TYPE_SPEC: &str = "Unknown type spec";
    pub const UNBOUND_SLOT: &str = "Unbound slot";
    pub const UNBOUND_METHOD: &str = "Unbound method";
    pub const ABSTRACT_METHOD: &str =
        "Congratulations! You called an abstract method that nobody overrode";
    pub const DIVISION_BY_ZERO: &str = "Division by zero";
    pub const ODD_INITARGS: &str = "Odd number of slot initializers";
    pub const END_OF_FILE: &str = "End of file";
    pub const STREAM_ERROR: &str = "Stream error";
    pub const NOT_ON_CHAR_BOUNDARY: &str = "Stream position is inside a character";
    pub const MATCH_FAILED: &str = "Match failed";
    pub const PROMPT_NOT_FOUND: &str = "Prompt not found";
    pub const MALFORMED_NUMBER: &str = "Malformed number";
    pub const NOT_A_BUILTIN_OPERATOR: &str = "Not a built-in operator";
}
