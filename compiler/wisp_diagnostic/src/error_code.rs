use std::fmt;

/// Error codes for all Wisp diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: lexer errors
/// - E1xxx: parser errors
/// - E2xxx: runtime errors
/// - E9xxx: internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Unterminated block comment
    E0003,
    /// Invalid number literal
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Invalid assignment target
    E1005,
    /// Invalid function definition
    E1006,
    /// Invalid class body
    E1007,
    /// Invalid `super` expression
    E1008,
    /// Missing statement terminator
    E1009,
    /// `break`/`continue` outside a loop
    E1010,

    // Runtime Errors (E2xxx)
    /// Operand type mismatch
    E2001,
    /// Undefined variable
    E2002,
    /// Argument count mismatch
    E2003,
    /// Division or modulo by zero
    E2004,
    /// Index out of bounds
    E2005,
    /// Value is not callable
    E2006,
    /// Undefined property
    E2007,
    /// Invalid class definition
    E2008,
    /// Assignment to a constant
    E2009,
    /// Resource limit exceeded
    E2010,
    /// `this`/`super` outside a method
    E2011,
    /// Integer overflow
    E2012,
    /// Unusable hash key
    E2013,
    /// Runtime error raised by a builtin
    E2099,

    // Internal Errors (E9xxx)
    /// Internal interpreter error
    E9001,
}

impl ErrorCode {
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2099 => "E2099",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "unterminated block comment",
            ErrorCode::E0004 => "invalid number literal",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "invalid assignment target",
            ErrorCode::E1006 => "invalid function definition",
            ErrorCode::E1007 => "invalid class body",
            ErrorCode::E1008 => "invalid `super` expression",
            ErrorCode::E1009 => "missing statement terminator",
            ErrorCode::E1010 => "loop control outside of a loop",
            ErrorCode::E2001 => "operand type mismatch",
            ErrorCode::E2002 => "undefined variable",
            ErrorCode::E2003 => "wrong number of arguments",
            ErrorCode::E2004 => "division by zero",
            ErrorCode::E2005 => "index out of bounds",
            ErrorCode::E2006 => "value is not callable",
            ErrorCode::E2007 => "undefined property",
            ErrorCode::E2008 => "invalid class definition",
            ErrorCode::E2009 => "assignment to a constant",
            ErrorCode::E2010 => "resource limit exceeded",
            ErrorCode::E2011 => "`this` or `super` outside of a method",
            ErrorCode::E2012 => "integer overflow",
            ErrorCode::E2013 => "unusable hash key",
            ErrorCode::E2099 => "runtime error",
            ErrorCode::E9001 => "internal interpreter error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
