use std::fmt;
use thiserror::Error;

/// BPSV field type definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpsvType {
    /// String field with size hint
    String(usize),
    /// Hexadecimal field with byte count
    Hex(usize),
    /// Decimal number field with digit count hint
    Dec(usize),
}

impl BpsvType {
    /// Parse a type specification like `STRING:0` or `HEX:16`.
    ///
    /// Type names are matched case-insensitively; the live version endpoints
    /// mix `STRING:0` and `String:0` within one header.
    pub fn parse(spec: &str) -> Result<Self, BpsvError> {
        let (type_name, size) = spec
            .split_once(':')
            .ok_or_else(|| BpsvError::InvalidTypeSpec(spec.to_string()))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| BpsvError::InvalidTypeSpec(spec.to_string()))?;

        match type_name.to_ascii_uppercase().as_str() {
            "STRING" => Ok(Self::String(size)),
            "HEX" => Ok(Self::Hex(size)),
            "DEC" => Ok(Self::Dec(size)),
            other => Err(BpsvError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for BpsvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(size) => write!(f, "STRING:{size}"),
            Self::Hex(size) => write!(f, "HEX:{size}"),
            Self::Dec(size) => write!(f, "DEC:{size}"),
        }
    }
}

/// BPSV field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpsvField {
    /// Field name as written in the header
    pub name: String,
    /// Field type with size hint
    pub field_type: BpsvType,
}

impl BpsvField {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: BpsvType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Parse a field specification like `BuildConfig!HEX:16`
    pub fn parse(spec: &str) -> Result<Self, BpsvError> {
        let (name, type_spec) = spec
            .split_once('!')
            .ok_or_else(|| BpsvError::InvalidFieldSpec(spec.to_string()))?;
        if name.is_empty() {
            return Err(BpsvError::InvalidFieldSpec(spec.to_string()));
        }

        Ok(Self::new(name, BpsvType::parse(type_spec)?))
    }
}

/// Typed BPSV cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BpsvValue {
    /// String value
    String(String),
    /// Hexadecimal bytes
    Hex(Vec<u8>),
    /// Decimal number
    Dec(i64),
    /// Empty cell
    Empty,
}

impl BpsvValue {
    /// Parse a cell according to its declared type
    pub fn parse(raw: &str, field_type: BpsvType) -> Result<Self, BpsvError> {
        if raw.is_empty() {
            return Ok(Self::Empty);
        }

        match field_type {
            BpsvType::String(_) => Ok(Self::String(raw.to_string())),
            BpsvType::Hex(_) => {
                if raw.len() % 2 != 0 {
                    return Err(BpsvError::InvalidHexLength(raw.to_string()));
                }
                hex::decode(raw)
                    .map(Self::Hex)
                    .map_err(|_| BpsvError::InvalidHexValue(raw.to_string()))
            }
            BpsvType::Dec(_) => raw
                .parse::<i64>()
                .map(Self::Dec)
                .map_err(|_| BpsvError::InvalidDecValue(raw.to_string())),
        }
    }

    /// Get the decimal value if this is a number
    #[must_use]
    pub fn as_dec(&self) -> Option<i64> {
        match self {
            Self::Dec(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for BpsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Hex(bytes) => write!(f, "{}", hex::encode(bytes)),
            Self::Dec(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

/// BPSV error types
#[derive(Debug, Error)]
pub enum BpsvError {
    /// Invalid type specification format
    #[error("Invalid type specification: {0}")]
    InvalidTypeSpec(String),

    /// Unknown field type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Invalid field specification format
    #[error("Invalid field specification: {0}")]
    InvalidFieldSpec(String),

    /// Invalid hexadecimal value
    #[error("Invalid hex value: {0}")]
    InvalidHexValue(String),

    /// Hexadecimal string has odd length
    #[error("Invalid hex length (must be even): {0}")]
    InvalidHexLength(String),

    /// Invalid decimal number value
    #[error("Invalid decimal value: {0}")]
    InvalidDecValue(String),

    /// Document has no content
    #[error("Empty document")]
    EmptyDocument,

    /// Header line is invalid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Row has wrong number of fields
    #[error("Field count mismatch on line {line}: expected {expected}, got {actual}")]
    FieldCountMismatch {
        /// 1-based line number in the document
        line: usize,
        /// Expected number of fields
        expected: usize,
        /// Actual number of fields
        actual: usize,
    },

    /// Invalid sequence number format
    #[error("Invalid sequence number: {0}")]
    InvalidSequenceNumber(String),

    /// Underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
