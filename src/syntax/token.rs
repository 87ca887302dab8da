//! Token types produced by the tokenizer
//!
//! A token is a classified lexical unit with a half-open byte range into
//! the scanned text. Tokenizers emit tokens left to right without overlap.

use std::fmt;
use std::ops::Range;

/// Lexical token kinds recognized by the SQL scratchpad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Data types
    NumberDataType,
    BooleanDataType,
    DateDataType,
    StringDataType,

    // Schema definition
    Create,
    Drop,
    Use,

    // Data manipulation
    Select,
    Insert,
    Update,
    Delete,

    // Clause and logical keywords
    Where,
    From,
    Order,
    By,
    Limit,
    Values,
    Into,
    And,
    Or,
    Not,
    Null,
    True,
    False,
    Primary,
    Key,
    Database,
    Table,
    Asc,
    Desc,
    Set,
    Unique,
    As,
    Group,
    Is,
    Show,
    Tables,

    // Literals
    Number,
    String,
    Identifier,

    // Built-in functions
    Ucase,
    Lcase,
    Capitalize,
    Floor,
    Round,
    Rand,
    Count,
    Distinct,
    Min,
    Max,
    Sum,
    Avg,
    Ceil,
    Mod,
    Div,

    // Punctuation and operators
    LeftParen,
    RightParen,
    Comma,
    Dot,
    Minus,
    Plus,
    Slash,
    Star,
    Semicolon,
    Percent,
    PipePipe,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl TokenKind {
    /// Every kind, in declaration order. `ALL[k as usize] == k`.
    pub const ALL: [TokenKind; 74] = [
        TokenKind::NumberDataType,
        TokenKind::BooleanDataType,
        TokenKind::DateDataType,
        TokenKind::StringDataType,
        TokenKind::Create,
        TokenKind::Drop,
        TokenKind::Use,
        TokenKind::Select,
        TokenKind::Insert,
        TokenKind::Update,
        TokenKind::Delete,
        TokenKind::Where,
        TokenKind::From,
        TokenKind::Order,
        TokenKind::By,
        TokenKind::Limit,
        TokenKind::Values,
        TokenKind::Into,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::Null,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Primary,
        TokenKind::Key,
        TokenKind::Database,
        TokenKind::Table,
        TokenKind::Asc,
        TokenKind::Desc,
        TokenKind::Set,
        TokenKind::Unique,
        TokenKind::As,
        TokenKind::Group,
        TokenKind::Is,
        TokenKind::Show,
        TokenKind::Tables,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Identifier,
        TokenKind::Ucase,
        TokenKind::Lcase,
        TokenKind::Capitalize,
        TokenKind::Floor,
        TokenKind::Round,
        TokenKind::Rand,
        TokenKind::Count,
        TokenKind::Distinct,
        TokenKind::Min,
        TokenKind::Max,
        TokenKind::Sum,
        TokenKind::Avg,
        TokenKind::Ceil,
        TokenKind::Mod,
        TokenKind::Div,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Slash,
        TokenKind::Star,
        TokenKind::Semicolon,
        TokenKind::Percent,
        TokenKind::PipePipe,
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Look up a reserved word (case-insensitive)
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "NUMBER" | "INT" | "INTEGER" | "FLOAT" | "DOUBLE" | "DECIMAL" => {
                TokenKind::NumberDataType
            }
            "BOOLEAN" | "BOOL" => TokenKind::BooleanDataType,
            "DATE" => TokenKind::DateDataType,
            "STRING" | "VARCHAR" | "CHAR" | "TEXT" => TokenKind::StringDataType,
            "CREATE" => TokenKind::Create,
            "DROP" => TokenKind::Drop,
            "USE" => TokenKind::Use,
            "SELECT" => TokenKind::Select,
            "INSERT" => TokenKind::Insert,
            "UPDATE" => TokenKind::Update,
            "DELETE" => TokenKind::Delete,
            "WHERE" => TokenKind::Where,
            "FROM" => TokenKind::From,
            "ORDER" => TokenKind::Order,
            "BY" => TokenKind::By,
            "LIMIT" => TokenKind::Limit,
            "VALUES" => TokenKind::Values,
            "INTO" => TokenKind::Into,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "NULL" => TokenKind::Null,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            "PRIMARY" => TokenKind::Primary,
            "KEY" => TokenKind::Key,
            "DATABASE" => TokenKind::Database,
            "TABLE" => TokenKind::Table,
            "ASC" => TokenKind::Asc,
            "DESC" => TokenKind::Desc,
            "SET" => TokenKind::Set,
            "UNIQUE" => TokenKind::Unique,
            "AS" => TokenKind::As,
            "GROUP" => TokenKind::Group,
            "IS" => TokenKind::Is,
            "SHOW" => TokenKind::Show,
            "TABLES" => TokenKind::Tables,
            "UCASE" => TokenKind::Ucase,
            "LCASE" => TokenKind::Lcase,
            "CAPITALIZE" => TokenKind::Capitalize,
            "FLOOR" => TokenKind::Floor,
            "ROUND" => TokenKind::Round,
            "RAND" => TokenKind::Rand,
            "COUNT" => TokenKind::Count,
            "DISTINCT" => TokenKind::Distinct,
            "MIN" => TokenKind::Min,
            "MAX" => TokenKind::Max,
            "SUM" => TokenKind::Sum,
            "AVG" => TokenKind::Avg,
            "CEIL" => TokenKind::Ceil,
            "MOD" => TokenKind::Mod,
            "DIV" => TokenKind::Div,
            _ => return None,
        };
        Some(kind)
    }
}

/// A classified lexical unit over `[start, end)` of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token range must not be reversed");
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The tokenizer rejected its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationError {
    /// Human-readable message shown as transient feedback
    pub message: String,
    /// Byte offset the failure was detected at
    pub offset: usize,
}

impl ClassificationError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClassificationError {}

/// Turns text into an ordered, non-overlapping token sequence
///
/// Implementations must be pure: the same text always yields the same
/// result, and no state is shared between calls.
pub trait Tokenizer: Send + Sync {
    fn scan(&self, text: &str) -> Result<Vec<Token>, ClassificationError>;
}
