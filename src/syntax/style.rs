//! Token kind to style class mapping
//!
//! The mapping is a static table built at compile time from the groups in
//! `STYLE_GROUPS`. Kinds that appear in no group fall back to
//! `StyleClass::Default`, so classification is total.

use super::token::TokenKind;

/// Visual style classes for highlighted regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    DataType,
    Ddl,
    Dml,
    Keyword,
    Literal,
    Operator,
    Default,
}

impl StyleClass {
    pub const ALL: [StyleClass; 7] = [
        StyleClass::DataType,
        StyleClass::Ddl,
        StyleClass::Dml,
        StyleClass::Keyword,
        StyleClass::Literal,
        StyleClass::Operator,
        StyleClass::Default,
    ];

    /// Style tag as used by stylesheets
    pub fn tag(self) -> &'static str {
        match self {
            StyleClass::DataType => "data-type",
            StyleClass::Ddl => "ddl",
            StyleClass::Dml => "dml",
            StyleClass::Keyword => "keyword",
            StyleClass::Literal => "literal",
            StyleClass::Operator => "operator",
            StyleClass::Default => "default",
        }
    }
}

const STYLE_GROUPS: &[(StyleClass, &[TokenKind])] = &[
    (
        StyleClass::DataType,
        &[
            TokenKind::NumberDataType,
            TokenKind::BooleanDataType,
            TokenKind::DateDataType,
            TokenKind::StringDataType,
        ],
    ),
    (
        StyleClass::Ddl,
        &[TokenKind::Create, TokenKind::Drop, TokenKind::Use],
    ),
    (
        StyleClass::Dml,
        &[
            TokenKind::Select,
            TokenKind::Insert,
            TokenKind::Update,
            TokenKind::Delete,
        ],
    ),
    (
        StyleClass::Keyword,
        &[
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
            TokenKind::PipePipe,
            TokenKind::Show,
            TokenKind::Tables,
        ],
    ),
    (
        StyleClass::Literal,
        &[TokenKind::Number, TokenKind::String, TokenKind::Identifier],
    ),
    (
        StyleClass::Operator,
        &[
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Comma,
            TokenKind::Minus,
            TokenKind::Plus,
            TokenKind::Slash,
            TokenKind::Star,
            TokenKind::Semicolon,
            TokenKind::Mod,
            TokenKind::Div,
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
            TokenKind::BangEqual,
            TokenKind::Bang,
            TokenKind::EqualEqual,
            TokenKind::Equal,
            TokenKind::Percent,
            TokenKind::LessEqual,
            TokenKind::Less,
            TokenKind::GreaterEqual,
            TokenKind::Greater,
        ],
    ),
];

const fn build_style_table() -> [StyleClass; TokenKind::COUNT] {
    let mut table = [StyleClass::Default; TokenKind::COUNT];
    let mut group = 0;
    while group < STYLE_GROUPS.len() {
        let (class, kinds) = STYLE_GROUPS[group];
        let mut i = 0;
        while i < kinds.len() {
            table[kinds[i] as usize] = class;
            i += 1;
        }
        group += 1;
    }
    table
}

static STYLE_TABLE: [StyleClass; TokenKind::COUNT] = build_style_table();

/// Classify a token kind. Pure and total.
#[inline]
pub fn classify(kind: TokenKind) -> StyleClass {
    STYLE_TABLE[kind as usize]
}
