//! ACM Filter 语言的 token 定义

use std::fmt;

/// token 是语言的最小单元，带有类型、源码原文和位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// token 起始的字节偏移
    pub fn position(&self) -> usize {
        self.span.start
    }

    /// 语法错误中使用的描述，例如 `'AND'` 或 `end of input`
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// token 的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Field,     // 标识符
    Value,     // 带引号的字符串或数字，保留引号
    Operator,  // = != < > <= >=
    LogicalOp, // AND / OR，大小写不敏感
    LParen,    // (
    RParen,    // )
    Eof,       // 行尾
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Field => "field name",
            TokenKind::Value => "value",
            TokenKind::Operator => "comparison operator",
            TokenKind::LogicalOp => "logical operator",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// 源码中的一段范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// 起始字节偏移
    pub start: usize,
    /// 结束字节偏移
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 位于 `at` 的零宽范围
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// 同时覆盖 `self` 与 `other` 的最小范围
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}
