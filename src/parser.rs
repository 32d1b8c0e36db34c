//! ACM Filter 的语法分析器
//!
//! ## 解析流程图
//!
//! ```text
//! parse()
//!   └─ parse_expression()
//!        ├─ parse_term()
//!        │    ├─ "(" → 分组表达式 (递归调用 parse_expression)，期望 ")"
//!        │    └─ 其他 → parse_comparison()
//!        │                 ├─ 字段名 (FIELD)
//!        │                 ├─ 比较运算符 (OPERATOR)
//!        │                 └─ 字面值 (VALUE)
//!        │
//!        ├─ 遇到 AND / OR 时，继续解析右侧 term (左结合)
//!        └─ 遇到其他 token → 记录错误，同步到下一个 AND/OR、"(" 或行尾
//! ```
//!
//! ## 语法
//!
//! ```text
//! filter      := expression EOF
//! expression  := term (LOGICAL_OP term)*
//! term        := LPAREN expression RPAREN | comparison
//! comparison  := FIELD OPERATOR VALUE
//! ```
//!
//! AND 与 OR 优先级相同，按书写顺序从左到右结合；括号可以改变结合顺序，
//! 但不改变 token 顺序。
//!
//! ## 错误恢复
//!
//! 遇到不符合语法的 token 时记录 [`SyntaxError`]，丢弃 token 直到下一个
//! LOGICAL_OP、LPAREN 或 EOF（在括号内部也会停在 RPAREN），然后回到
//! expression 层继续解析。出错的位置在树中留下 [`Expression::Malformed`]
//! 标记，已经完整解析的子树保存在标记里，所以树总是完整可遍历的。
//!
//! ## 解析示例
//!
//! ```text
//! // 简单比较
//! status = 'active'
//!
//! // 左结合: ((a = 1 AND b = 2) OR c = 3)
//! a = 1 AND b = 2 OR c = 3
//!
//! // 分组
//! (role = 'admin' OR role = 'owner') AND tenant_id = 42
//! ```

use crate::ast::{CompareOp, Comparison, Expression, FieldRef, Filter, LogicalOp, Malformed, ValueLit};
use crate::error::SyntaxError;
use crate::token::{Span, Token, TokenKind};

/// 括号最大嵌套层数，超出的分组整体丢弃并记录错误
pub const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    position: usize,
    /// 当前所在的括号层数
    depth: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// 返回当前 token，不推进位置。越过末尾时视为 EOF
    fn peek(&self) -> Token<'a> {
        match self.tokens.get(self.position) {
            Some(token) => *token,
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                Token::new(TokenKind::Eof, "", Span::empty(end))
            }
        }
    }

    /// 返回当前 token 并推进位置，EOF 不会被消费
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn error(&mut self, expected: impl Into<String>, found: Token<'a>) {
        let err = SyntaxError::new(found.position(), expected, found.describe());
        log::debug!("syntax error at {}: {}", err.position, err);
        self.errors.push(err);
    }

    /// 期望特定类型的 token 并推进，否则记录错误
    fn expect(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        let token = self.peek();
        if token.kind == kind {
            Some(self.advance())
        } else {
            self.error(kind.to_string(), token);
            None
        }
    }

    /// 解析整行，总是返回一棵树；错误通过 [`Parser::errors`] 获取
    pub fn parse(&mut self) -> Filter {
        let root = self.parse_expression();
        Filter { root }
    }

    /// 与 [`Parser::parse`] 相同，但遇到任何语法错误时返回第一个错误
    pub fn parse_strict(&mut self) -> Result<Filter, SyntaxError> {
        let filter = self.parse();
        match self.errors.first() {
            Some(err) => Err(err.clone()),
            None => Ok(filter),
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    /// 语法: `term (LOGICAL_OP term)*`
    ///
    /// 顶层只在 EOF 处返回；括号内部在 ")" 或 EOF 处返回
    fn parse_expression(&mut self) -> Expression {
        let mut left = self.parse_term();

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::LogicalOp => {
                    self.advance(); // 消费 AND / OR
                    let op = logical_op(token);
                    let right = self.parse_term();
                    left = Expression::logical(op, left, right);
                }
                TokenKind::Eof => break,
                TokenKind::RParen if self.depth > 0 => break,
                _ => {
                    let expected = if self.depth > 0 {
                        "logical operator or ')'"
                    } else {
                        "logical operator or end of input"
                    };
                    self.error(expected, token);
                    left = self.recover(None, vec![left]);
                }
            }
        }

        left
    }

    /// 语法: `LPAREN expression RPAREN | comparison`
    fn parse_term(&mut self) -> Expression {
        let opening = self.peek();
        if opening.kind != TokenKind::LParen {
            return self.parse_comparison();
        }
        if self.depth >= MAX_DEPTH {
            self.error("shallower nesting", opening);
            let span = self.skip_group();
            return Expression::Malformed(Malformed { span, field: None, salvaged: Vec::new() });
        }

        self.advance(); // 消费 (
        self.depth += 1;
        let inner = self.parse_expression();
        self.depth -= 1;

        // 缺少 ")" 时保留分组，只记录错误
        let closing = self.peek();
        if closing.kind == TokenKind::RParen {
            self.advance();
        } else {
            self.error(TokenKind::RParen.to_string(), closing);
        }
        Expression::group(inner)
    }

    /// 语法: `FIELD OPERATOR VALUE`
    fn parse_comparison(&mut self) -> Expression {
        let Some(field) = self.expect(TokenKind::Field) else {
            return self.recover(None, Vec::new());
        };
        let field = FieldRef(field.text.to_string());

        let Some(operator) = self.parse_compare_op() else {
            return self.recover(Some(field), Vec::new());
        };

        let Some(value) = self.expect(TokenKind::Value) else {
            return self.recover(Some(field), Vec::new());
        };

        Expression::Comparison(Comparison {
            field,
            operator,
            value: ValueLit(value.text.to_string()),
        })
    }

    fn parse_compare_op(&mut self) -> Option<CompareOp> {
        let token = self.peek();
        let op = match token.kind {
            TokenKind::Operator => CompareOp::from_text(token.text),
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                Some(op)
            }
            None => {
                self.error(TokenKind::Operator.to_string(), token);
                None
            }
        }
    }

    /// 丢弃 token 直到同步点，并生成错误标记。
    /// 如果停在 "(" 上，继续解析这个分组并把它保存进标记
    fn recover(&mut self, field: Option<FieldRef>, mut salvaged: Vec<Expression>) -> Expression {
        let span = self.synchronize();
        if self.peek().kind == TokenKind::LParen {
            salvaged.push(self.parse_term());
        }
        Expression::Malformed(Malformed { span, field, salvaged })
    }

    /// 返回被丢弃的 token 覆盖的范围
    fn synchronize(&mut self) -> Span {
        let mut span = Span::empty(self.peek().position());
        let mut skipped = 0;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::LogicalOp | TokenKind::LParen | TokenKind::Eof => break,
                TokenKind::RParen if self.depth > 0 => break,
                _ => {
                    self.advance();
                    span = span.to(token.span);
                    skipped += 1;
                }
            }
        }
        log::trace!("synchronized after skipping {} token(s) at {}..{}", skipped, span.start, span.end);
        span
    }

    /// 从 "(" 开始丢弃整个分组，直到与之匹配的 ")"（含）或 EOF
    fn skip_group(&mut self) -> Span {
        let mut span = Span::empty(self.peek().position());
        let mut open = 0usize;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::LParen => open += 1,
                TokenKind::RParen => open = open.saturating_sub(1),
                _ => {}
            }
            self.advance();
            span = span.to(token.span);
            if open == 0 {
                break;
            }
        }
        log::debug!("skipped over-nested group at {}..{}", span.start, span.end);
        span
    }
}

fn logical_op(token: Token<'_>) -> LogicalOp {
    let op = LogicalOp::from_text(token.text);
    // 词法分析器只对 and/or 产出 LOGICAL_OP
    debug_assert!(op.is_some(), "LOGICAL_OP token with text {:?}", token.text);
    op.unwrap_or(LogicalOp::And)
}
