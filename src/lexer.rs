//! ACM Filter 的词法分析器

use crate::error::LexError;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    /// 输入字符串中的当前位置（字节索引）
    position: usize,
    /// 已经产出 EOF token
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0, finished: false }
    }

    /// 返回当前位置的字符，不推进位置
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 返回下一个位置的字符，不推进位置
    fn peek_next(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    /// 推进位置一个字符并返回该字符
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    /// 跳过空白字符
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token::new(kind, &self.input[start..self.position], Span::new(start, self.position))
    }

    /// 读取数字字面量：`-?[0-9]+(\.[0-9]+)?`
    /// 注意：第一个字符（数字或负号）已经被调用者消费
    fn read_number(&mut self, start: usize) -> Token<'a> {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            self.bump(); // 消费 '.'
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        self.token(TokenKind::Value, start)
    }

    /// 读取单引号或双引号包围的字符串字面量，token 文本保留引号和转义
    /// 注意：开始的引号已经被调用者消费
    fn read_string(&mut self, start: usize, quote: char) -> Result<Token<'a>, LexError> {
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump(); // 转义字符原样保留
                }
                Some(c) if c == quote => return Ok(self.token(TokenKind::Value, start)),
                Some(_) => {}
                None => {
                    // 未闭合：从引号之后重新开始分词
                    self.position = start + quote.len_utf8();
                    log::trace!("unterminated string at {}", start);
                    return Err(LexError::unterminated(start, quote));
                }
            }
        }
    }

    /// 读取标识符或关键字
    /// 标识符为 `[A-Za-z_][A-Za-z0-9_]*`，只接受 ASCII
    fn read_identifier(&mut self, start: usize) -> Token<'a> {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let literal = &self.input[start..self.position];
        let kind = if is_logical_keyword(literal) {
            TokenKind::LogicalOp
        } else {
            TokenKind::Field
        };
        self.token(kind, start)
    }
}

fn is_logical_keyword(s: &str) -> bool {
    s.eq_ignore_ascii_case("and") || s.eq_ignore_ascii_case("or")
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_whitespace();
        let start = self.position;

        let Some(c) = self.bump() else {
            // 到达输入末尾
            self.finished = true;
            return Some(Ok(self.token(TokenKind::Eof, start)));
        };

        let result = match c {
            '(' => Ok(self.token(TokenKind::LParen, start)),
            ')' => Ok(self.token(TokenKind::RParen, start)),
            '=' => Ok(self.token(TokenKind::Operator, start)),
            '<' | '>' => {
                if self.peek() == Some('=') {
                    self.bump();
                }
                Ok(self.token(TokenKind::Operator, start))
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Ok(self.token(TokenKind::Operator, start))
                } else {
                    Err(LexError::new(start, c))
                }
            }
            '\'' | '"' => self.read_string(start, c),
            '-' if matches!(self.peek(), Some(d) if d.is_ascii_digit()) => Ok(self.read_number(start)),
            c if c.is_ascii_digit() => Ok(self.read_number(start)),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.read_identifier(start)),
            _ => Err(LexError::new(start, c)),
        };
        Some(result)
    }
}

/// 对一整行分词，分开返回 token 与词法错误。
/// 返回的 token 序列总以 EOF 结尾。
pub fn tokenize(input: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in Lexer::new(input) {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) => {
                log::debug!("lex error at {}: {}", e.position, e);
                errors.push(e);
            }
        }
    }
    (tokens, errors)
}
