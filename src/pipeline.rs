//! 单行处理流程：词法分析 -> 语法分析 -> 提取

use crate::error::Diagnostic;
use crate::extract::{Condition, FieldValueWalker};
use crate::lexer::tokenize;
use crate::parser::Parser;
use serde::Serialize;

/// 一行过滤表达式的全部处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    /// 源文件中的行号，从 1 开始
    pub line_number: usize,
    pub filter: String,
    pub fields: Vec<String>,
    pub values: Vec<String>,
    pub conditions: Vec<Condition>,
    /// 词法错误与语法错误，按位置排序
    pub diagnostics: Vec<Diagnostic>,
}

impl LineReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// 每行使用新的词法分析器、解析器和遍历器，行与行之间没有共享状态
pub fn process_line(line_number: usize, line: &str) -> LineReport {
    let (tokens, lex_errors) = tokenize(line);

    let mut parser = Parser::new(&tokens);
    let filter = parser.parse();

    let mut walker = FieldValueWalker::new();
    walker.walk(&filter);
    let extraction = walker.into_extraction();

    let mut diagnostics: Vec<Diagnostic> = lex_errors.into_iter().map(Diagnostic::from).collect();
    diagnostics.extend(parser.into_errors().into_iter().map(Diagnostic::from));
    diagnostics.sort_by_key(Diagnostic::position);

    log::debug!(
        "line {}: {} field(s), {} value(s), {} diagnostic(s)",
        line_number,
        extraction.fields.len(),
        extraction.values.len(),
        diagnostics.len()
    );

    LineReport {
        line_number,
        filter: line.to_string(),
        fields: extraction.fields,
        values: extraction.values,
        conditions: extraction.conditions,
        diagnostics,
    }
}
