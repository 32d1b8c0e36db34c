use crate::token::Span;
use serde::Serialize;
use std::fmt;

/// AST 的根节点, 代表一行完整的过滤表达式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub root: Expression,
}

/// 过滤表达式树
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// 逻辑运算 (AND / OR)，同一优先级，左结合
    Logical {
        op: LogicalOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// 使用括号分组的表达式
    Group(Box<Expression>),
    /// 基础比较运算, 这是表达式的叶子节点
    Comparison(Comparison),
    /// 语法错误恢复后留下的标记
    Malformed(Malformed),
}

impl Expression {
    pub fn logical(op: LogicalOp, left: Expression, right: Expression) -> Self {
        Expression::Logical { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn group(inner: Expression) -> Self {
        Expression::Group(Box::new(inner))
    }

    /// 树中是否含有错误标记
    pub fn is_partial(&self) -> bool {
        self.preorder().any(|expr| matches!(expr, Expression::Malformed(_)))
    }

    /// 前序遍历，按源码从左到右的顺序；使用显式栈，不受树深度影响
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// 不分配内存的占位节点，用于拆树
    fn placeholder() -> Self {
        Expression::Malformed(Malformed { span: Span::default(), field: None, salvaged: Vec::new() })
    }

    /// 把子节点移到 `out`，自身只留下浅层结构
    fn detach_children(&mut self, out: &mut Vec<Expression>) {
        match self {
            Expression::Logical { left, right, .. } => {
                out.push(std::mem::replace(left.as_mut(), Expression::placeholder()));
                out.push(std::mem::replace(right.as_mut(), Expression::placeholder()));
            }
            Expression::Group(inner) => {
                out.push(std::mem::replace(inner.as_mut(), Expression::placeholder()));
            }
            Expression::Malformed(marker) => out.append(&mut marker.salvaged),
            Expression::Comparison(_) => {}
        }
    }
}

// 一行里很长的 AND/OR 链会生成很深的左偏树，默认的递归析构会栈溢出
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// [`Expression::preorder`] 返回的迭代器
pub struct Preorder<'a> {
    stack: Vec<&'a Expression>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        match expr {
            Expression::Logical { left, right, .. } => {
                self.stack.push(right);
                self.stack.push(left);
            }
            Expression::Group(inner) => self.stack.push(inner),
            Expression::Malformed(marker) => self.stack.extend(marker.salvaged.iter().rev()),
            Expression::Comparison(_) => {}
        }
        Some(expr)
    }
}

/// 例如：`status = 'active'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub field: FieldRef,
    pub operator: CompareOp,
    pub value: ValueLit,
}

/// 被丢弃的 token 所在的位置，以及从中抢救出来的部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    pub span: Span,
    /// 比较式在字段名之后中断时保留的字段
    pub field: Option<FieldRef>,
    /// 错误前后已完整解析的子树，按源码顺序排列
    pub salvaged: Vec<Expression>,
}

/// 字段名，按原文比较
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef(pub String);

impl FieldRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 字面量原文，字符串保留引号
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueLit(pub String);

impl ValueLit {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_quoted(&self) -> bool {
        let s = self.0.as_str();
        s.len() >= 2
            && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')))
    }

    /// 去掉两侧引号并解析反斜杠转义；数字原样返回
    pub fn unquoted(&self) -> String {
        if !self.is_quoted() {
            return self.0.clone();
        }
        let inner = &self.0[1..self.0.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">=")]
    Gte,
}

impl CompareOp {
    pub fn from_text(s: &str) -> Option<Self> {
        match s {
            "=" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::NotEq),
            "<" => Some(CompareOp::Lt),
            ">" => Some(CompareOp::Gt),
            "<=" => Some(CompareOp::Lte),
            ">=" => Some(CompareOp::Gte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 逻辑运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// 关键字大小写不敏感
    pub fn from_text(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("and") {
            Some(LogicalOp::And)
        } else if s.eq_ignore_ascii_case("or") {
            Some(LogicalOp::Or)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted() {
        assert_eq!(ValueLit("'v1'".into()).unquoted(), "v1");
        assert_eq!(ValueLit("\"a b\"".into()).unquoted(), "a b");
        assert_eq!(ValueLit(r"'it\'s'".into()).unquoted(), "it's");
        assert_eq!(ValueLit("-3.5".into()).unquoted(), "-3.5");
        assert_eq!(ValueLit("'".into()).unquoted(), "'");
        assert!(!ValueLit("'mixed\"".into()).is_quoted());
    }

    #[test]
    fn test_operator_text() {
        for op in ["=", "!=", "<", ">", "<=", ">="] {
            assert_eq!(CompareOp::from_text(op).unwrap().as_str(), op);
        }
        assert_eq!(CompareOp::from_text("=="), None);
        assert_eq!(LogicalOp::from_text("oR"), Some(LogicalOp::Or));
    }

    #[test]
    fn test_is_partial() {
        let leaf = Expression::Comparison(Comparison {
            field: FieldRef("a".into()),
            operator: CompareOp::Eq,
            value: ValueLit("1".into()),
        });
        let bad = Expression::Malformed(Malformed { span: Span::empty(0), field: None, salvaged: vec![] });
        assert!(!Expression::group(leaf.clone()).is_partial());
        assert!(Expression::logical(LogicalOp::And, leaf, bad).is_partial());
    }

    #[test]
    fn test_deep_tree_preorder_and_drop() {
        let leaf = || {
            Expression::Comparison(Comparison {
                field: FieldRef("a".into()),
                operator: CompareOp::Eq,
                value: ValueLit("1".into()),
            })
        };
        let mut root = leaf();
        for _ in 0..100_000 {
            root = Expression::group(Expression::logical(LogicalOp::Or, root, leaf()));
        }
        assert_eq!(root.preorder().count(), 300_001);
        assert!(!root.is_partial());
        drop(root);
    }
}
