//! 提取遍历器：收集过滤表达式引用的字段名和字面值，
//! 各自按首次出现的顺序去重

use crate::ast::{CompareOp, Comparison, Expression, Filter, Malformed};
use serde::Serialize;

/// 源码中的一个比较式，保留字段与值的对应关系
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: String,
    pub operator: CompareOp,
    pub value: String,
}

/// 遍历一棵树的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub fields: Vec<String>,
    pub values: Vec<String>,
    /// 所有比较式，按源码顺序，不去重
    pub conditions: Vec<Condition>,
}

/// 前序、从左到右遍历语法树
#[derive(Debug, Default)]
pub struct FieldValueWalker {
    extraction: Extraction,
}

impl FieldValueWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[String] {
        &self.extraction.fields
    }

    pub fn values(&self) -> &[String] {
        &self.extraction.values
    }

    pub fn walk(&mut self, filter: &Filter) {
        for expr in filter.root.preorder() {
            match expr {
                Expression::Comparison(cmp) => self.enter_comparison(cmp),
                Expression::Malformed(marker) => self.enter_malformed(marker),
                Expression::Logical { .. } | Expression::Group(_) => {}
            }
        }
    }

    pub fn into_extraction(self) -> Extraction {
        self.extraction
    }

    fn enter_comparison(&mut self, cmp: &Comparison) {
        push_unique(&mut self.extraction.fields, cmp.field.as_str());
        push_unique(&mut self.extraction.values, cmp.value.as_str());
        self.extraction.conditions.push(Condition {
            field: cmp.field.as_str().to_string(),
            operator: cmp.operator,
            value: cmp.value.as_str().to_string(),
        });
    }

    // 抢救出的子树由前序遍历随后访问
    fn enter_malformed(&mut self, marker: &Malformed) {
        if let Some(field) = &marker.field {
            push_unique(&mut self.extraction.fields, field.as_str());
        }
    }
}

// 线性查找，一行的内容很短
fn push_unique(list: &mut Vec<String>, text: &str) {
    if !list.iter().any(|existing| existing == text) {
        list.push(text.to_string());
    }
}

/// 用新的遍历器遍历 `filter`
pub fn extract(filter: &Filter) -> Extraction {
    let mut walker = FieldValueWalker::new();
    walker.walk(filter);
    walker.into_extraction()
}
