use super::category::Category;
use itertools::Itertools;
use std::collections::BTreeSet;

/// 类别组合：至少两个不同类别，按名称排序
///
/// 排序后比较，{Кольцо, Серьги} 与 {Серьги, Кольцо} 是同一个组合
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryCombo(Vec<Category>);

impl CategoryCombo {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let unique: BTreeSet<Category> = categories.into_iter().collect();
        Self(unique.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 报表中的组合名称，例如 `Колье + Серьги`
    pub fn label(&self) -> String {
        self.0.iter().map(|c| c.label()).join(" + ")
    }
}

impl std::fmt::Display for CategoryCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// 枚举所有大小在 `[min_size, max_size]` 内的子集
///
/// `max_size` 为 `None` 时以类别数为上限；类别数不足 `min_size` 时返回空
pub fn combinations_in_range(
    categories: &BTreeSet<Category>,
    min_size: usize,
    max_size: Option<usize>,
) -> Vec<CategoryCombo> {
    let upper = max_size
        .unwrap_or(categories.len())
        .min(categories.len());
    if categories.len() < min_size {
        return Vec::new();
    }

    (min_size..=upper)
        .flat_map(move |size| {
            categories
                .iter()
                .copied()
                .combinations(size)
                .map(CategoryCombo::new)
        })
        .collect()
}
