//! 商品类别
//!
//! 按商品名称中的关键词判断类别，关键词按固定优先级依次匹配

use std::cmp::Ordering;

/// 包装类商品（礼盒、袋子）的关键词，不参与任何类别统计
pub const PACKAGING_MARKERS: [&str; 2] = ["Коробка", "Пакет"];

/// 商品类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// 项链
    Necklace,
    /// 耳环
    Earrings,
    /// 手链
    Bracelet,
    /// 戒指
    Ring,
    /// 耳骨夹
    Cuff,
    /// 脚链
    Anklet,
    /// 颈链
    Choker,
    /// 其他
    Other,
}

impl Category {
    /// 匹配优先级，排在前面的关键词先命中
    pub const PRECEDENCE: [Category; 7] = [
        Category::Necklace,
        Category::Earrings,
        Category::Bracelet,
        Category::Ring,
        Category::Cuff,
        Category::Anklet,
        Category::Choker,
    ];

    /// 商品名称中的关键词；`Other` 没有关键词
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Category::Necklace => Some("Кольє"),
            Category::Earrings => Some("Сережки"),
            Category::Bracelet => Some("Браслет"),
            Category::Ring => Some("Каблучка"),
            Category::Cuff => Some("Кафф"),
            Category::Anklet => Some("Анклет"),
            Category::Choker => Some("Чокер"),
            Category::Other => None,
        }
    }

    /// 报表中使用的类别名称
    pub fn label(self) -> &'static str {
        match self {
            Category::Necklace => "Колье",
            Category::Earrings => "Серьги",
            Category::Bracelet => "Браслет",
            Category::Ring => "Кольцо",
            Category::Cuff => "Кафф",
            Category::Anklet => "Анклет",
            Category::Choker => "Чокер",
            Category::Other => "Другое",
        }
    }

    /// 根据商品名称判断类别，没有命中任何关键词时返回 `Other`
    pub fn classify(product_name: &str) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|category| {
                category
                    .marker()
                    .is_some_and(|marker| product_name.contains(marker))
            })
            .unwrap_or(Category::Other)
    }
}

/// 是否为包装类商品
pub fn is_packaging(product_name: &str) -> bool {
    PACKAGING_MARKERS
        .iter()
        .any(|marker| product_name.contains(marker))
}

// 报表按名称排序，排序规则与名称字符串一致
impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_marker() {
        assert_eq!(Category::classify("Кольє Серце"), Category::Necklace);
        assert_eq!(Category::classify("Сережки Зірка"), Category::Earrings);
        assert_eq!(Category::classify("Браслет Ланцюг"), Category::Bracelet);
        assert_eq!(Category::classify("Каблучка Мінімал"), Category::Ring);
        assert_eq!(Category::classify("Кафф Хвиля"), Category::Cuff);
        assert_eq!(Category::classify("Анклет Перли"), Category::Anklet);
        assert_eq!(Category::classify("Чокер Оксамит"), Category::Choker);
    }

    #[test]
    fn test_classify_unknown_is_other() {
        assert_eq!(Category::classify("Брошка Метелик"), Category::Other);
        assert_eq!(Category::classify(""), Category::Other);
    }

    #[test]
    fn test_precedence_ignores_position_in_name() {
        // 耳环关键词出现在前面，但项链优先级更高
        assert_eq!(Category::classify("Сережки + Кольє комплект"), Category::Necklace);
        assert_eq!(Category::classify("Чокер та Браслет"), Category::Bracelet);
        assert_eq!(Category::classify("Анклет Кафф"), Category::Cuff);
    }

    #[test]
    fn test_labels_sort_like_strings() {
        let mut categories = Category::PRECEDENCE.to_vec();
        categories.push(Category::Other);
        categories.sort();

        let mut labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        let sorted = labels.clone();
        labels.sort();
        assert_eq!(labels, sorted);
        assert_eq!(categories.first(), Some(&Category::Anklet));
        assert_eq!(categories.last(), Some(&Category::Choker));
    }

    #[test]
    fn test_packaging() {
        assert!(is_packaging("Коробка подарункова"));
        assert!(is_packaging("Пакет крафт"));
        assert!(!is_packaging("Кольє Серце"));
    }
}
