use super::category::{is_packaging, Category};

/// 订单中的一行商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order_id: String,
    pub product_name: String,
    /// 标记列是否恰好等于追加销售标记
    pub is_upsell: bool,
}

impl OrderLine {
    pub fn new(order_id: impl Into<String>, product_name: impl Into<String>, is_upsell: bool) -> Self {
        Self {
            order_id: order_id.into(),
            product_name: product_name.into(),
            is_upsell,
        }
    }

    pub fn category(&self) -> Category {
        Category::classify(&self.product_name)
    }

    pub fn is_packaging(&self) -> bool {
        is_packaging(&self.product_name)
    }
}

/// 同一订单号下的全部商品行，保持文件中的出现顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: Vec::new(),
        }
    }

    /// 拆分为主商品和追加销售商品
    pub fn partition(&self) -> Partition<'_> {
        let (upsells, main): (Vec<_>, Vec<_>) =
            self.lines.iter().partition(|line| line.is_upsell);
        Partition { main, upsells }
    }
}

/// 订单拆分结果
///
/// 两个列表都包含包装类商品，统计类别时由各统计方式自行过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    pub main: Vec<&'a OrderLine>,
    pub upsells: Vec<&'a OrderLine>,
}

impl<'a> Partition<'a> {
    pub fn has_upsells(&self) -> bool {
        !self.upsells.is_empty()
    }

    /// 非包装类的主商品
    pub fn qualifying_main(&self) -> impl Iterator<Item = &'a OrderLine> + '_ {
        self.main.iter().copied().filter(|line| !line.is_packaging())
    }

    /// 非包装类的追加销售商品
    pub fn qualifying_upsells(&self) -> impl Iterator<Item = &'a OrderLine> + '_ {
        self.upsells.iter().copied().filter(|line| !line.is_packaging())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(lines: &[(&str, bool)]) -> Order {
        Order {
            id: "1001".to_string(),
            lines: lines
                .iter()
                .map(|(name, upsell)| OrderLine::new("1001", *name, *upsell))
                .collect(),
        }
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let order = order(&[
            ("Кольє Серце", false),
            ("Сережки Зірка", true),
            ("Коробка", false),
            ("Пакет", true),
            ("Браслет", false),
        ]);
        let partition = order.partition();

        assert_eq!(partition.main.len() + partition.upsells.len(), order.lines.len());
        assert!(partition.main.iter().all(|line| !line.is_upsell));
        assert!(partition.upsells.iter().all(|line| line.is_upsell));
        for line in &order.lines {
            let in_main = partition.main.contains(&line);
            let in_upsells = partition.upsells.contains(&line);
            assert!(in_main ^ in_upsells);
        }
    }

    #[test]
    fn test_qualifying_filters_packaging_on_both_sides() {
        let order = order(&[
            ("Кольє Серце", false),
            ("Коробка", false),
            ("Пакет", true),
            ("Сережки Зірка", true),
        ]);
        let partition = order.partition();

        let main: Vec<_> = partition.qualifying_main().map(|l| l.product_name.as_str()).collect();
        let upsells: Vec<_> = partition.qualifying_upsells().map(|l| l.product_name.as_str()).collect();
        assert_eq!(main, vec!["Кольє Серце"]);
        assert_eq!(upsells, vec!["Сережки Зірка"]);
        // 原始列表仍保留包装
        assert_eq!(partition.upsells.len(), 2);
    }
}
