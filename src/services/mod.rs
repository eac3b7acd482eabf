//! 统计层
//!
//! 四种统计方式共用同一份加载好的订单数据，每种方式实现 [`Analyzer`]：
//!
//! - `products` - 按主商品统计追加销售 ([`ProductUpsellAnalyzer`])
//! - `categories` - 主商品类别 × 追加销售类别 ([`CategoryCrossTabAnalyzer`])
//! - `combos` - 主商品类别组合 × 追加销售类别 ([`ComboAnalyzer`])
//! - `top` - 各类别热门追加销售商品 ([`TopUpsellsAnalyzer`])

pub mod category_cross_tab;
pub mod combo_analysis;
pub mod product_upsells;
pub mod top_upsells;

use crate::models::{Category, Dataset};
use crate::reporting::Report;
use itertools::Itertools;
use std::collections::BTreeMap;

pub use category_cross_tab::{CategoryCrossTab, CategoryCrossTabAnalyzer};
pub use combo_analysis::{ComboAnalyzer, ComboStats};
pub use product_upsells::{ProductUpsellAnalyzer, ProductUpsellRow, ProductUpsellStats};
pub use top_upsells::{TopUpsellStats, TopUpsellsAnalyzer};

/// 一种统计方式
pub trait Analyzer {
    /// 日志中显示的名称
    fn name(&self) -> &'static str;

    /// 对全部订单做一次完整统计
    fn analyze(&self, dataset: &Dataset) -> Box<dyn Report>;
}

/// 本次运行要执行的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Products,
    Categories,
    Combos(ComboAnalyzer),
    Top(TopUpsellsAnalyzer),
    /// 全部统计，均使用默认参数
    All,
}

impl AnalysisMode {
    pub fn analyzers(&self) -> Vec<Box<dyn Analyzer>> {
        match *self {
            AnalysisMode::Products => vec![Box::new(ProductUpsellAnalyzer)],
            AnalysisMode::Categories => vec![Box::new(CategoryCrossTabAnalyzer)],
            AnalysisMode::Combos(analyzer) => vec![Box::new(analyzer)],
            AnalysisMode::Top(analyzer) => vec![Box::new(analyzer)],
            AnalysisMode::All => vec![
                Box::new(ProductUpsellAnalyzer),
                Box::new(CategoryCrossTabAnalyzer),
                Box::new(ComboAnalyzer::default()),
                Box::new(TopUpsellsAnalyzer::default()),
            ],
        }
    }
}

/// 次数降序，次数相同按键升序
pub(crate) fn ranked_counts<K: Ord>(counts: &BTreeMap<K, usize>) -> Vec<(&K, usize)> {
    counts
        .iter()
        .map(|(key, &count)| (key, count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .collect()
}

/// `<类别> (кол-во)` 列在前，`<类别> (%)` 列在后
pub(crate) fn count_header(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|c| format!("{} (кол-во)", c))
        .chain(categories.iter().map(|c| format!("{} (%)", c)))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Dataset, Order, OrderLine};

    /// 由 (订单号, 商品名, 是否追加销售) 构造数据集
    pub fn dataset(lines: &[(&str, &str, bool)]) -> Dataset {
        let mut dataset = Dataset::default();
        for &(order_id, product, is_upsell) in lines {
            let line = OrderLine::new(order_id, product, is_upsell);
            match dataset.orders.iter_mut().find(|o| o.id == order_id) {
                Some(order) => order.lines.push(line),
                None => {
                    let mut order = Order::new(order_id);
                    order.lines.push(line);
                    dataset.orders.push(order);
                }
            }
            dataset.line_count += 1;
        }
        dataset
    }
}
