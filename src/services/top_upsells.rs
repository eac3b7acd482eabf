//! 各类别中最常被追加销售的商品

use super::{ranked_counts, Analyzer};
use crate::error::ValidationError;
use crate::models::{Category, Dataset};
use crate::reporting::{percent_of, Report};
use std::collections::BTreeMap;
use std::io;

/// 每个类别默认输出的商品数
pub const DEFAULT_TOP_N: usize = 10;

/// 控制台中每个类别显示的商品数
const SUMMARY_PRODUCTS_PER_CATEGORY: usize = 5;

/// 按类别统计的追加销售商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpsellStats {
    pub top_n: usize,
    /// 有追加销售且有非包装主商品的订单数
    pub orders_with_upsells: usize,
    /// 类别 → 商品名 → 次数
    pub products: BTreeMap<Category, BTreeMap<String, usize>>,
    /// 类别 → 该类别追加销售总数
    pub totals: BTreeMap<Category, usize>,
}

impl TopUpsellStats {
    pub fn compute(dataset: &Dataset, top_n: usize) -> Self {
        let mut stats = Self {
            top_n,
            orders_with_upsells: 0,
            products: BTreeMap::new(),
            totals: BTreeMap::new(),
        };

        for order in &dataset.orders {
            let partition = order.partition();
            if !partition.has_upsells() || partition.qualifying_main().next().is_none() {
                continue;
            }
            stats.orders_with_upsells += 1;

            for upsell in partition.qualifying_upsells() {
                let category = upsell.category();
                *stats
                    .products
                    .entry(category)
                    .or_default()
                    .entry(upsell.product_name.clone())
                    .or_default() += 1;
                *stats.totals.entry(category).or_default() += 1;
            }
        }

        stats
    }

    /// 所有类别的追加销售总数
    pub fn grand_total(&self) -> usize {
        self.totals.values().sum()
    }

    /// 按追加销售总数降序排列的类别
    pub fn ranked_categories(&self) -> Vec<(Category, usize)> {
        ranked_counts(&self.totals)
            .into_iter()
            .map(|(&category, count)| (category, count))
            .collect()
    }

    /// 某个类别中按次数降序排列的商品，次数相同按名称
    pub fn ranked_products(&self, category: Category) -> Vec<(&str, usize)> {
        self.products
            .get(&category)
            .map(|products| {
                ranked_counts(products)
                    .into_iter()
                    .map(|(name, count)| (name.as_str(), count))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Report for TopUpsellStats {
    fn file_name(&self) -> &'static str {
        "top_upsells_by_category.csv"
    }

    fn header(&self) -> Vec<String> {
        [
            "Категория",
            "Ранг",
            "Товар",
            "Количество допродаж",
            "Доля в категории (%)",
            "Доля от всех допродаж (%)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let grand_total = self.grand_total();
        let mut rows = Vec::new();

        for (category, category_total) in self.ranked_categories() {
            let products = self.ranked_products(category);
            for (rank, (product, count)) in products.into_iter().take(self.top_n).enumerate() {
                rows.push(vec![
                    category.label().to_string(),
                    (rank + 1).to_string(),
                    product.to_string(),
                    count.to_string(),
                    percent_of(count, category_total),
                    percent_of(count, grand_total),
                ]);
            }
        }
        rows
    }

    fn write_summary(&self, out: &mut dyn io::Write, _limit: usize) -> io::Result<()> {
        let grand_total = self.grand_total();
        let shown = self.top_n.min(SUMMARY_PRODUCTS_PER_CATEGORY);

        writeln!(out, "Анализируются топ-{} товаров в каждой категории", self.top_n)?;
        writeln!(out, "\nОбщая статистика:")?;
        writeln!(out, "Заказов с допродажами: {}", self.orders_with_upsells)?;
        writeln!(out, "Всего допродаж: {}", grand_total)?;

        for (category, category_total) in self.ranked_categories() {
            writeln!(out, "\n📦 Категория: {} (всего допродаж: {})", category, category_total)?;
            let products = self.ranked_products(category);
            for (rank, (product, count)) in products.iter().take(shown).enumerate() {
                writeln!(
                    out,
                    "  {}. {}: {} допродаж ({} в категории)",
                    rank + 1,
                    product,
                    count,
                    percent_of(*count, category_total)
                )?;
            }
            if products.len() > shown {
                writeln!(out, "  ... и ещё {} товаров", products.len() - shown)?;
            }
        }

        writeln!(out, "\n📊 Рейтинг категорий по количеству допродаж:")?;
        for (rank, (category, count)) in self.ranked_categories().into_iter().enumerate() {
            let unique_products = self.products.get(&category).map_or(0, BTreeMap::len);
            writeln!(
                out,
                "  {}. {}: {} допродаж ({}, {} уникальных товаров)",
                rank + 1,
                category,
                count,
                percent_of(count, grand_total),
                unique_products
            )?;
        }
        Ok(())
    }
}

/// 各类别热门追加销售商品，构造时校验 `top_n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopUpsellsAnalyzer {
    top_n: usize,
}

impl TopUpsellsAnalyzer {
    pub fn new(top_n: usize) -> Result<Self, ValidationError> {
        if top_n < 1 {
            return Err(ValidationError::TopNTooSmall { top_n });
        }
        Ok(Self { top_n })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

impl Default for TopUpsellsAnalyzer {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl Analyzer for TopUpsellsAnalyzer {
    fn name(&self) -> &'static str {
        "各类别热门追加销售商品"
    }

    fn analyze(&self, dataset: &Dataset) -> Box<dyn Report> {
        Box::new(TopUpsellStats::compute(dataset, self.top_n))
    }
}
