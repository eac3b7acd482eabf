//! 主商品类别 × 追加销售类别 交叉统计

use super::{count_header, ranked_counts, Analyzer};
use crate::models::{Category, Dataset};
use crate::reporting::{percent_of, Report};
use std::collections::{BTreeMap, BTreeSet};
use std::io;

/// 交叉统计结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCrossTab {
    /// 每个类别售出的主商品数（不论订单是否有追加销售），作为百分比的分母
    pub main_totals: BTreeMap<Category, usize>,
    /// 主商品类别 → 追加销售类别 → 次数
    pub cross_tab: BTreeMap<Category, BTreeMap<Category, usize>>,
}

impl CategoryCrossTab {
    pub fn compute(dataset: &Dataset) -> Self {
        let mut stats = Self::default();

        for order in &dataset.orders {
            let partition = order.partition();
            let main_categories: Vec<Category> =
                partition.qualifying_main().map(|line| line.category()).collect();

            for &main in &main_categories {
                *stats.main_totals.entry(main).or_default() += 1;
            }

            let upsell_categories: Vec<Category> =
                partition.qualifying_upsells().map(|line| line.category()).collect();
            if upsell_categories.is_empty() {
                continue;
            }

            for &main in &main_categories {
                let row = stats.cross_tab.entry(main).or_default();
                for &upsell in &upsell_categories {
                    *row.entry(upsell).or_default() += 1;
                }
            }
        }

        stats
    }

    /// 出现过的所有追加销售类别，按名称排序
    pub fn upsell_categories(&self) -> Vec<Category> {
        self.cross_tab
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn main_total(&self, category: Category) -> usize {
        self.main_totals.get(&category).copied().unwrap_or_default()
    }
}

impl Report for CategoryCrossTab {
    fn file_name(&self) -> &'static str {
        "category_analysis.csv"
    }

    fn header(&self) -> Vec<String> {
        let mut header = vec!["Основная категория".to_string(), "Количество продаж".to_string()];
        header.extend(count_header(&self.upsell_categories()));
        header
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let columns = self.upsell_categories();
        self.cross_tab
            .iter()
            .map(|(&main, upsells)| {
                let total = self.main_total(main);
                let counts: Vec<usize> = columns
                    .iter()
                    .map(|c| upsells.get(c).copied().unwrap_or_default())
                    .collect();

                let mut row = vec![main.label().to_string(), total.to_string()];
                row.extend(counts.iter().map(|count| count.to_string()));
                row.extend(counts.iter().map(|&count| percent_of(count, total)));
                row
            })
            .collect()
    }

    fn write_summary(&self, out: &mut dyn io::Write, _limit: usize) -> io::Result<()> {
        for (&main, upsells) in &self.cross_tab {
            let total = self.main_total(main);
            writeln!(out, "\nОсновная категория: {} (продано: {})", main, total)?;
            for (category, count) in ranked_counts(upsells) {
                if count > 0 {
                    writeln!(
                        out,
                        "  - {}: {} допродаж ({})",
                        category,
                        count,
                        percent_of(count, total)
                    )?;
                }
            }
        }

        writeln!(out, "\nОбщая статистика по основным категориям:")?;
        for (category, count) in ranked_counts(&self.main_totals) {
            writeln!(out, "  - {}: {} товаров продано", category, count)?;
        }
        Ok(())
    }
}

/// 类别交叉统计
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCrossTabAnalyzer;

impl Analyzer for CategoryCrossTabAnalyzer {
    fn name(&self) -> &'static str {
        "类别交叉统计"
    }

    fn analyze(&self, dataset: &Dataset) -> Box<dyn Report> {
        Box::new(CategoryCrossTab::compute(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::dataset;

    #[test]
    fn test_single_order_scenario() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Кольє Серце", false),
            ("1", "Сережки Зірка", true),
        ]));

        assert_eq!(
            stats.header(),
            vec!["Основная категория", "Количество продаж", "Серьги (кол-во)", "Серьги (%)"]
        );
        assert_eq!(stats.rows(), vec![vec!["Колье", "1", "1", "100.0%"]]);
    }

    #[test]
    fn test_full_cross_product() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Кольє", false),
            ("1", "Браслет", false),
            ("1", "Сережки", true),
            ("1", "Кафф", true),
            ("1", "Чокер", true),
        ]));

        let increments: usize = stats.cross_tab.values().flat_map(|row| row.values()).sum();
        assert_eq!(increments, 6);
        assert_eq!(stats.cross_tab[&Category::Necklace][&Category::Cuff], 1);
    }

    #[test]
    fn test_baseline_counts_orders_without_upsells() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Кольє", false),
            ("1", "Сережки", true),
            ("2", "Кольє", false),
            ("3", "Кольє", false),
            ("3", "Коробка", true),
        ]));

        assert_eq!(stats.main_total(Category::Necklace), 3);
        assert_eq!(stats.rows(), vec![vec!["Колье", "3", "1", "33.3%"]]);
    }

    #[test]
    fn test_packaging_never_counted() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Коробка", false),
            ("1", "Пакет", true),
            ("1", "Сережки", true),
        ]));
        assert!(stats.main_totals.is_empty());
        assert!(stats.cross_tab.is_empty());
    }

    #[test]
    fn test_denominator_covers_contributing_orders() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Кольє", false),
            ("1", "Сережки", true),
            ("1", "Сережки", true),
            ("2", "Кольє", false),
            ("2", "Кафф", true),
        ]));
        // 分子可以超过分母，但分母不少于贡献订单数
        let numerator: usize = stats.cross_tab[&Category::Necklace].values().sum();
        assert_eq!(numerator, 3);
        assert!(stats.main_total(Category::Necklace) >= 2);
    }

    #[test]
    fn test_columns_sorted_by_label() {
        let stats = CategoryCrossTab::compute(&dataset(&[
            ("1", "Кольє", false),
            ("1", "Чокер", true),
            ("1", "Анклет", true),
            ("1", "Брошка", true),
        ]));
        let labels: Vec<_> = stats.upsell_categories().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Анклет", "Другое", "Чокер"]);
    }
}
