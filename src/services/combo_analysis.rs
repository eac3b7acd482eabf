//! 类别组合统计
//!
//! 订单中主商品覆盖的每个类别子集（大小在范围内）都计一次，
//! 订单里每个追加销售再分别记到这些子集上

use super::{count_header, ranked_counts, Analyzer};
use crate::error::ValidationError;
use crate::models::{combinations_in_range, Category, CategoryCombo, Dataset};
use crate::reporting::{percent_of, Report};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::io;

/// 最小组合大小的默认值和下限
pub const DEFAULT_MIN_COMBO_SIZE: usize = 2;

/// 组合统计结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboStats {
    pub min_size: usize,
    pub max_size: Option<usize>,
    /// 组合 → 出现该组合的订单数
    pub order_counts: BTreeMap<CategoryCombo, usize>,
    /// 组合 → 追加销售类别 → 次数
    pub upsell_counts: BTreeMap<CategoryCombo, BTreeMap<Category, usize>>,
}

impl ComboStats {
    pub fn compute(dataset: &Dataset, min_size: usize, max_size: Option<usize>) -> Self {
        let mut stats = Self {
            min_size,
            max_size,
            order_counts: BTreeMap::new(),
            upsell_counts: BTreeMap::new(),
        };

        for order in &dataset.orders {
            let partition = order.partition();
            let main_categories: BTreeSet<Category> =
                partition.qualifying_main().map(|line| line.category()).collect();
            let upsell_categories: Vec<Category> =
                partition.qualifying_upsells().map(|line| line.category()).collect();

            for combo in combinations_in_range(&main_categories, min_size, max_size) {
                if !upsell_categories.is_empty() {
                    let row = stats.upsell_counts.entry(combo.clone()).or_default();
                    for &upsell in &upsell_categories {
                        *row.entry(upsell).or_default() += 1;
                    }
                }
                *stats.order_counts.entry(combo).or_default() += 1;
            }
        }

        stats
    }

    pub fn order_count(&self, combo: &CategoryCombo) -> usize {
        self.order_counts.get(combo).copied().unwrap_or_default()
    }

    /// 按订单数降序排列的组合，订单数相同按组合名称
    pub fn ranked_combos(&self) -> Vec<(&CategoryCombo, usize)> {
        self.order_counts
            .iter()
            .map(|(combo, &count)| (combo, count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }

    /// 出现过的所有追加销售类别，按名称排序
    pub fn upsell_categories(&self) -> Vec<Category> {
        self.upsell_counts
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 组合大小 → 不同组合的个数
    pub fn size_distribution(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for combo in self.order_counts.keys() {
            *sizes.entry(combo.len()).or_default() += 1;
        }
        sizes
    }
}

impl Report for ComboStats {
    fn file_name(&self) -> &'static str {
        "combo_analysis.csv"
    }

    fn header(&self) -> Vec<String> {
        let mut header = vec!["Комбинация категорий".to_string(), "Количество заказов".to_string()];
        header.extend(count_header(&self.upsell_categories()));
        header
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let columns = self.upsell_categories();
        let empty = BTreeMap::new();

        self.ranked_combos()
            .into_iter()
            .map(|(combo, order_count)| {
                let upsells = self.upsell_counts.get(combo).unwrap_or(&empty);
                let counts: Vec<usize> = columns
                    .iter()
                    .map(|c| upsells.get(c).copied().unwrap_or_default())
                    .collect();

                let mut row = vec![combo.label(), order_count.to_string()];
                row.extend(counts.iter().map(|count| count.to_string()));
                row.extend(counts.iter().map(|&count| percent_of(count, order_count)));
                row
            })
            .collect()
    }

    fn write_summary(&self, out: &mut dyn io::Write, limit: usize) -> io::Result<()> {
        match self.max_size {
            Some(max) => writeln!(out, "Анализируются комбинации от {} до {} категорий", self.min_size, max)?,
            None => writeln!(out, "Анализируются комбинации от {} категорий и выше", self.min_size)?,
        }
        writeln!(out, "\nНайдено {} уникальных комбинаций категорий", self.order_counts.len())?;
        writeln!(out, "Из них {} комбинаций имеют допродажи", self.upsell_counts.len())?;

        writeln!(out, "\nРаспределение по размерам комбинаций:")?;
        for (size, count) in self.size_distribution() {
            writeln!(out, "  - {} категории: {} комбинаций", size, count)?;
        }

        writeln!(out, "\nТоп комбинации с допродажами:")?;
        let with_upsells = self
            .ranked_combos()
            .into_iter()
            .filter_map(|(combo, count)| self.upsell_counts.get(combo).map(|row| (combo, count, row)));
        for (i, (combo, order_count, upsells)) in with_upsells.take(limit).enumerate() {
            writeln!(out, "\n{}. {} (заказов: {})", i + 1, combo, order_count)?;
            for (category, count) in ranked_counts(upsells) {
                if count > 0 {
                    writeln!(
                        out,
                        "   - {}: {} допродаж ({})",
                        category,
                        count,
                        percent_of(count, order_count)
                    )?;
                }
            }
        }

        writeln!(out, "\nОбщая статистика по комбинациям (топ-{}):", limit)?;
        for (combo, count) in self.ranked_combos().into_iter().take(limit) {
            writeln!(out, "  - {}: {} заказов", combo, count)?;
        }
        Ok(())
    }
}

/// 类别组合统计，构造时校验组合大小范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboAnalyzer {
    min_size: usize,
    max_size: Option<usize>,
}

impl ComboAnalyzer {
    pub fn new(min_size: usize, max_size: Option<usize>) -> Result<Self, ValidationError> {
        if min_size < DEFAULT_MIN_COMBO_SIZE {
            return Err(ValidationError::ComboMinTooSmall { min: min_size });
        }
        if let Some(max) = max_size {
            if max < min_size {
                return Err(ValidationError::ComboMaxBelowMin { min: min_size, max });
            }
        }
        Ok(Self { min_size, max_size })
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }
}

impl Default for ComboAnalyzer {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_COMBO_SIZE,
            max_size: None,
        }
    }
}

impl Analyzer for ComboAnalyzer {
    fn name(&self) -> &'static str {
        "类别组合统计"
    }

    fn analyze(&self, dataset: &Dataset) -> Box<dyn Report> {
        Box::new(ComboStats::compute(dataset, self.min_size, self.max_size))
    }
}
