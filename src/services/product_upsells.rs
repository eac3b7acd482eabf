//! 按主商品统计追加销售
//!
//! 订单中只要出现追加销售，订单里每个主商品（包装除外）计数加 1

use super::Analyzer;
use crate::models::Dataset;
use crate::reporting::Report;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use tracing::debug;

/// 每个商品保留的追加销售示例数
pub const MAX_EXAMPLES: usize = 5;

/// 单个主商品的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpsellRow {
    pub product: String,
    /// 带有追加销售的出现次数
    pub count: usize,
    /// 去重后按名称排序的示例，最多 `MAX_EXAMPLES` 个
    pub examples: Vec<String>,
}

/// 按主商品统计的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpsellStats {
    pub total_orders: usize,
    pub orders_with_upsells: usize,
    /// 按次数降序，次数相同按商品名升序
    pub rows: Vec<ProductUpsellRow>,
}

impl ProductUpsellStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let mut counts: BTreeMap<&str, (usize, BTreeSet<&str>)> = BTreeMap::new();
        let mut orders_with_upsells = 0;

        for order in &dataset.orders {
            let partition = order.partition();
            if !partition.has_upsells() {
                continue;
            }
            orders_with_upsells += 1;

            for main in partition.qualifying_main() {
                debug!(
                    "订单 {}: 主商品 '{}' 附带 {} 个追加销售",
                    order.id,
                    main.product_name,
                    partition.upsells.len()
                );
                let entry = counts.entry(main.product_name.as_str()).or_default();
                entry.0 += 1;
                entry
                    .1
                    .extend(partition.upsells.iter().map(|line| line.product_name.as_str()));
            }
        }

        let rows = counts
            .into_iter()
            .map(|(product, (count, examples))| ProductUpsellRow {
                product: product.to_string(),
                count,
                examples: examples
                    .into_iter()
                    .take(MAX_EXAMPLES)
                    .map(str::to_string)
                    .collect(),
            })
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.product.cmp(&b.product)))
            .collect();

        Self {
            total_orders: dataset.orders.len(),
            orders_with_upsells,
            rows,
        }
    }
}

impl Report for ProductUpsellStats {
    fn file_name(&self) -> &'static str {
        "upsell_analysis.csv"
    }

    fn header(&self) -> Vec<String> {
        vec![
            "Основной товар".to_string(),
            "Количество допродаж".to_string(),
            "Примеры допродаж".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| vec![row.product.clone(), row.count.to_string(), row.examples.join("; ")])
            .collect()
    }

    fn write_summary(&self, out: &mut dyn io::Write, limit: usize) -> io::Result<()> {
        writeln!(out, "\nВсего заказов: {}", self.total_orders)?;
        writeln!(out, "Заказов с допродажами: {}", self.orders_with_upsells)?;

        writeln!(out, "\nТоп-{} товаров с наибольшим количеством допродаж:", limit)?;
        for (i, row) in self.rows.iter().take(limit).enumerate() {
            writeln!(out, "{}. {}: {} допродаж", i + 1, row.product, row.count)?;
        }
        Ok(())
    }
}

/// 按主商品统计
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductUpsellAnalyzer;

impl Analyzer for ProductUpsellAnalyzer {
    fn name(&self) -> &'static str {
        "按商品统计追加销售"
    }

    fn analyze(&self, dataset: &Dataset) -> Box<dyn Report> {
        Box::new(ProductUpsellStats::compute(dataset))
    }
}
