use crate::config::Config;
use crate::error::InputError;
use crate::models::order::{Order, OrderLine};
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// 加载后的订单数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// 按订单号首次出现的顺序排列
    pub orders: Vec<Order>,
    /// 成功读取的商品行数
    pub line_count: usize,
    /// 因列数不符被跳过的行数
    pub skipped_rows: usize,
}

/// 必需列在表头中的位置
struct ColumnIndex {
    order_id: usize,
    product: usize,
    upsell: usize,
    width: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, config: &Config, path: &Path) -> Result<Self, InputError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| InputError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };
        Ok(Self {
            order_id: find(&config.order_id_column)?,
            product: find(&config.product_column)?,
            upsell: find(&config.upsell_column)?,
            width: headers.len(),
        })
    }
}

/// 从配置中的输入文件加载订单
pub fn load_orders(config: &Config) -> Result<Dataset, InputError> {
    let path = config.input_path.as_path();
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| InputError::ReadFailed {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let dataset = read_orders(file, path, config)?;

    tracing::debug!(
        "成功加载 {} 个订单，共 {} 行商品",
        dataset.orders.len(),
        dataset.line_count
    );
    Ok(dataset)
}

/// 从任意数据源读取订单，`path` 只用于错误信息
pub fn read_orders<R: io::Read>(reader: R, path: &Path, config: &Config) -> Result<Dataset, InputError> {
    let read_failed = |source: csv::Error| InputError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(read_failed)?.clone();
    let columns = ColumnIndex::resolve(&headers, config, path)?;

    let mut dataset = Dataset::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(read_failed)?;

        if record.len() != columns.width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            tracing::warn!(
                "跳过第 {} 行: 列数 {} 与表头列数 {} 不符",
                line,
                record.len(),
                columns.width
            );
            dataset.skipped_rows += 1;
            continue;
        }

        let order_id = record.get(columns.order_id).unwrap_or_default();
        let product_name = record.get(columns.product).unwrap_or_default();
        let is_upsell = record.get(columns.upsell) == Some(config.upsell_marker.as_str());
        let line = OrderLine::new(order_id, product_name, is_upsell);

        let index = *positions.entry(line.order_id.clone()).or_insert_with(|| {
            dataset.orders.push(Order::new(order_id));
            dataset.orders.len() - 1
        });
        dataset.orders[index].lines.push(line);
        dataset.line_count += 1;
    }

    if dataset.skipped_rows > 0 {
        tracing::warn!("⚠️ 共跳过 {} 行格式不完整的数据", dataset.skipped_rows);
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<Dataset, InputError> {
        read_orders(content.as_bytes(), Path::new("products.csv"), &Config::default())
    }

    #[test]
    fn test_groups_lines_by_order_in_appearance_order() {
        let dataset = read(
            "№ заказа,Товары,Допродажа\n\
             7,Кольє Серце,\n\
             3,Браслет,\n\
             7,Сережки Зірка,Допродажа\n",
        )
        .unwrap();

        let ids: Vec<_> = dataset.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "3"]);
        assert_eq!(dataset.orders[0].lines.len(), 2);
        assert!(!dataset.orders[0].lines[0].is_upsell);
        assert!(dataset.orders[0].lines[1].is_upsell);
        assert_eq!(dataset.line_count, 3);
    }

    #[test]
    fn test_only_exact_marker_is_upsell() {
        let dataset = read(
            "№ заказа,Товары,Допродажа\n\
             1,A,допродажа\n\
             1,B, Допродажа\n\
             1,C,\n\
             1,D,Допродажа\n",
        )
        .unwrap();

        let flags: Vec<_> = dataset.orders[0].lines.iter().map(|l| l.is_upsell).collect();
        assert_eq!(flags, vec![false, false, false, true]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dataset = read(
            "Дата,Товары,Сума,№ заказа,Допродажа\n\
             2024-01-01,Кольє,100,42,\n",
        )
        .unwrap();
        assert_eq!(dataset.orders[0].id, "42");
        assert_eq!(dataset.orders[0].lines[0].product_name, "Кольє");
    }

    #[test]
    fn test_rows_with_wrong_width_are_skipped() {
        let dataset = read(
            "№ заказа,Товары,Допродажа\n\
             1,Кольє\n\
             2,Браслет,,extra\n\
             3,Кафф,\n",
        )
        .unwrap();
        assert_eq!(dataset.skipped_rows, 2);
        assert_eq!(dataset.orders.len(), 1);
        assert_eq!(dataset.orders[0].id, "3");
    }

    #[test]
    fn test_missing_column_names_the_column() {
        let err = read("№ заказа,Товары\n1,Кольє\n").unwrap_err();
        match err {
            InputError::MissingColumn { column, .. } => assert_eq!(column, "Допродажа"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let config = Config {
            input_path: "no/such/products.csv".into(),
            ..Config::default()
        };
        assert!(matches!(load_orders(&config), Err(InputError::NotFound { .. })));
    }
}
