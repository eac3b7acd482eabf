use super::Report;
use crate::error::OutputError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// 把统计结果写入输出目录，已存在的文件会被覆盖
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写入 CSV 文件并返回文件路径
    pub fn write(&self, report: &dyn Report) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputError::CreateDirFailed {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(report.file_name());
        let file = fs::File::create(&path).map_err(|e| OutputError::write_failed(&path, e))?;
        write_csv(report, file).map_err(|e| OutputError::write_failed(&path, e))?;

        tracing::debug!("已写入 {} 行: {}", report.rows().len(), path.display());
        Ok(path)
    }
}

/// 按表头和数据行写出 CSV
pub fn write_csv<W: io::Write>(report: &dyn Report, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(report.header())?;
    for row in report.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 在内存中生成 CSV 内容
pub fn render_csv(report: &dyn Report) -> csv::Result<String> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ProductUpsellRow, ProductUpsellStats};

    fn stats() -> ProductUpsellStats {
        ProductUpsellStats {
            total_orders: 1,
            orders_with_upsells: 1,
            rows: vec![ProductUpsellRow {
                product: "Кольє, срібло".to_string(),
                count: 1,
                examples: vec!["Сережки".to_string()],
            }],
        }
    }

    #[test]
    fn test_render_quotes_fields_with_delimiter() {
        let csv = render_csv(&stats()).unwrap();
        assert_eq!(
            csv,
            "Основной товар,Количество допродаж,Примеры допродаж\n\"Кольє, срібло\",1,Сережки\n"
        );
    }

    #[test]
    fn test_write_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("nested/out"));

        let path = writer.write(&stats()).unwrap();

        assert_eq!(path, dir.path().join("nested/out/upsell_analysis.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), render_csv(&stats()).unwrap());
    }
}
