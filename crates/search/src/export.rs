//! Catalog export to CSV or JSON
//!
//! The format is chosen by file extension. List-valued columns (sizes,
//! product types) are written as JSON arrays inside the CSV cell.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stylesearch_core::{Catalog, Error, NormalizedProduct, Result};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON array of records
    Json,
}

impl ExportFormat {
    /// Pick a format from the path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(Error::UnsupportedFormat(format!(
                "cannot export to '{}': use .csv or .json",
                path.display()
            ))),
        }
    }
}

const CSV_HEADER: &[&str] = &[
    "product_id",
    "title",
    "brand",
    "category",
    "details",
    "product_types",
    "color_family",
    "sizes",
    "sizes_count",
    "mrp",
    "sell_price",
    "discount_pct",
    "price_range",
    "material",
    "fit",
    "neck_type",
    "pattern",
];

/// Write `catalog` to `path` in the format its extension names.
///
/// The format is checked before the file is created.
pub fn export_catalog(catalog: &Catalog, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(catalog.products(), &mut out)?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, catalog.products())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(format)
}

/// Write products as CSV
pub fn write_csv<W: Write>(products: &[NormalizedProduct], out: &mut W) -> Result<()> {
    write_record(out, CSV_HEADER.iter().map(|h| h.to_string()))?;
    for p in products {
        let fields = vec![
            p.product_id.to_string(),
            p.title.clone().unwrap_or_default(),
            p.brand.clone(),
            p.category.clone(),
            p.details.clone(),
            serde_json::to_string(&p.product_types)?,
            p.color_family.map(|c| c.to_string()).unwrap_or_default(),
            serde_json::to_string(&p.sizes)?,
            p.sizes_count.to_string(),
            optional(p.mrp),
            p.sell_price.to_string(),
            optional(p.discount_pct),
            p.price_range.to_string(),
            p.features.material.clone().unwrap_or_default(),
            p.features.fit.clone().unwrap_or_default(),
            p.features.neck_type.clone().unwrap_or_default(),
            p.features.pattern.clone().unwrap_or_default(),
        ];
        write_record(out, fields.into_iter())?;
    }
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_record<W: Write>(out: &mut W, fields: impl Iterator<Item = String>) -> Result<()> {
    let line = fields
        .map(|f| escape_csv(&f))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

/// Quote a field when it holds a delimiter, quote or line break
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylesearch_core::{PriceRange, ProductFeatures};

    fn product() -> NormalizedProduct {
        NormalizedProduct {
            product_id: 3,
            title: None,
            details: "Cotton top, \"boxy\" fit".to_string(),
            brand: "only".to_string(),
            category: "Western Wear".to_string(),
            product_types: vec!["top".to_string()],
            color_family: None,
            sizes: vec!["M".to_string(), "L".to_string()],
            sizes_count: 2,
            mrp: Some(12.5),
            sell_price: 9.99,
            discount_pct: None,
            price_range: PriceRange::MidRange,
            features: ProductFeatures {
                material: Some("cotton".to_string()),
                ..ProductFeatures::default()
            },
            search_text: String::new(),
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.csv")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("a.JSON")).unwrap(), ExportFormat::Json);
        assert!(matches!(
            ExportFormat::from_path(Path::new("a.xlsx")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_row() {
        let mut buf = Vec::new();
        write_csv(&[product()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert!(lines[0].starts_with("product_id,title,brand,category"));
        assert_eq!(
            lines[1],
            "3,,only,Western Wear,\"Cotton top, \"\"boxy\"\" fit\",\"[\"\"top\"\"]\",,\
             \"[\"\"M\"\",\"\"L\"\"]\",2,12.5,9.99,,mid-range,cotton,,,"
        );
    }

    #[test]
    fn test_export_json_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.json");
        let catalog = Catalog::from_products(vec![product()]).unwrap();

        assert_eq!(export_catalog(&catalog, &path).unwrap(), ExportFormat::Json);
        let back: Vec<NormalizedProduct> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, catalog.products());
    }

    #[test]
    fn test_export_unsupported_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.parquet");
        let catalog = Catalog::from_products(vec![product()]).unwrap();
        assert!(matches!(
            export_catalog(&catalog, &path),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }
}
