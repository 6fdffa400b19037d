//! `.xlsx` 批量输入与结果导出

mod reader;
mod writer;

pub use reader::{read_identifiers, read_identifiers_from_path};
pub use writer::{write_results, write_results_to_path};

/// 结果工作表名称
pub const RESULTS_SHEET_NAME: &str = "Wyniki";

/// 结果表头
pub const RESULTS_HEADER: [&str; 3] = ["NIP", "Nazwa podmiotu", "Status VAT"];

/// HTTP 下载时使用的 MIME 类型
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 建议的下载文件名
pub const RESULTS_FILE_NAME: &str = "wyniki_nip.xlsx";

/// 上传文件扩展名检查（不区分大小写）
pub fn has_xlsx_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_has_xlsx_extension() {
        assert!(has_xlsx_extension("nipy.xlsx"));
        assert!(has_xlsx_extension("NIPY.XLSX"));
        assert!(!has_xlsx_extension("nipy.xls"));
        assert!(!has_xlsx_extension("nipy.csv"));
        assert!(!has_xlsx_extension(""));
    }

    #[test]
    fn test_round_trip_preserves_identifiers() {
        let results = vec![
            VerificationResult::new("1234567819", "ACME", "Czynny"),
            VerificationResult::new("0123456789", "Zero Sp. z o.o.", "Zwolniony"),
            VerificationResult::new("5260250274", "Nie znaleziono w rejestrze", "Brak"),
        ];
        let bytes = write_results(&results).unwrap();
        let nips = read_identifiers(&bytes).unwrap();
        assert_eq!(
            nips,
            vec![
                "1234567819".to_string(),
                "0123456789".to_string(),
                "5260250274".to_string()
            ]
        );
    }

    #[test]
    fn test_round_trip_empty_result_set() {
        let bytes = write_results(&[]).unwrap();
        assert!(read_identifiers(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_path_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RESULTS_FILE_NAME);
        let results = vec![VerificationResult::invalid("12")];
        write_results_to_path(&results, &path).unwrap();
        assert_eq!(read_identifiers_from_path(&path).unwrap(), vec!["12".to_string()]);
    }
}
