use thiserror::Error;

/// 读写 xlsx 工作簿时的错误
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("cannot open workbook: {0}")]
    Open(#[from] calamine::XlsxError),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("cannot write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 表单输入级错误：整个请求只报告一次，不产生部分结果
///
/// 文案直接展示在表单页上。
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Wpisz NIP lub załaduj plik .xlsx.")]
    Missing,

    #[error("Nieobsługiwany plik \"{0}\": załaduj plik .xlsx.")]
    UnsupportedFile(String),

    #[error("Błąd przy odczycie pliku: {0}")]
    Unreadable(#[from] SheetError),

    #[error("Plik zawiera zbyt wiele numerów NIP ({count}, limit {limit}).")]
    TooMany { count: usize, limit: usize },
}
