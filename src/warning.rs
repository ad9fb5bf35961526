#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    EncodingFallback,
    EmptyTableSkipped,
    RaggedRowsPadded,
    NoTablesDetected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    /// Position of the `<table>` among all tables of the document, in document order.
    pub source_table: Option<usize>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_table: None,
        }
    }

    #[must_use]
    pub fn with_source_table(mut self, source_table: usize) -> Self {
        self.source_table = Some(source_table);
        self
    }
}
