// ファイル処理の方針

use crate::core::{FileFormat, ParseErrorPolicy, RecoveryPolicy};

/// ソースごとの回復方針とCSVの数値変換方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    json_recovery: RecoveryPolicy,
    csv_recovery: RecoveryPolicy,
    on_parse_error: ParseErrorPolicy,
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_recovery(mut self, policy: RecoveryPolicy) -> Self {
        self.json_recovery = policy;
        self
    }

    pub fn with_csv_recovery(mut self, policy: RecoveryPolicy) -> Self {
        self.csv_recovery = policy;
        self
    }

    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.on_parse_error = policy;
        self
    }

    pub fn json_recovery(&self) -> RecoveryPolicy {
        self.json_recovery
    }

    pub fn csv_recovery(&self) -> RecoveryPolicy {
        self.csv_recovery
    }

    pub fn on_parse_error(&self) -> ParseErrorPolicy {
        self.on_parse_error
    }

    /// フォーマットに対応する回復方針
    pub fn recovery_for(&self, format: FileFormat) -> RecoveryPolicy {
        match format {
            FileFormat::Json => self.json_recovery,
            FileFormat::Csv => self.csv_recovery,
        }
    }
}

// JSONは中断、CSVは読み飛ばし、数値変換失敗はゼロ補完
impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            json_recovery: RecoveryPolicy::AbortOnError,
            csv_recovery: RecoveryPolicy::SkipOnError,
            on_parse_error: ParseErrorPolicy::ZeroFill,
        }
    }
}
