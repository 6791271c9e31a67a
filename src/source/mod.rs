// レコードソース - フォーマットごとのストリーミング読み込み
//
// 各ソースはファイルを1レコードずつ読み進めるイテレータで、
// ファイル全体をメモリに保持しない。

pub mod csv_rows;
pub mod json_array;

use crate::core::{FieldParseError, Item, SourceError};

// 公開API
pub use csv_rows::CsvRowSource;
pub use json_array::JsonArraySource;

/// デコード済みの1レコード
#[derive(Debug)]
pub struct Decoded {
    pub item: Item,
    /// ゼロで補われたフィールドの変換エラー
    pub zero_filled: Vec<FieldParseError>,
}

impl Decoded {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            zero_filled: Vec::new(),
        }
    }
}

/// 次のレコードを返すストリーミングソース
///
/// `Err(SourceError::Fatal)` を返した後は `None` を返し続ける。
pub trait RecordSource: Iterator<Item = Result<Decoded, SourceError>> {
    /// フォーマット上の理由で無視した行数
    fn ignored_rows(&self) -> usize {
        0
    }
}
