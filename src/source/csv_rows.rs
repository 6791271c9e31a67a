// CSV行のストリーミング読み込み
//
// 1行目をヘッダーとは仮定せず、2列目が "Price" の行をヘッダーとして読み飛ばす。
// カラム数が3でない行は黙って無視する。
// 行はバイト列のまま読み、UTF-8として不正なバイトは U+FFFD に置き換える。

use super::{Decoded, RecordSource};
use crate::core::{
    FieldParseError, FileError, Item, NumericField, ParseErrorPolicy, RecordError, SourceError,
};
use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder};
use std::io::Read;

const FIELD_COUNT: usize = 3;
const HEADER_MARKER: &[u8] = b"Price";

/// `Product,Price,Rating` 形式の行を1つずつItemとして返すソース
pub struct CsvRowSource<R> {
    rows: ByteRecordsIntoIter<R>,
    on_parse_error: ParseErrorPolicy,
    ignored: usize,
    finished: bool,
}

impl<R: Read> CsvRowSource<R> {
    pub fn new(reader: R, on_parse_error: ParseErrorPolicy) -> Self {
        let rows = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_byte_records();

        Self {
            rows,
            on_parse_error,
            ignored: 0,
            finished: false,
        }
    }

    fn decode(&self, row: &ByteRecord) -> Result<Decoded, SourceError> {
        let mut failures = Vec::new();
        let price = parse_field(NumericField::Price, &row[1]).unwrap_or_else(|error| {
            failures.push(error);
            0
        });
        let rating = parse_field(NumericField::Rating, &row[2]).unwrap_or_else(|error| {
            failures.push(error);
            0
        });

        match self.on_parse_error {
            ParseErrorPolicy::SkipRow if !failures.is_empty() => Err(failures.swap_remove(0).into()),
            _ => Ok(Decoded {
                item: Item::new(String::from_utf8_lossy(&row[0]), price, rating),
                zero_filled: failures,
            }),
        }
    }
}

fn parse_field(field: NumericField, bytes: &[u8]) -> Result<i64, FieldParseError> {
    // 置換文字は数字ではないので、不正なバイトは変換エラーになる
    let value = String::from_utf8_lossy(bytes);
    value
        .parse::<i64>()
        .map_err(|source| FieldParseError::new(field, value.to_string(), source))
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<Decoded, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let row = match self.rows.next()? {
                Ok(row) => row,
                // I/O エラーの後は行の境界を取り戻せない
                Err(error) if error.is_io_error() => {
                    self.finished = true;
                    return Some(Err(FileError::CsvStream { source: error }.into()));
                }
                Err(error) => return Some(Err(RecordError::csv_row(error).into())),
            };

            if row.len() != FIELD_COUNT || &row[1] == HEADER_MARKER {
                self.ignored += 1;
                continue;
            }

            return Some(self.decode(&row));
        }
    }
}

impl<R: Read> RecordSource for CsvRowSource<R> {
    fn ignored_rows(&self) -> usize {
        self.ignored
    }
}
