// カタログ処理に関連するデータ型定義

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// カタログの1レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub product: String,
    pub price: i64,
    pub rating: i64,
}

impl Item {
    pub fn new(product: impl Into<String>, price: i64, rating: i64) -> Self {
        Self {
            product: product.into(),
            price,
            rating,
        }
    }
}

// キーは大文字小文字を区別せずに照合する。
// 未知のキーは無視し、欠落やnullはゼロ値のまま残す。
impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ItemVisitor)
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = Item;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with Product, Price and Rating keys")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Item, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut item = Item::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("product") {
                if let Some(product) = map.next_value::<Option<String>>()? {
                    item.product = product;
                }
            } else if key.eq_ignore_ascii_case("price") {
                if let Some(price) = map.next_value::<Option<i64>>()? {
                    item.price = price;
                }
            } else if key.eq_ignore_ascii_case("rating") {
                if let Some(rating) = map.next_value::<Option<i64>>()? {
                    item.rating = rating;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(item)
    }

    fn visit_unit<E>(self) -> Result<Item, E>
    where
        E: de::Error,
    {
        Ok(Item::default())
    }
}

/// 数値として解釈されるカラム
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Price,
    Rating,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => f.write_str("price"),
            Self::Rating => f.write_str("rating"),
        }
    }
}

/// 入力ファイルのフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// 拡張子からフォーマットを判定（大文字小文字を区別する）
    ///
    /// ファイル名の最後の `.` 以降を拡張子とみなすため、`.json` のような
    /// ドットで始まる名前も対象になる。
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let (_, extension) = name.rsplit_once('.')?;
        match extension {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// レコード単位のエラーに対する方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecoveryPolicy {
    /// 最初のエラーでファイル全体の結果を破棄する
    AbortOnError,
    /// エラーのレコードを記録して読み飛ばす
    SkipOnError,
}

/// CSVの数値変換に失敗したときの方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ParseErrorPolicy {
    /// 変換できなかったフィールドを0として比較に含める
    ZeroFill,
    /// 行をレコードエラーとして扱う
    SkipRow,
}

/// 1ファイル分の最大値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maxima {
    pub highest_priced: Option<Item>,
    pub top_rated: Option<Item>,
}

/// 1ファイル分の処理件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// 最大値の比較に使われたレコード数
    pub records: usize,
    /// 回復方針により読み飛ばされたレコード数
    pub skipped: usize,
    /// 数値をゼロで補ったレコード数
    pub zero_filled: usize,
    /// ヘッダー行やカラム数違いで無視された行数
    pub ignored: usize,
}

/// 1ファイルの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub maxima: Maxima,
    pub stats: FileStats,
}

/// 実行全体のサマリー（ファイル単位の件数のみ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    pub unsupported: usize,
}

impl RunSummary {
    pub fn total_files(&self) -> usize {
        self.completed + self.failed + self.unsupported
    }
}
