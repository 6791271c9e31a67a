// ストリーミング最大値リデューサー
//
// レコードソースを1回だけ走査し、価格と評価それぞれの最大値を保持する。

use crate::core::{FileError, FileOutcome, FileStats, Item, Maxima, RecoveryPolicy, SourceError};
use crate::reporting::FileReporter;
use crate::source::RecordSource;

/// 価格と評価の暫定最大値
///
/// 同値の場合は先に現れたアイテムを保持する。
/// 何も観測していない間はどちらのスロットも空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxTracker {
    max_price: Option<Item>,
    max_rating: Option<Item>,
}

fn beats(current: Option<&Item>, candidate: &Item, key: fn(&Item) -> i64) -> bool {
    match current {
        Some(current) => key(candidate) > key(current),
        None => true,
    }
}

impl MaxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, item: Item) {
        let new_price = beats(self.max_price.as_ref(), &item, |item| item.price);
        let new_rating = beats(self.max_rating.as_ref(), &item, |item| item.rating);

        match (new_price, new_rating) {
            (true, true) => {
                self.max_rating = Some(item.clone());
                self.max_price = Some(item);
            }
            (true, false) => self.max_price = Some(item),
            (false, true) => self.max_rating = Some(item),
            (false, false) => {}
        }
    }

    pub fn max_price(&self) -> Option<&Item> {
        self.max_price.as_ref()
    }

    pub fn max_rating(&self) -> Option<&Item> {
        self.max_rating.as_ref()
    }

    pub fn finish(self) -> Maxima {
        Maxima {
            highest_priced: self.max_price,
            top_rated: self.max_rating,
        }
    }
}

/// ソースを最後まで読み、最大値と件数を返す
///
/// レコードエラーは `policy` に従って読み飛ばすか中断する。
/// 中断した場合、それまでの最大値は返さない。
pub fn reduce<S, F>(mut source: S, policy: RecoveryPolicy, reporter: &F) -> Result<FileOutcome, FileError>
where
    S: RecordSource,
    F: FileReporter + ?Sized,
{
    let mut tracker = MaxTracker::new();
    let mut stats = FileStats::default();

    for record in source.by_ref() {
        match record {
            Ok(decoded) => {
                if !decoded.zero_filled.is_empty() {
                    for error in &decoded.zero_filled {
                        reporter.field_zero_filled(error);
                    }
                    stats.zero_filled += 1;
                }
                tracker.observe(decoded.item);
                stats.records += 1;
            }
            Err(SourceError::Record(error)) => match policy {
                RecoveryPolicy::SkipOnError => {
                    reporter.record_skipped(&error);
                    stats.skipped += 1;
                }
                RecoveryPolicy::AbortOnError => return Err(FileError::aborted(error)),
            },
            Err(SourceError::Fatal(error)) => return Err(error),
        }
    }

    stats.ignored = source.ignored_rows();
    Ok(FileOutcome {
        maxima: tracker.finish(),
        stats,
    })
}
