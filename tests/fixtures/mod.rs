// 統合テスト用のユーティリティ
// カタログファイルの作成とテストデータ

#![allow(dead_code)]


// 公開API
pub use test_data::*;
