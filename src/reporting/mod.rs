// 処理結果の報告
//
// 実行全体のレポーターから、ファイル名とフォーマットを固定した
// ファイル単位のレポーターを作り、各ファイルの処理に明示的に渡す。
// - implementations.rs の TracingReporter  - tracingによる構造化ログ
// - implementations.rs の NoOpReporter     - ベンチマーク用
// - implementations.rs の MemoryReporter   - テスト用の記録

pub mod implementations;
pub mod traits;

// 公開API
pub use implementations::*;
pub use traits::*;
