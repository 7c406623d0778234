//! リクエスト組み立て状態の定義

/// リクエスト組み立て状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// リクエスト行待ち
    RequestLine,
    /// ヘッダー行待ち
    HeaderLine,
    /// ヘッダー終了後
    ///
    /// ボディがない場合はこの状態で停止する。
    BodyLine,
    /// 完了 (ボディあり)
    End,
}
