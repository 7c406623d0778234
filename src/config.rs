/// 行区切りのデフォルト (CRLF)
pub const DEFAULT_DELIMITER: &[u8] = b"\r\n";

/// パーサーの設定
///
/// 区切り文字や読み込みサイズを接続ごとに渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// 行区切り (デフォルト: CRLF)
    pub delimiter: Vec<u8>,
    /// 1 回の read で要求するバイト数 (デフォルト: 1)
    ///
    /// 行の切り出し結果はこの値に依存しない。
    pub read_chunk_size: usize,
    /// 区切りのない行の最大長 (デフォルト: 8KB)
    pub max_line_size: usize,
    /// 最大ヘッダー数 (デフォルト: 100)
    pub max_headers: usize,
    /// Content-Length 分のボディを読み捨てるか (デフォルト: true)
    pub drain_body: bool,
    /// 読み捨てるボディの最大サイズ (デフォルト: 10MB)
    ///
    /// これを超える Content-Length のボディは読まずに残す。
    pub max_body_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_vec(),
            read_chunk_size: 1,
            max_line_size: 8 * 1024,         // 8KB
            max_headers: 100,
            drain_body: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ParserConfig {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_line_size: usize::MAX,
            max_headers: usize::MAX,
            max_body_size: usize::MAX,
            ..Self::default()
        }
    }

    /// 行区切りを設定 (ビルダーパターン)
    ///
    /// 空の区切りは無視して現在の値を残す。
    pub fn delimiter(mut self, delimiter: &[u8]) -> Self {
        if !delimiter.is_empty() {
            self.delimiter = delimiter.to_vec();
        }
        self
    }

    /// 読み込みサイズを設定 (ビルダーパターン)
    ///
    /// 0 は 1 として扱う。
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    /// 最大行長を設定 (ビルダーパターン)
    pub fn max_line_size(mut self, size: usize) -> Self {
        self.max_line_size = size;
        self
    }

    /// 最大ヘッダー数を設定 (ビルダーパターン)
    pub fn max_headers(mut self, count: usize) -> Self {
        self.max_headers = count;
        self
    }

    /// ボディを読み捨てるかを設定 (ビルダーパターン)
    pub fn drain_body(mut self, drain: bool) -> Self {
        self.drain_body = drain;
        self
    }

    /// 読み捨てるボディの最大サイズを設定 (ビルダーパターン)
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// 宣言されたボディ長のうち読み捨てるバイト数
    pub fn drain_len(&self, declared: Option<usize>) -> Option<usize> {
        if !self.drain_body {
            return None;
        }
        declared.filter(|len| *len <= self.max_body_size)
    }
}
