use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 牌種の文字列・数値の変換エラー
    Parse { input: String, message: String },
    /// 使用牌の設定が不正
    InvalidTileSet { message: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            EngineError::InvalidTileSet { message } => {
                write!(f, "Invalid tile set: {}", message)
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
