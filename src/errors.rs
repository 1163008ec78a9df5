use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenerError {
    NotFound(String),
    Open(String),
    Read(String),
    Write(String),
    Close(String),
    Closed(String),
    Config(String),
    Validation(String),
}

impl ShortenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "E001",
            ShortenerError::Open(_) => "E002",
            ShortenerError::Read(_) => "E003",
            ShortenerError::Write(_) => "E004",
            ShortenerError::Close(_) => "E005",
            ShortenerError::Closed(_) => "E006",
            ShortenerError::Config(_) => "E007",
            ShortenerError::Validation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "URL Not Found",
            ShortenerError::Open(_) => "Store Open Error",
            ShortenerError::Read(_) => "Store Read Error",
            ShortenerError::Write(_) => "Store Write Error",
            ShortenerError::Close(_) => "Store Close Error",
            ShortenerError::Closed(_) => "Store Closed",
            ShortenerError::Config(_) => "Configuration Error",
            ShortenerError::Validation(_) => "Validation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortenerError::NotFound(msg)
            | ShortenerError::Open(msg)
            | ShortenerError::Read(msg)
            | ShortenerError::Write(msg)
            | ShortenerError::Close(msg)
            | ShortenerError::Closed(msg)
            | ShortenerError::Config(msg)
            | ShortenerError::Validation(msg) => msg,
        }
    }

    /// Storage-level failures that the caller must not retry or paper over.
    ///
    /// `NotFound` and `Validation` are request-scoped and recoverable;
    /// everything raised by the file backend's I/O path is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShortenerError::Open(_)
                | ShortenerError::Read(_)
                | ShortenerError::Write(_)
                | ShortenerError::Close(_)
                | ShortenerError::Closed(_)
        )
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 HTTP 响应体）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortenerError {}

// 便捷的构造函数
impl ShortenerError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortenerError::NotFound(msg.into())
    }

    pub fn open<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Open(msg.into())
    }

    pub fn read<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Read(msg.into())
    }

    pub fn write<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Write(msg.into())
    }

    pub fn close<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Close(msg.into())
    }

    pub fn closed<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Closed(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Validation(msg.into())
    }
}

impl From<config::ConfigError> for ShortenerError {
    fn from(err: config::ConfigError) -> Self {
        ShortenerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;
