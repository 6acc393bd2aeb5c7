//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 判题流水线的错误分类：传输、解析、语言不支持、执行失败、持久化、记录缺失。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grader_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum GraderError {
            $($variant(String),)*
        }

        impl GraderError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GraderError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GraderError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GraderError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GraderError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GraderError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grader_errors! {
    Transport("E101", "Transport Error"),
    Parse("E102", "Parse Error"),
    UnsupportedLanguage("E103", "Unsupported Language"),
    ExecutionFailure("E104", "Execution Failure"),
    Persistence("E105", "Persistence Error"),
    RecordNotFound("E106", "Record Not Found"),
    DatabaseConfig("E201", "Database Configuration Error"),
    DatabaseConnection("E202", "Database Connection Error"),
    StatusStoreConnection("E203", "Status Store Connection Error"),
    StatusStorePluginNotFound("E204", "Status Store Plugin Not Found"),
    Serialization("E205", "Serialization Error"),
    Config("E206", "Configuration Error"),
}

impl GraderError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GraderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GraderError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GraderError {
    fn from(err: sea_orm::DbErr) -> Self {
        GraderError::Persistence(err.to_string())
    }
}

impl From<redis::RedisError> for GraderError {
    fn from(err: redis::RedisError) -> Self {
        GraderError::Transport(err.to_string())
    }
}

impl From<reqwest::Error> for GraderError {
    fn from(err: reqwest::Error) -> Self {
        GraderError::ExecutionFailure(err.to_string())
    }
}

impl From<serde_json::Error> for GraderError {
    fn from(err: serde_json::Error) -> Self {
        GraderError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for GraderError {
    fn from(err: config::ConfigError) -> Self {
        GraderError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraderError>;
