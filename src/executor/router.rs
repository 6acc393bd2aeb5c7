use std::collections::HashMap;

use reqwest::Url;

use super::Language;
use crate::config::ExecutorConfig;
use crate::errors::{GraderError, Result};

/// 语言 -> 执行服务地址
///
/// 启动时一次性构建，之后只读；查不到时返回 `UnsupportedLanguage`，不做任何回退。
#[derive(Debug, Clone, Default)]
pub struct ExecutionRouter {
    endpoints: HashMap<Language, Url>,
}

impl ExecutionRouter {
    /// 从配置构建，未知语言或非法地址视为配置错误
    pub fn from_config(config: &ExecutorConfig) -> Result<Self> {
        let mut router = Self::default();
        for (tag, url) in &config.endpoints {
            let language: Language = tag
                .parse()
                .map_err(|e| GraderError::config(format!("executor.endpoints: {e}")))?;
            router.register(language, url)?;
        }
        Ok(router)
    }

    pub fn register(&mut self, language: Language, url: &str) -> Result<()> {
        let url = Url::parse(url).map_err(|e| {
            GraderError::config(format!("{language} 执行服务地址无效 '{url}': {e}"))
        })?;
        self.endpoints.insert(language, url);
        Ok(())
    }

    /// 解析语言标签对应的执行服务地址
    pub fn resolve(&self, language: &str) -> Result<&Url> {
        let parsed: Language = language
            .parse()
            .map_err(|_| GraderError::unsupported_language(language.to_string()))?;
        self.endpoints.get(&parsed).ok_or_else(|| {
            GraderError::unsupported_language(format!("{parsed} 未配置执行服务"))
        })
    }

    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.endpoints.keys().copied().collect();
        languages.sort();
        languages
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
