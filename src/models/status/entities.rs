use serde::{Deserialize, Serialize};

// 判题状态，供轮询客户端读取
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Checking, // 判题中
    Checked,  // 已判分并持久化
    Error,    // 判题失败
}

impl JobStatus {
    pub const CHECKING: &'static str = "checking";
    pub const CHECKED: &'static str = "checked";
    pub const ERROR: &'static str = "error";

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Checking => Self::CHECKING,
            JobStatus::Checked => Self::CHECKED,
            JobStatus::Error => Self::ERROR,
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            JobStatus::CHECKING => Ok(JobStatus::Checking),
            JobStatus::CHECKED => Ok(JobStatus::Checked),
            JobStatus::ERROR => Ok(JobStatus::Error),
            _ => Err(format!(
                "无效的判题状态: '{s}'. 支持的状态: checking, checked, error"
            )),
        }
    }
}
