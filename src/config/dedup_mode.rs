use anyhow::bail;
use std::str::FromStr;

/// 前回通知との重複判定のしかた
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupMode {
    /// 新しい文面が前回の文面に部分文字列として含まれていたら送らない
    #[default]
    Contains,
    /// 完全一致のときだけ送らない
    Exact,
}

impl DedupMode {
    /// `memo` に対して `text` を「既に送った」とみなすか
    pub fn is_duplicate(self, memo: &str, text: &str) -> bool {
        match self {
            DedupMode::Contains => memo.contains(text),
            DedupMode::Exact => memo == text,
        }
    }
}

impl FromStr for DedupMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "exact" => Ok(Self::Exact),
            other => bail!("unknown DEDUP_MODE: {other}"),
        }
    }
}
