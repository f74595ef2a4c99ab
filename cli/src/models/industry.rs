use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Index constituent lists shipped in the data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexList {
    #[value(name = "nifty50")]
    Nifty50,
    #[value(name = "nifty100")]
    Nifty100,
    #[value(name = "niftymidcap50")]
    Niftymidcap50,
    #[value(name = "niftymidcap100")]
    Niftymidcap100,
    #[value(name = "niftytotalmarket")]
    Niftytotalmarket,
}

impl IndexList {
    pub const ALL: [IndexList; 5] = [
        IndexList::Nifty50,
        IndexList::Nifty100,
        IndexList::Niftymidcap50,
        IndexList::Niftymidcap100,
        IndexList::Niftytotalmarket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexList::Nifty50 => "nifty50",
            IndexList::Nifty100 => "nifty100",
            IndexList::Niftymidcap50 => "niftymidcap50",
            IndexList::Niftymidcap100 => "niftymidcap100",
            IndexList::Niftytotalmarket => "niftytotalmarket",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl std::str::FromStr for IndexList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_end_matches(".csv").to_lowercase();
        IndexList::ALL
            .into_iter()
            .find(|list| list.as_str() == name)
            .ok_or_else(|| format!("unknown index list '{}'", s))
    }
}

/// Mean ratios of one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrySummaryRow {
    pub industry: String,
    pub mean_sma_ratio: Option<f64>,
    pub mean_ema_ratio: Option<f64>,
}

/// Appearances of one industry among the strongest rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub industry: String,
    pub frequency: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_list_names() {
        assert_eq!(IndexList::Nifty50.file_name(), "nifty50.csv");
        assert_eq!("niftymidcap100.csv".parse::<IndexList>().unwrap(), IndexList::Niftymidcap100);
        assert_eq!("NIFTY100".parse::<IndexList>().unwrap(), IndexList::Nifty100);
        assert!("sensex".parse::<IndexList>().is_err());
    }
}
