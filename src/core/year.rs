use super::brackets::{BracketTable, PRE_STAGE_3, STAGE_3};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Australian income year (runs 1 July to 30 June)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    JsonSchema,
)]
pub enum IncomeYear {
    #[serde(rename = "2023-2024")]
    FY2023_24,
    #[serde(rename = "2024-2025")]
    FY2024_25,
    #[default]
    #[serde(rename = "2025-2026")]
    FY2025_26,
}

/// Which bracket table the engine applies for the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketPolicy {
    /// One fixed table regardless of the income year
    #[default]
    Fixed,
    /// The table legislated for the income year
    PerYear,
}

impl IncomeYear {
    pub const ALL: [IncomeYear; 3] = [
        IncomeYear::FY2023_24,
        IncomeYear::FY2024_25,
        IncomeYear::FY2025_26,
    ];

    /// Calendar year in which the income year ends
    pub fn end_year(&self) -> i32 {
        match self {
            IncomeYear::FY2023_24 => 2024,
            IncomeYear::FY2024_25 => 2025,
            IncomeYear::FY2025_26 => 2026,
        }
    }

    /// 1 July of the starting calendar year
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.end_year() - 1, 7, 1).expect("1 July is a valid date")
    }

    /// 30 June of the ending calendar year
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.end_year(), 6, 30).expect("30 June is a valid date")
    }

    /// "1 July 2024 to 30 June 2025"
    pub fn period(&self) -> String {
        format!(
            "{} to {}",
            self.start_date().format("%-d %B %Y"),
            self.end_date().format("%-d %B %Y")
        )
    }

    /// Display as "2024-2025"
    pub fn display(&self) -> String {
        format!("{}-{}", self.end_year() - 1, self.end_year())
    }

    /// Resident rates actually legislated for this year
    pub fn historical_brackets(&self) -> &'static BracketTable {
        match self {
            IncomeYear::FY2023_24 => &PRE_STAGE_3,
            IncomeYear::FY2024_25 | IncomeYear::FY2025_26 => &STAGE_3,
        }
    }

    pub fn brackets(&self, policy: BracketPolicy) -> &'static BracketTable {
        match policy {
            BracketPolicy::Fixed => &STAGE_3,
            BracketPolicy::PerYear => self.historical_brackets(),
        }
    }

    fn from_end_year(year: i32) -> Option<IncomeYear> {
        IncomeYear::ALL.into_iter().find(|y| y.end_year() == year)
    }
}

impl FromStr for IncomeYear {
    type Err = String;

    /// Accepts "2024-2025", "2024-25" or the end year "2025".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let end_year = match s.split_once(['-', '/']) {
            Some((start, end)) => {
                let start: i32 = start.parse().map_err(|_| s.to_string())?;
                let end = match end.len() {
                    2 => (start / 100) * 100 + end.parse::<i32>().map_err(|_| s.to_string())?,
                    _ => end.parse().map_err(|_| s.to_string())?,
                };
                if end != start + 1 {
                    return Err(s.to_string());
                }
                end
            }
            None => s.parse().map_err(|_| s.to_string())?,
        };
        IncomeYear::from_end_year(end_year).ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for IncomeYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_year_display() {
        assert_eq!(IncomeYear::FY2023_24.display(), "2023-2024");
        assert_eq!(IncomeYear::FY2024_25.display(), "2024-2025");
        assert_eq!(IncomeYear::FY2025_26.to_string(), "2025-2026");
    }

    #[test]
    fn income_year_start_end_dates() {
        let year = IncomeYear::FY2024_25;
        assert_eq!(year.start_date(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(year.end_date(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn income_year_period() {
        assert_eq!(IncomeYear::FY2025_26.period(), "1 July 2025 to 30 June 2026");
    }

    #[test]
    fn parse_long_form() {
        assert_eq!("2025-2026".parse(), Ok(IncomeYear::FY2025_26));
        assert_eq!("2023-2024".parse(), Ok(IncomeYear::FY2023_24));
    }

    #[test]
    fn parse_short_forms() {
        assert_eq!("2024-25".parse(), Ok(IncomeYear::FY2024_25));
        assert_eq!("2024/25".parse(), Ok(IncomeYear::FY2024_25));
        assert_eq!("2025".parse(), Ok(IncomeYear::FY2024_25));
    }

    #[test]
    fn parse_rejects_unsupported_years() {
        assert!("2019-2020".parse::<IncomeYear>().is_err());
        assert!("2024-2026".parse::<IncomeYear>().is_err());
        assert!("last year".parse::<IncomeYear>().is_err());
    }

    #[test]
    fn default_is_latest_year() {
        assert_eq!(IncomeYear::default(), IncomeYear::FY2025_26);
    }

    #[test]
    fn fixed_policy_ignores_year() {
        for year in IncomeYear::ALL {
            assert_eq!(year.brackets(BracketPolicy::Fixed), &STAGE_3);
        }
    }

    #[test]
    fn per_year_policy_uses_historical_table() {
        assert_eq!(
            IncomeYear::FY2023_24.brackets(BracketPolicy::PerYear),
            &PRE_STAGE_3
        );
        assert_eq!(IncomeYear::FY2025_26.brackets(BracketPolicy::PerYear), &STAGE_3);
    }

    #[test]
    fn serde_uses_long_form() {
        let json = serde_json::to_string(&IncomeYear::FY2024_25).unwrap();
        assert_eq!(json, "\"2024-2025\"");
        let year: IncomeYear = serde_json::from_str("\"2023-2024\"").unwrap();
        assert_eq!(year, IncomeYear::FY2023_24);
    }
}
