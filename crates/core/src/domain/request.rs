use crate::time::calendar::{clamp_day, days_in_month, MIN_YEAR};
use anyhow::ensure;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// House systems the chart service understands, keyed by display name and one-letter code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Equal,
    Placidus,
    Koch,
    Campanus,
    Regiomontanus,
    Porphyry,
    Alcabitius,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 8] = [
        HouseSystem::WholeSign,
        HouseSystem::Equal,
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Campanus,
        HouseSystem::Regiomontanus,
        HouseSystem::Porphyry,
        HouseSystem::Alcabitius,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HouseSystem::WholeSign => "整宮制",
            HouseSystem::Equal => "等宮制",
            HouseSystem::Placidus => "普拉西杜斯",
            HouseSystem::Koch => "柯赫",
            HouseSystem::Campanus => "坎帕納斯",
            HouseSystem::Regiomontanus => "雷吉歐蒙塔納斯",
            HouseSystem::Porphyry => "波菲利",
            HouseSystem::Alcabitius => "阿卡彼特",
        }
    }

    pub fn code(self) -> char {
        match self {
            HouseSystem::WholeSign => 'W',
            HouseSystem::Equal => 'E',
            HouseSystem::Placidus => 'P',
            HouseSystem::Koch => 'K',
            HouseSystem::Campanus => 'C',
            HouseSystem::Regiomontanus => 'R',
            HouseSystem::Porphyry => 'O',
            HouseSystem::Alcabitius => 'B',
        }
    }

    /// Accepts a display name or a one-letter code (case-insensitive, only the first character
    /// counts). Empty or unknown input falls back to whole-sign houses.
    pub fn resolve(input: &str) -> Self {
        let s = input.trim();
        if let Some(hs) = Self::ALL.iter().find(|hs| hs.label() == s) {
            return *hs;
        }
        let Some(first) = s.chars().next() else {
            return HouseSystem::WholeSign;
        };
        let code = first.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|hs| hs.code() == code)
            .unwrap_or(HouseSystem::WholeSign)
    }
}

fn default_house_system() -> String {
    HouseSystem::default().label().to_string()
}

/// Query sent to `GET /api/chart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub location: String,
    #[serde(default = "default_house_system")]
    pub house_system: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub ai: bool,
}

/// Accepts `true`/`false` as well as the `1`/`0` the query string uses, from JSON or a
/// URL-encoded query alike.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct FlagVisitor;

    impl serde::de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean flag (true, false, 1 or 0)")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(serde::de::Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(serde::de::Unexpected::Signed(v), &self)),
            }
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                _ => Err(E::invalid_value(serde::de::Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

impl ChartRequest {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=12).contains(&self.month),
            "month must be 1..=12 (got {})",
            self.month
        );
        let max_day = days_in_month(self.year, self.month);
        ensure!(
            (1..=max_day).contains(&self.day),
            "day must be 1..={max_day} for {}-{:02} (got {})",
            self.year,
            self.month,
            self.day
        );
        ensure!(self.hour <= 23, "hour must be 0..=23 (got {})", self.hour);
        ensure!(
            self.minute <= 59,
            "minute must be 0..=59 (got {})",
            self.minute
        );
        ensure!(
            !self.location.trim().is_empty(),
            "location must be non-empty"
        );
        Ok(())
    }

    /// Query parameters in wire order. `ai` is only sent when requested.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("year", self.year.to_string()),
            ("month", self.month.to_string()),
            ("day", self.day.to_string()),
            ("hour", self.hour.to_string()),
            ("minute", self.minute.to_string()),
            ("location", self.location.clone()),
            ("house_system", self.house_system.clone()),
        ];
        if self.ai {
            out.push(("ai", "1".to_string()));
        }
        out
    }
}

/// Current state of the birth-data form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub location: String,
    pub house_system: HouseSystem,
    pub ai: bool,
}

impl SelectionState {
    pub const DEFAULT_HOUR: u32 = 12;
    pub const DEFAULT_MINUTE: u32 = 0;

    /// Form defaults: today's year and month, day 1, noon.
    pub fn defaults_at(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            day: 1,
            hour: Self::DEFAULT_HOUR,
            minute: Self::DEFAULT_MINUTE,
            location: String::new(),
            house_system: HouseSystem::default(),
            ai: false,
        }
    }

    /// Selectable years, oldest first.
    pub fn year_options(today: NaiveDate) -> Vec<i32> {
        (MIN_YEAR..=today.year()).collect()
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
        self.day = clamp_day(self.year, self.month, self.day);
    }

    /// Months outside `1..=12` are ignored.
    pub fn set_month(&mut self, month: u32) {
        if !(1..=12).contains(&month) {
            return;
        }
        self.month = month;
        self.day = clamp_day(self.year, self.month, self.day);
    }

    pub fn to_request(&self) -> ChartRequest {
        ChartRequest {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            location: self.location.clone(),
            house_system: self.house_system.label().to_string(),
            ai: self.ai,
        }
    }
}
