//! Category - タスクの分類
//!
//! アイコンと色は表示用のメタデータで、振る舞いには影響しません。
//! フィルタとソートには `label()` を使います。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::TodoError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Work,
    Study,
    Life,
    Important,
}

/// CategoryColor はカテゴリの表示色（実際の色は UI 側で決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Gray,
    Blue,
    Green,
    Orange,
    Red,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Work,
        Category::Study,
        Category::Life,
        Category::Important,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Life => "Life",
            Category::Important => "Important",
        }
    }

    /// SF Symbols 名
    pub fn icon(self) -> &'static str {
        match self {
            Category::General => "tray",
            Category::Work => "briefcase",
            Category::Study => "book",
            Category::Life => "house",
            Category::Important => "star",
        }
    }

    pub fn color(self) -> CategoryColor {
        match self {
            Category::General => CategoryColor::Gray,
            Category::Work => CategoryColor::Blue,
            Category::Study => CategoryColor::Green,
            Category::Life => CategoryColor::Orange,
            Category::Important => CategoryColor::Red,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TodoError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Work", Category::Work)]
    #[case("study", Category::Study)]
    #[case(" IMPORTANT ", Category::Important)]
    fn parses_labels_case_insensitively(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(input.parse::<Category>().unwrap(), expected);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "chores".parse::<Category>().unwrap_err();
        assert!(matches!(err, TodoError::UnknownCategory(label) if label == "chores"));
    }

    #[test]
    fn default_is_general() {
        assert_eq!(Category::default(), Category::General);
        assert_eq!(Category::General.icon(), "tray");
        assert_eq!(Category::Important.color(), CategoryColor::Red);
    }
}
